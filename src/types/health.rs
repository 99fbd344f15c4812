//! BMI computation and classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Body Mass Index category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value.
    ///
    /// Total over all inputs: each boundary belongs to the upper band
    /// (18.5 is Normal, 25 Overweight, 30 Obese). NaN falls through to
    /// `Obese`, as no lower band accepts it.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if (18.5..25.0).contains(&bmi) {
            Self::Normal
        } else if (25.0..30.0).contains(&bmi) {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    /// Suggested goal for this band.
    pub const fn goal(self) -> Goal {
        match self {
            Self::Underweight => Goal::WeightGain,
            Self::Normal => Goal::Maintenance,
            Self::Overweight | Self::Obese => Goal::WeightLoss,
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weight goal suggested from the BMI band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightGain,
    Maintenance,
    WeightLoss,
}

impl Goal {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WeightGain => "Weight Gain",
            Self::Maintenance => "Maintenance",
            Self::WeightLoss => "Weight Loss",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw BMI: weight (kg) over height (m) squared.
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// BMI rounded to two decimals with its category and goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub bmi: f64,
    pub category: BmiCategory,
    pub goal: Goal,
}

impl HealthSummary {
    /// Compute the summary. The category is taken from the rounded value,
    /// so the displayed number and band always agree.
    pub fn from_measurements(height_cm: f64, weight_kg: f64) -> Self {
        let bmi = (bmi(height_cm, weight_kg) * 100.0).round() / 100.0;
        Self::from_bmi(bmi)
    }

    pub fn from_bmi(bmi: f64) -> Self {
        let category = BmiCategory::from_bmi(bmi);
        Self {
            bmi,
            category,
            goal: category.goal(),
        }
    }
}

impl fmt::Display for HealthSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BMI: {:.2} ({})\nGoal: {}",
            self.bmi, self.category, self.goal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_upper_band() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn classification_is_total() {
        assert_eq!(BmiCategory::from_bmi(0.0), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(-3.0), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(f64::INFINITY), BmiCategory::Obese);
        assert_eq!(BmiCategory::from_bmi(f64::NAN), BmiCategory::Obese);
    }

    #[test]
    fn goal_follows_category() {
        assert_eq!(HealthSummary::from_bmi(17.0).goal, Goal::WeightGain);
        assert_eq!(HealthSummary::from_bmi(22.0).goal, Goal::Maintenance);
        assert_eq!(HealthSummary::from_bmi(25.0).goal, Goal::WeightLoss);
        assert_eq!(HealthSummary::from_bmi(35.0).goal, Goal::WeightLoss);
    }

    #[test]
    fn default_form_values_are_normal() {
        let summary = HealthSummary::from_measurements(170.0, 65.0);
        assert_eq!(summary.bmi, 22.49);
        assert_eq!(summary.category, BmiCategory::Normal);
        assert_eq!(summary.goal, Goal::Maintenance);
    }

    #[test]
    fn rounding_decides_the_band() {
        // 180 cm, 59.94 kg sits on the 18.5 boundary
        let summary = HealthSummary::from_measurements(180.0, 59.94);
        assert_eq!(summary.bmi, 18.5);
        assert_eq!(summary.category, BmiCategory::Normal);
    }

    #[test]
    fn display_shows_two_decimals() {
        let text = HealthSummary::from_measurements(170.0, 65.0).to_string();
        assert!(text.contains("BMI: 22.49 (Normal)"));
        assert!(text.contains("Goal: Maintenance"));
    }
}
