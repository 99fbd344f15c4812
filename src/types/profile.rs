//! User profile and the categorical selections it carries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::health::HealthSummary;
use crate::{DietPlanError, Result};

/// Accepted height range in centimetres (inclusive).
pub const HEIGHT_RANGE_CM: (f64, f64) = (100.0, 250.0);
/// Accepted weight range in kilograms (inclusive).
pub const WEIGHT_RANGE_KG: (f64, f64) = (30.0, 200.0);

pub const DEFAULT_HEIGHT_CM: f64 = 170.0;
pub const DEFAULT_WEIGHT_KG: f64 = 65.0;

/// Normalise a user-supplied label for matching: lowercase, no separators.
///
/// `"Heart Disease"`, `"heart-disease"` and `"HEART_DISEASE"` all collapse
/// to `"heartdisease"`.
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Medical consideration selected by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicalCondition {
    #[default]
    None,
    Diabetes,
    Hypertension,
    HeartDisease,
}

impl MedicalCondition {
    pub const ALL: [Self; 4] = [
        Self::None,
        Self::Diabetes,
        Self::Hypertension,
        Self::HeartDisease,
    ];

    /// Integer code fed to the classifier.
    pub const fn code(self) -> i64 {
        match self {
            Self::None => 0,
            Self::Diabetes => 1,
            Self::Hypertension => 2,
            Self::HeartDisease => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Diabetes => "Diabetes",
            Self::Hypertension => "Hypertension",
            Self::HeartDisease => "Heart Disease",
        }
    }
}

impl fmt::Display for MedicalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MedicalCondition {
    type Err = DietPlanError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|c| normalize(c.label()) == wanted)
            .ok_or_else(|| DietPlanError::InvalidInput(format!("unknown medical condition '{s}'")))
    }
}

/// Diet preference; decides which exclusion rule applies to the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    #[default]
    Vegetarian,
    NonVegetarian,
    Vegan,
}

impl DietType {
    pub const ALL: [Self; 3] = [Self::Vegetarian, Self::NonVegetarian, Self::Vegan];

    /// Integer code fed to the classifier.
    pub const fn code(self) -> i64 {
        match self {
            Self::Vegetarian => 0,
            Self::NonVegetarian => 1,
            Self::Vegan => 2,
        }
    }

    /// Sub-type code used by the extended feature layout: 1 for
    /// plant-exclusive diets, 0 otherwise.
    pub const fn subtype_code(self) -> i64 {
        match self {
            Self::Vegan => 1,
            Self::Vegetarian | Self::NonVegetarian => 0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::NonVegetarian => "Non-Vegetarian",
            Self::Vegan => "Vegan",
        }
    }

    /// Stable lowercase identifier, used as a metric label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::NonVegetarian => "non_vegetarian",
            Self::Vegan => "vegan",
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DietType {
    type Err = DietPlanError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|d| normalize(d.label()) == wanted)
            .ok_or_else(|| DietPlanError::InvalidDietType(s.to_string()))
    }
}

/// Macronutrient focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroPreference {
    #[default]
    Balanced,
    HighProtein,
    LowCarb,
}

impl MacroPreference {
    pub const ALL: [Self; 3] = [Self::Balanced, Self::HighProtein, Self::LowCarb];

    /// Integer code fed to the classifier.
    pub const fn code(self) -> i64 {
        match self {
            Self::Balanced => 0,
            Self::HighProtein => 1,
            Self::LowCarb => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Balanced => "Balanced",
            Self::HighProtein => "High Protein",
            Self::LowCarb => "Low Carb",
        }
    }
}

impl fmt::Display for MacroPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MacroPreference {
    type Err = DietPlanError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|m| normalize(m.label()) == wanted)
            .ok_or_else(|| DietPlanError::InvalidInput(format!("unknown macro preference '{s}'")))
    }
}

/// One request's worth of user input.
///
/// Built fresh per request; height and weight are range-checked on
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    height_cm: f64,
    weight_kg: f64,
    pub condition: MedicalCondition,
    pub diet: DietType,
    pub macro_preference: MacroPreference,
}

impl UserProfile {
    /// Create a profile, rejecting out-of-range measurements.
    pub fn new(height_cm: f64, weight_kg: f64) -> Result<Self> {
        check_range("height", height_cm, HEIGHT_RANGE_CM, "cm")?;
        check_range("weight", weight_kg, WEIGHT_RANGE_KG, "kg")?;
        Ok(Self {
            height_cm,
            weight_kg,
            condition: MedicalCondition::default(),
            diet: DietType::default(),
            macro_preference: MacroPreference::default(),
        })
    }

    /// Set the medical condition.
    pub fn condition(mut self, condition: MedicalCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Set the diet type.
    pub fn diet(mut self, diet: DietType) -> Self {
        self.diet = diet;
        self
    }

    /// Set the macro preference.
    pub fn macro_preference(mut self, preference: MacroPreference) -> Self {
        self.macro_preference = preference;
        self
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// BMI, category and goal derived from the measurements.
    pub fn health(&self) -> HealthSummary {
        HealthSummary::from_measurements(self.height_cm, self.weight_kg)
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            height_cm: DEFAULT_HEIGHT_CM,
            weight_kg: DEFAULT_WEIGHT_KG,
            condition: MedicalCondition::default(),
            diet: DietType::default(),
            macro_preference: MacroPreference::default(),
        }
    }
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64), unit: &str) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DietPlanError::InvalidInput(format!(
            "{field} must be between {min} and {max} {unit}, got {value}"
        )))
    }
}
