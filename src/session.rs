//! Per-session recommendation history.
//!
//! The history is an explicit context object owned by the caller and
//! handed to [`DietPlanner::recommend`](crate::DietPlanner::recommend),
//! which records a recommendation only after the whole request succeeded.
//! By default it behaves as a "latest recommendation" cache; append mode
//! keeps every recommendation in insertion order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::Recommendation;
use crate::Result;

/// How new recommendations are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Keep only the latest recommendation.
    #[default]
    Replace,
    /// Keep every recommendation, oldest first.
    Append,
}

/// Recommendations made during one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHistory {
    #[serde(default)]
    mode: HistoryMode,
    #[serde(default)]
    entries: Vec<Recommendation>,
}

impl SessionHistory {
    pub fn new(mode: HistoryMode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
        }
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    /// Record a recommendation according to the history mode.
    pub fn record(&mut self, recommendation: Recommendation) {
        if self.mode == HistoryMode::Replace {
            self.entries.clear();
        }
        self.entries.push(recommendation);
    }

    /// Most recent recommendation, if any.
    pub fn latest(&self) -> Option<&Recommendation> {
        self.entries.last()
    }

    /// All recorded recommendations, oldest first.
    pub fn entries(&self) -> &[Recommendation] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load a saved session, or start an empty one.
    ///
    /// A missing or unreadable file starts a fresh session: history is a
    /// convenience and never blocks a request. `mode` always wins over the
    /// mode stored in the file.
    pub fn load_or_default(path: &Path, mode: HistoryMode) -> Self {
        let mut history = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Self>(&content) {
                Ok(history) => history,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt session file, starting fresh");
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read session file");
                Self::default()
            }
        };
        if mode == HistoryMode::Replace && history.entries.len() > 1 {
            history.entries.drain(..history.entries.len() - 1);
        }
        history.mode = mode;
        history
    }

    /// Persist the session as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!(path = %path.display(), entries = self.entries.len(), "saved session");
        Ok(())
    }

    /// Persist the session, logging a warning instead of failing.
    ///
    /// Returns whether the file was written. Used after a request has
    /// already produced its plan, where a failed write must not hide it.
    pub fn save_or_warn(&self, path: &Path) -> bool {
        match self.save(path) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to save session file");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DietType, MealOrigin, RecommendedMeal};

    fn rec(name: &str) -> Recommendation {
        Recommendation {
            diet: DietType::Vegan,
            meals: vec![RecommendedMeal {
                rank: 1,
                name: name.to_string(),
                origin: MealOrigin::Kept,
            }],
        }
    }

    #[test]
    fn replace_mode_keeps_latest_only() {
        let mut history = SessionHistory::default();
        history.record(rec("Lentil Soup"));
        history.record(rec("Tofu Stir Fry"));
        assert_eq!(history.entries().len(), 1);
        assert_eq!(history.latest().unwrap().names(), vec!["Tofu Stir Fry"]);
    }

    #[test]
    fn append_mode_keeps_insertion_order() {
        let mut history = SessionHistory::new(HistoryMode::Append);
        history.record(rec("Lentil Soup"));
        history.record(rec("Tofu Stir Fry"));
        let names: Vec<_> = history.entries().iter().map(|r| r.meals[0].name.as_str()).collect();
        assert_eq!(names, vec!["Lentil Soup", "Tofu Stir Fry"]);
    }

    #[test]
    fn clear_empties_history() {
        let mut history = SessionHistory::default();
        history.record(rec("Lentil Soup"));
        history.clear();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
    }
}
