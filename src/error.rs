//! Dietplan error types

/// Dietplan error types
#[derive(Debug, thiserror::Error)]
pub enum DietPlanError {
    // Startup asset errors
    /// A classifier, label-decoder or tag-table artifact could not be loaded.
    ///
    /// Fatal to the whole session; never retried.
    #[error("{asset} unavailable: {reason}")]
    AssetUnavailable { asset: String, reason: String },

    // Request contract errors
    #[error("invalid diet type: {0}")]
    InvalidDietType(String),

    #[error("empty prediction: classifier returned no candidates")]
    EmptyPrediction,

    #[error("insufficient classes: requested top {requested} but catalog has {available}")]
    InsufficientClasses { requested: usize, available: usize },

    /// The classifier produced an index the label decoder cannot map.
    #[error("unknown label index {index} (decoder knows {known} classes); model and label encoder may be out of sync")]
    UnknownLabel { index: usize, known: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Inference errors
    #[error("classifier error: {0}")]
    Classifier(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DietPlanError {
    /// Shorthand for an [`AssetUnavailable`](Self::AssetUnavailable) error.
    pub fn asset(asset: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::AssetUnavailable {
            asset: asset.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error ends the session rather than a single request.
    ///
    /// Asset and configuration failures happen at startup and block all
    /// further work; everything else aborts only the current request.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::AssetUnavailable { .. } | Self::Configuration(_)
        )
    }
}

/// Result type alias for Dietplan operations
pub type Result<T> = std::result::Result<T, DietPlanError>;
