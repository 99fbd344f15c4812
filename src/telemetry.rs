//! Telemetry metric name constants.
//!
//! Centralised metric names for dietplan operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `dietplan_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `diet`: diet type of the request (e.g. "vegan")
//! - `status`: outcome: "ok" or "error"
//! - `classifier`: classifier name (e.g. "linear", "onnx")

/// Total recommendation requests handled by the planner.
///
/// Labels: `diet`, `status` ("ok" | "error").
pub const RECOMMENDATIONS_TOTAL: &str = "dietplan_recommendations_total";

/// Total slots whose prediction was swapped for an eligible meal.
///
/// Labels: `diet`.
pub const SUBSTITUTIONS_TOTAL: &str = "dietplan_substitutions_total";

/// Total slots filled with the diet placeholder (empty eligible set).
///
/// Labels: `diet`.
pub const PLACEHOLDERS_TOTAL: &str = "dietplan_placeholders_total";

/// Classifier call duration in seconds (cache misses only).
///
/// Labels: `classifier`.
pub const CLASSIFY_DURATION_SECONDS: &str = "dietplan_classify_duration_seconds";

/// Total prediction cache hits.
pub const CACHE_HITS_TOTAL: &str = "dietplan_cache_hits_total";

/// Total prediction cache misses.
pub const CACHE_MISSES_TOTAL: &str = "dietplan_cache_misses_total";
