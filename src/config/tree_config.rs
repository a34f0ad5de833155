use crate::drift::{DEFAULT_MAX_WINDOW, DEFAULT_MIN_WINDOW, DriftDetector};
use serde::{Deserialize, Serialize};

/// Immutable per-tree growth parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub max_depth: usize,
    /// `None` lets the tree grow until `max_depth` stops it.
    pub max_nodes: Option<usize>,
    pub hoeffding_split_delta: f64,
    pub min_samples_per_leaf: u64,
    pub tie_threshold: Option<f64>,
    pub use_drift_detection: bool,
    pub drift_alpha: f64,
    pub drift_min_window: usize,
    pub drift_max_window: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            max_nodes: None,
            hoeffding_split_delta: 1e-3,
            min_samples_per_leaf: 20,
            tie_threshold: None,
            use_drift_detection: false,
            drift_alpha: 0.002,
            drift_min_window: DEFAULT_MIN_WINDOW,
            drift_max_window: DEFAULT_MAX_WINDOW,
        }
    }
}

impl TreeConfig {
    /// Detector attached to every new leaf, if drift detection is enabled.
    pub fn new_drift_detector(&self) -> Option<DriftDetector> {
        self.use_drift_detection.then(|| {
            DriftDetector::with_window(
                self.drift_alpha,
                self.drift_min_window,
                self.drift_max_window,
            )
        })
    }
}
