use std::fmt::Debug;

/// Reduces per-tree positive-class probabilities to one probability.
///
/// Implementations return `0.5` for an empty slice and always stay
/// within `[0, 1]`.
pub trait Aggregator: Debug + Send + Sync {
    fn aggregate(&self, probabilities: &[f64]) -> f64;
}
