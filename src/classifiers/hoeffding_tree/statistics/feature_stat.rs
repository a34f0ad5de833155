use crate::classifiers::hoeffding_tree::split_criteria::{GiniSplitCriterion, SplitCriterion};
use crate::classifiers::hoeffding_tree::statistics::ClassStats;

/// Label counts either side of a threshold fixed when the owning leaf was
/// created. Values `<= threshold` count towards the left side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureStat {
    threshold: f64,
    left: ClassStats,
    right: ClassStats,
}

impl FeatureStat {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            left: ClassStats::default(),
            right: ClassStats::default(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn left(&self) -> &ClassStats {
        &self.left
    }

    pub fn right(&self) -> &ClassStats {
        &self.right
    }

    #[inline]
    pub fn update(&mut self, value: f64, label: bool) {
        if value <= self.threshold {
            self.left.update(label);
        } else {
            self.right.update(label);
        }
    }

    /// Gini impurity reduction obtained by splitting `parent` at this
    /// feature's threshold.
    pub fn gini_gain(&self, parent: &ClassStats) -> f64 {
        GiniSplitCriterion.get_merit_of_split(parent, &[self.left, self.right])
    }
}
