use crate::classifiers::hoeffding_tree::statistics::ClassStats;
use std::fmt::Debug;

pub trait SplitCriterion: Debug + Send + Sync {
    /// Numeric range `R` of the merit, used by the Hoeffding bound.
    fn get_range_of_merit(&self, pre_split: &ClassStats) -> f64;

    fn get_merit_of_split(&self, pre_split: &ClassStats, post_split: &[ClassStats]) -> f64;
}
