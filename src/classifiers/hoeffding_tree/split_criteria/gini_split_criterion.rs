use crate::classifiers::hoeffding_tree::split_criteria::split_criterion::SplitCriterion;
use crate::classifiers::hoeffding_tree::statistics::ClassStats;

#[derive(Debug, Default, Clone, Copy)]
pub struct GiniSplitCriterion;

impl GiniSplitCriterion {
    pub fn new() -> Self {
        Self
    }

    /// `1 - p² - (1-p)²`, zero for an empty distribution.
    pub fn compute_gini(&self, stats: &ClassStats) -> f64 {
        let total = stats.total();
        if total == 0 {
            return 0.0;
        }
        let p = stats.pos as f64 / total as f64;
        1.0 - p * p - (1.0 - p) * (1.0 - p)
    }
}

impl SplitCriterion for GiniSplitCriterion {
    fn get_range_of_merit(&self, _pre_split: &ClassStats) -> f64 {
        1.0
    }

    fn get_merit_of_split(&self, pre_split: &ClassStats, post_split: &[ClassStats]) -> f64 {
        let weight: u64 = post_split.iter().map(ClassStats::total).sum();
        let parent = self.compute_gini(pre_split);
        if weight == 0 {
            return parent;
        }
        let children: f64 = post_split
            .iter()
            .map(|s| s.total() as f64 / weight as f64 * self.compute_gini(s))
            .sum();
        parent - children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn gini_of_empty_is_zero() {
        assert_eq!(GiniSplitCriterion.compute_gini(&ClassStats::default()), 0.0);
    }

    #[test]
    fn gini_is_maximal_for_balanced_classes() {
        let g = GiniSplitCriterion::new();
        assert!((g.compute_gini(&ClassStats::new(4, 4)) - 0.5).abs() < EPS);
        assert!(g.compute_gini(&ClassStats::new(1, 3)) < 0.5);
        assert_eq!(g.compute_gini(&ClassStats::new(7, 0)), 0.0);
    }

    #[test]
    fn merit_weights_children_by_count() {
        let g = GiniSplitCriterion::new();
        let parent = ClassStats::new(3, 3);
        let left = ClassStats::new(0, 2);
        let right = ClassStats::new(3, 1);
        // 0.5 - (2/6 * 0 + 4/6 * 0.375)
        let expected = 0.5 - 4.0 / 6.0 * 0.375;
        assert!((g.get_merit_of_split(&parent, &[left, right]) - expected).abs() < EPS);
        assert_eq!(g.get_range_of_merit(&parent), 1.0);
    }
}
