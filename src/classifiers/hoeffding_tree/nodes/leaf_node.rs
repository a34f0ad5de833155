use crate::classifiers::conditional_tests::{AttributeSplitSuggestion, SplitCandidates};
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::classifiers::hoeffding_tree::statistics::{ClassStats, FeatureStat};
use crate::config::TreeConfig;
use crate::drift::DriftDetector;
use crate::utils::math::hoeffding_bound;
use std::collections::BTreeMap;

/// What a leaf did with one training sample.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LeafUpdate {
    Learned,
    DriftReset,
    SplitApproved(AttributeSplitSuggestion),
}

/// Learning leaf: class counts, one threshold counter per candidate
/// feature and an optional drift detector.
#[derive(Debug, Clone)]
pub struct LeafNode {
    depth: usize,
    stats: ClassStats,
    feature_stats: BTreeMap<usize, FeatureStat>,
    drift_detector: Option<DriftDetector>,
}

impl LeafNode {
    /// Creates a leaf whose per-feature thresholds are the values of
    /// `bootstrap` at each index in `features`.
    pub fn new(
        depth: usize,
        bootstrap: &[f64],
        features: &[usize],
        drift_detector: Option<DriftDetector>,
    ) -> Self {
        Self {
            depth,
            stats: ClassStats::default(),
            feature_stats: features
                .iter()
                .map(|&i| (i, FeatureStat::new(bootstrap[i])))
                .collect(),
            drift_detector,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn stats(&self) -> &ClassStats {
        &self.stats
    }

    pub fn feature_stats(&self) -> &BTreeMap<usize, FeatureStat> {
        &self.feature_stats
    }

    pub fn drift_detector(&self) -> Option<&DriftDetector> {
        self.drift_detector.as_ref()
    }

    pub fn probability(&self) -> f64 {
        self.stats.probability()
    }

    pub(crate) fn learn_from_sample(
        &mut self,
        fv: &[f64],
        label: bool,
        config: &TreeConfig,
        criterion: &dyn SplitCriterion,
        growth_allowed: bool,
    ) -> LeafUpdate {
        self.stats.update(label);

        if let Some(detector) = self.drift_detector.as_mut() {
            if detector.add(label) {
                self.reset_from(fv);
                return LeafUpdate::DriftReset;
            }
        }

        for (&i, fs) in self.feature_stats.iter_mut() {
            fs.update(fv[i], label);
        }

        if !growth_allowed
            || self.stats.total() < config.min_samples_per_leaf
            || self.depth >= config.max_depth
        {
            return LeafUpdate::Learned;
        }

        match self.attempt_split(config, criterion) {
            Some(suggestion) => LeafUpdate::SplitApproved(suggestion),
            None => LeafUpdate::Learned,
        }
    }

    /// Forgets everything learned so far and re-derives thresholds from `fv`,
    /// as if the leaf had just been created from it. The detector has
    /// already reset itself.
    fn reset_from(&mut self, fv: &[f64]) {
        self.stats.clear();
        for (&i, fs) in self.feature_stats.iter_mut() {
            *fs = FeatureStat::new(fv[i]);
        }
    }

    pub fn get_best_split_suggestions(&self, criterion: &dyn SplitCriterion) -> SplitCandidates {
        self.feature_stats
            .iter()
            .map(|(&i, fs)| {
                let merit = criterion.get_merit_of_split(&self.stats, &[*fs.left(), *fs.right()]);
                AttributeSplitSuggestion::new(i, fs.threshold(), merit)
            })
            .collect()
    }

    fn attempt_split(
        &self,
        config: &TreeConfig,
        criterion: &dyn SplitCriterion,
    ) -> Option<AttributeSplitSuggestion> {
        let candidates = self.get_best_split_suggestions(criterion);
        let best = *candidates.best()?;
        let gap = candidates.merit_gap()?;

        let bound = hoeffding_bound(
            criterion.get_range_of_merit(&self.stats),
            config.hoeffding_split_delta,
            self.stats.total() as f64,
        );
        let tie_broken = config
            .tie_threshold
            .is_some_and(|tau| bound < tau && best.get_merit() > 0.0);

        (gap > bound || tie_broken).then_some(best)
    }
}
