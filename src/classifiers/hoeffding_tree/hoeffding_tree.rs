use crate::classifiers::Classifier;
use crate::classifiers::hoeffding_tree::nodes::{GrowthContext, Node, NodeBudget, UpdateOutcome};
use crate::classifiers::hoeffding_tree::split_criteria::{GiniSplitCriterion, SplitCriterion};
use crate::config::TreeConfig;
use tracing::{debug, info, trace};

/// Incrementally grown binary decision tree.
///
/// The root leaf is created from the first training sample; every leaf
/// fixes one candidate threshold per feature from the sample it was created
/// with and splits once the Hoeffding bound separates the best candidate
/// from the runner-up (or from not splitting at all).
#[derive(Debug)]
pub struct HoeffdingTree {
    root: Option<Node>,
    config: TreeConfig,
    num_features: usize,
    features: Vec<usize>,
    split_criterion: Box<dyn SplitCriterion>,
    budget: NodeBudget,
    samples_seen: u64,
    split_count: u64,
    drift_reset_count: u64,
}

impl HoeffdingTree {
    /// Tree considering every feature as a split candidate.
    pub fn new(config: TreeConfig, num_features: usize) -> Self {
        Self::with_features(config, num_features, (0..num_features).collect())
    }

    /// Tree restricted to a subset of the feature indices.
    pub fn with_features(config: TreeConfig, num_features: usize, mut features: Vec<usize>) -> Self {
        features.sort_unstable();
        features.dedup();
        debug_assert!(features.iter().all(|&i| i < num_features));
        let budget = NodeBudget::new(config.max_nodes);
        Self {
            root: None,
            config,
            num_features,
            features,
            split_criterion: Box::new(GiniSplitCriterion::new()),
            budget,
            samples_seen: 0,
            split_count: 0,
            drift_reset_count: 0,
        }
    }

    pub fn with_split_criterion(mut self, criterion: Box<dyn SplitCriterion>) -> Self {
        self.split_criterion = criterion;
        self
    }

    #[inline]
    fn check_width(&self, fv: &[f64]) {
        assert_eq!(
            fv.len(),
            self.num_features,
            "feature vector has {} values, tree expects {}",
            fv.len(),
            self.num_features
        );
    }

    /// Positive-class probability, `0.5` before the first update.
    ///
    /// # Panics
    ///
    /// If `fv.len()` differs from the configured number of features.
    pub fn predict(&self, fv: &[f64]) -> f64 {
        self.check_width(fv);
        match &self.root {
            Some(root) => root.filter_to_leaf(fv).probability(),
            None => 0.5,
        }
    }

    /// Routes one labelled sample to its leaf and lets that leaf learn,
    /// reset on drift, or split.
    ///
    /// # Panics
    ///
    /// If `fv.len()` differs from the configured number of features.
    pub fn update(&mut self, fv: &[f64], label: bool) -> UpdateOutcome {
        self.check_width(fv);

        if self.root.is_none() {
            self.budget.reserve(1);
            trace!("bootstrapping root leaf");
        }
        let root = self
            .root
            .get_or_insert_with(|| Node::new_leaf(0, fv, &self.features, &self.config));

        let mut ctx = GrowthContext {
            config: &self.config,
            features: &self.features,
            criterion: self.split_criterion.as_ref(),
            budget: &mut self.budget,
        };
        let outcome = root.update(fv, label, &mut ctx);
        self.samples_seen += 1;

        match outcome {
            UpdateOutcome::Split {
                attribute_index,
                threshold,
                depth,
            } => {
                self.split_count += 1;
                debug!(
                    attribute_index,
                    threshold,
                    depth,
                    nodes = self.budget.used(),
                    "leaf split"
                );
            }
            UpdateOutcome::DriftReset { depth } => {
                self.drift_reset_count += 1;
                info!(depth, samples_seen = self.samples_seen, "drift detected, leaf reset");
            }
            UpdateOutcome::Learned => {}
        }
        outcome
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Feature indices this tree may split on, ascending.
    pub fn features(&self) -> &[usize] {
        &self.features
    }

    pub fn node_count(&self) -> usize {
        self.budget.used()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::leaf_count)
    }

    /// Depth of the deepest leaf; `0` for a single leaf or an empty tree.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, Node::max_leaf_depth)
    }

    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    pub fn split_count(&self) -> u64 {
        self.split_count
    }

    pub fn drift_reset_count(&self) -> u64 {
        self.drift_reset_count
    }
}

impl Classifier for HoeffdingTree {
    fn predict_proba(&self, features: &[f64]) -> f64 {
        self.predict(features)
    }

    fn train_on_sample(&mut self, features: &[f64], label: bool) {
        self.update(features, label);
    }
}
