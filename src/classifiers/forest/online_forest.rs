use crate::classifiers::forest::aggregators::Aggregator;
use crate::classifiers::forest::{ForestStats, TreeStats};
use crate::classifiers::{Classifier, HoeffdingTree};
use crate::config::PredictorConfig;
use crate::error::ConfigError;
use crate::features::{
    Embedder, IdentityEmbedder, NoOpNormalizer, Normalizer, OnlineStandardNormalizer,
    RawFeatureVector,
};
use crate::utils::math::poisson;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

struct ForestState {
    trees: Vec<HoeffdingTree>,
    normalizer: Box<dyn Normalizer>,
    /// Drives online-bagging replay counts; `None` when bagging is off.
    sampler: Option<StdRng>,
    samples_seen: u64,
}

/// Ensemble of Hoeffding trees behind one reader/writer lock.
///
/// Any number of [`predict`](Self::predict) calls may run concurrently;
/// [`update`](Self::update) excludes every other call while it feeds the
/// sample to each tree in turn.
///
/// A feature vector of the wrong length panics before the lock is taken,
/// so such a call never leaves some trees updated and others not. Any other
/// panic during an update propagates to the caller. The lock is then
/// recovered on the next call and the forest keeps serving with whatever
/// the interrupted update had already applied.
pub struct OnlineForest {
    config: PredictorConfig,
    aggregator: Box<dyn Aggregator>,
    embedder: Box<dyn Embedder>,
    state: RwLock<ForestState>,
}

impl OnlineForest {
    pub fn new(config: PredictorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let num_features = config.num_features;
        let tree_config = config.tree_config();
        let mut subspace_rng = StdRng::seed_from_u64(config.bagging.seed);

        let trees = (0..config.num_trees)
            .map(|_| match config.bagging.features_per_tree {
                Some(k) => HoeffdingTree::with_features(
                    tree_config.clone(),
                    num_features,
                    index::sample(&mut subspace_rng, num_features, k).into_vec(),
                ),
                None => HoeffdingTree::new(tree_config.clone(), num_features),
            })
            .collect();

        let normalizer: Box<dyn Normalizer> = if config.normalizer.enable {
            Box::new(OnlineStandardNormalizer::new(num_features))
        } else {
            Box::new(NoOpNormalizer)
        };

        let sampler = config
            .bagging
            .poisson_lambda
            .map(|_| StdRng::seed_from_u64(config.bagging.seed.wrapping_add(1)));

        info!(
            num_trees = config.num_trees,
            num_features,
            aggregator = %config.aggregator,
            drift_detection = config.use_drift_detection,
            bagging = config.bagging.is_enabled(),
            "online forest created"
        );

        Ok(Self {
            aggregator: config.aggregator.into(),
            embedder: Box::new(IdentityEmbedder),
            state: RwLock::new(ForestState {
                trees,
                normalizer,
                sampler,
                samples_seen: 0,
            }),
            config,
        })
    }

    /// Replaces the aggregator chosen in the configuration.
    pub fn with_aggregator(mut self, aggregator: Box<dyn Aggregator>) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Embedder used by [`predict_raw`](Self::predict_raw) and
    /// [`update_raw`](Self::update_raw).
    pub fn with_embedder(mut self, embedder: Box<dyn Embedder>) -> Self {
        self.embedder = embedder;
        self
    }

    /// Replaces the normalizer chosen in the configuration.
    pub fn with_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .normalizer = normalizer;
        self
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ForestState> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("forest lock poisoned by an interrupted update, recovering");
            poisoned.into_inner()
        })
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ForestState> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("forest lock poisoned by an interrupted update, recovering");
            poisoned.into_inner()
        })
    }

    #[inline]
    fn check_width(&self, fv: &[f64]) {
        assert_eq!(
            fv.len(),
            self.config.num_features,
            "feature vector has {} values, forest expects {}",
            fv.len(),
            self.config.num_features
        );
    }

    /// Aggregated positive-class probability, `0.5` before any update.
    ///
    /// # Panics
    ///
    /// If `fv.len()` differs from `num_features`.
    pub fn predict(&self, fv: &[f64]) -> f64 {
        self.check_width(fv);
        let state = self.read_state();
        let fv = state.normalizer.transform(fv);
        let probabilities: Vec<f64> = state.trees.iter().map(|t| t.predict(&fv)).collect();
        self.aggregator.aggregate(&probabilities)
    }

    /// Trains every tree on one labelled sample.
    ///
    /// # Panics
    ///
    /// If `fv.len()` differs from `num_features`.
    pub fn update(&self, fv: &[f64], label: bool) {
        self.check_width(fv);
        let mut guard = self.write_state();
        let state = &mut *guard;

        state.normalizer.update(fv);
        let fv = state.normalizer.transform(fv);

        for tree in state.trees.iter_mut() {
            let replays = match (self.config.bagging.poisson_lambda, state.sampler.as_mut()) {
                (Some(lambda), Some(rng)) => poisson(rng, lambda),
                _ => 1,
            };
            for _ in 0..replays {
                tree.update(&fv, label);
            }
        }
        state.samples_seen += 1;
    }

    pub fn predict_raw(&self, raw: &RawFeatureVector) -> f64 {
        self.predict(&self.embedder.embed(raw))
    }

    pub fn update_raw(&self, raw: &RawFeatureVector, label: bool) {
        self.update(&self.embedder.embed(raw), label);
    }

    pub fn stats(&self) -> ForestStats {
        let state = self.read_state();
        ForestStats {
            samples_seen: state.samples_seen,
            trees: state.trees.iter().map(TreeStats::from).collect(),
        }
    }

    pub fn samples_seen(&self) -> u64 {
        self.read_state().samples_seen
    }

    pub fn num_trees(&self) -> usize {
        self.config.num_trees
    }

    pub fn num_features(&self) -> usize {
        self.config.num_features
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }
}

impl fmt::Debug for OnlineForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnlineForest")
            .field("num_trees", &self.config.num_trees)
            .field("num_features", &self.config.num_features)
            .field("aggregator", &self.aggregator)
            .finish_non_exhaustive()
    }
}

impl Classifier for OnlineForest {
    fn predict_proba(&self, features: &[f64]) -> f64 {
        self.predict(features)
    }

    fn train_on_sample(&mut self, features: &[f64], label: bool) {
        self.update(features, label);
    }
}
