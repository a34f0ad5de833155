use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Strategy used to combine per-tree probabilities.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AggregatorChoice {
    /// Arithmetic mean of the tree probabilities.
    #[default]
    Mean,
    /// Largest tree probability.
    Max,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NormalizerConfig {
    /// Scale every feature by its running mean and standard deviation.
    #[serde(default)]
    #[schemars(title = "Enable normalization")]
    pub enable: bool,
}

fn default_bagging_seed() -> u64 {
    1
}

/// Per-tree diversity. With both knobs unset every tree sees every sample
/// and every feature, and the forest only averages out leaf noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BaggingConfig {
    /// Online bagging: each tree trains on each sample `k ~ Poisson(lambda)` times.
    #[serde(default)]
    #[schemars(title = "Poisson lambda")]
    pub poisson_lambda: Option<f64>,

    /// Size of the random feature subset each tree may split on.
    #[serde(default)]
    #[schemars(title = "Features per tree")]
    pub features_per_tree: Option<usize>,

    #[serde(default = "default_bagging_seed")]
    #[schemars(title = "Random seed")]
    pub seed: u64,
}

impl Default for BaggingConfig {
    fn default() -> Self {
        Self {
            poisson_lambda: None,
            features_per_tree: None,
            seed: default_bagging_seed(),
        }
    }
}

impl BaggingConfig {
    pub fn is_enabled(&self) -> bool {
        self.poisson_lambda.is_some() || self.features_per_tree.is_some()
    }
}
