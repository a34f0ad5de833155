use crate::config::{AggregatorChoice, BaggingConfig, NormalizerConfig, TreeConfig};
use crate::drift::{DEFAULT_MAX_WINDOW, DEFAULT_MIN_WINDOW};
use crate::error::ConfigError;
use crate::utils::math::MAX_POISSON_LAMBDA;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_num_trees() -> usize {
    20
}
fn default_max_depth() -> usize {
    10
}
fn default_max_nodes_per_tree() -> Option<usize> {
    Some(500)
}
fn default_hoeffding_split_delta() -> f64 {
    1e-3
}
fn default_min_samples_per_leaf() -> u64 {
    20
}
fn default_drift_alpha() -> f64 {
    0.002
}
fn default_drift_min_window() -> usize {
    DEFAULT_MIN_WINDOW
}
fn default_drift_max_window() -> usize {
    DEFAULT_MAX_WINDOW
}

/// Configuration of an [`OnlineForest`](crate::classifiers::OnlineForest)
/// and its feature pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictorConfig {
    #[serde(default = "default_num_trees")]
    #[schemars(
        title = "Number of trees",
        description = "Size of the forest."
    )]
    pub num_trees: usize,

    #[schemars(
        title = "Number of features",
        description = "Length of every feature vector passed to predict/update."
    )]
    pub num_features: usize,

    #[serde(default = "default_max_depth")]
    #[schemars(
        title = "Maximum depth",
        description = "Leaves at this depth never split."
    )]
    pub max_depth: usize,

    #[serde(default = "default_max_nodes_per_tree")]
    #[schemars(
        title = "Maximum nodes per tree",
        description = "Splits that would exceed this many nodes are declined. Null means unbounded."
    )]
    pub max_nodes_per_tree: Option<usize>,

    #[serde(default = "default_hoeffding_split_delta")]
    #[schemars(
        title = "Hoeffding split delta",
        description = "Allowed probability of choosing the wrong split. Smaller is more conservative."
    )]
    pub hoeffding_split_delta: f64,

    #[serde(default = "default_min_samples_per_leaf")]
    #[schemars(
        title = "Minimum samples per leaf",
        description = "Samples a leaf must observe before it may split."
    )]
    pub min_samples_per_leaf: u64,

    #[serde(default)]
    #[schemars(
        title = "Tie threshold",
        description = "Split anyway once the Hoeffding bound drops below this value."
    )]
    pub tie_threshold: Option<f64>,

    #[serde(default)]
    #[schemars(
        title = "Use drift detection",
        description = "Attach an adaptive-windowing detector to every leaf and reset it on drift."
    )]
    pub use_drift_detection: bool,

    #[serde(default = "default_drift_alpha")]
    #[schemars(
        title = "Drift alpha",
        description = "Significance level of the drift detector. Smaller is harder to trigger."
    )]
    pub drift_alpha: f64,

    #[serde(default = "default_drift_min_window")]
    #[schemars(title = "Drift minimum window")]
    pub drift_min_window: usize,

    #[serde(default = "default_drift_max_window")]
    #[schemars(title = "Drift maximum window")]
    pub drift_max_window: usize,

    #[serde(default)]
    #[schemars(title = "Aggregator")]
    pub aggregator: AggregatorChoice,

    #[serde(default)]
    #[schemars(title = "Normalizer")]
    pub normalizer: NormalizerConfig,

    #[serde(default)]
    #[schemars(title = "Bagging")]
    pub bagging: BaggingConfig,
}

impl PredictorConfig {
    /// Defaults for everything except the vector length.
    pub fn new(num_features: usize) -> Self {
        Self {
            num_trees: default_num_trees(),
            num_features,
            max_depth: default_max_depth(),
            max_nodes_per_tree: default_max_nodes_per_tree(),
            hoeffding_split_delta: default_hoeffding_split_delta(),
            min_samples_per_leaf: default_min_samples_per_leaf(),
            tie_threshold: None,
            use_drift_detection: false,
            drift_alpha: default_drift_alpha(),
            drift_min_window: default_drift_min_window(),
            drift_max_window: default_drift_max_window(),
            aggregator: AggregatorChoice::default(),
            normalizer: NormalizerConfig::default(),
            bagging: BaggingConfig::default(),
        }
    }

    pub fn tree_config(&self) -> TreeConfig {
        TreeConfig {
            max_depth: self.max_depth,
            max_nodes: self.max_nodes_per_tree,
            hoeffding_split_delta: self.hoeffding_split_delta,
            min_samples_per_leaf: self.min_samples_per_leaf,
            tie_threshold: self.tie_threshold,
            use_drift_detection: self.use_drift_detection,
            drift_alpha: self.drift_alpha,
            drift_min_window: self.drift_min_window,
            drift_max_window: self.drift_max_window,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_trees == 0 {
            return Err(ConfigError::invalid("num_trees", "must be > 0"));
        }
        if self.num_features == 0 {
            return Err(ConfigError::invalid("num_features", "must be > 0"));
        }
        if !(self.hoeffding_split_delta > 0.0 && self.hoeffding_split_delta < 1.0) {
            return Err(ConfigError::invalid(
                "hoeffding_split_delta",
                format!("must be in (0, 1), got {}", self.hoeffding_split_delta),
            ));
        }
        if self.min_samples_per_leaf == 0 {
            return Err(ConfigError::invalid("min_samples_per_leaf", "must be > 0"));
        }
        if let Some(max_nodes) = self.max_nodes_per_tree {
            if max_nodes == 0 {
                return Err(ConfigError::invalid("max_nodes_per_tree", "must be > 0"));
            }
        }
        if let Some(tau) = self.tie_threshold {
            if !(tau >= 0.0 && tau.is_finite()) {
                return Err(ConfigError::invalid(
                    "tie_threshold",
                    format!("must be a finite value >= 0, got {tau}"),
                ));
            }
        }
        if !(self.drift_alpha > 0.0 && self.drift_alpha < 1.0) {
            return Err(ConfigError::invalid(
                "drift_alpha",
                format!("must be in (0, 1), got {}", self.drift_alpha),
            ));
        }
        if self.drift_min_window == 0 {
            return Err(ConfigError::invalid("drift_min_window", "must be > 0"));
        }
        if self.drift_max_window < self.drift_min_window.saturating_mul(2) {
            return Err(ConfigError::invalid(
                "drift_max_window",
                format!(
                    "must be at least twice drift_min_window ({})",
                    self.drift_min_window
                ),
            ));
        }
        if let Some(lambda) = self.bagging.poisson_lambda {
            if !(lambda > 0.0 && lambda <= MAX_POISSON_LAMBDA) {
                return Err(ConfigError::invalid(
                    "bagging.poisson_lambda",
                    format!("must be in (0, {MAX_POISSON_LAMBDA}], got {lambda}"),
                ));
            }
        }
        if let Some(k) = self.bagging.features_per_tree {
            if k == 0 || k > self.num_features {
                return Err(ConfigError::invalid(
                    "bagging.features_per_tree",
                    format!("must be in [1, {}], got {k}", self.num_features),
                ));
            }
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn json_schema() -> Schema {
        schema_for!(PredictorConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let cfg = PredictorConfig::new(4);
        cfg.validate().unwrap();
        assert_eq!(cfg.num_trees, 20);
        assert_eq!(cfg.max_nodes_per_tree, Some(500));
        assert_eq!(cfg.aggregator, AggregatorChoice::Mean);
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let cfg = PredictorConfig::from_json_str(r#"{ "num_features": 3 }"#).unwrap();
        assert_eq!(cfg, PredictorConfig::new(3));
    }

    #[test]
    fn json_round_trip_preserves_every_field() {
        let mut cfg = PredictorConfig::new(5);
        cfg.num_trees = 3;
        cfg.max_nodes_per_tree = None;
        cfg.use_drift_detection = true;
        cfg.aggregator = AggregatorChoice::Max;
        cfg.normalizer.enable = true;
        cfg.bagging.poisson_lambda = Some(1.0);
        cfg.bagging.features_per_tree = Some(2);

        let json = cfg.to_json_pretty().unwrap();
        assert!(json.contains("\"aggregator\": \"max\""));
        assert_eq!(PredictorConfig::from_json_str(&json).unwrap(), cfg);
    }

    #[test]
    fn missing_num_features_is_a_json_error() {
        let err = PredictorConfig::from_json_str("{}").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn invalid_values_name_the_offending_parameter() {
        let cases: Vec<(&str, Box<dyn Fn(&mut PredictorConfig)>)> = vec![
            ("num_trees", Box::new(|c| c.num_trees = 0)),
            ("num_features", Box::new(|c| c.num_features = 0)),
            ("hoeffding_split_delta", Box::new(|c| c.hoeffding_split_delta = 0.0)),
            ("hoeffding_split_delta", Box::new(|c| c.hoeffding_split_delta = 1.5)),
            ("min_samples_per_leaf", Box::new(|c| c.min_samples_per_leaf = 0)),
            ("max_nodes_per_tree", Box::new(|c| c.max_nodes_per_tree = Some(0))),
            ("tie_threshold", Box::new(|c| c.tie_threshold = Some(-0.1))),
            ("drift_alpha", Box::new(|c| c.drift_alpha = 1.0)),
            ("drift_min_window", Box::new(|c| c.drift_min_window = 0)),
            ("drift_max_window", Box::new(|c| c.drift_max_window = 15)),
            ("bagging.poisson_lambda", Box::new(|c| c.bagging.poisson_lambda = Some(0.0))),
            ("bagging.poisson_lambda", Box::new(|c| c.bagging.poisson_lambda = Some(1_000.0))),
            ("bagging.poisson_lambda", Box::new(|c| c.bagging.poisson_lambda = Some(f64::NAN))),
            ("bagging.features_per_tree", Box::new(|c| c.bagging.features_per_tree = Some(9))),
        ];

        for (expected, mutate) in cases {
            let mut cfg = PredictorConfig::new(4);
            mutate(&mut cfg);
            match cfg.validate() {
                Err(ConfigError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("{expected}: expected InvalidParameter, got {other:?}"),
            }
        }
    }

    #[test]
    fn huge_drift_min_window_is_rejected_not_overflowed() {
        let json = format!(r#"{{ "num_features": 2, "drift_min_window": {} }}"#, usize::MAX);
        match PredictorConfig::from_json_str(&json) {
            Err(ConfigError::InvalidParameter { name, .. }) => assert_eq!(name, "drift_max_window"),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn loads_from_file() {
        let mut tf = NamedTempFile::new().unwrap();
        write!(tf, r#"{{ "num_features": 2, "num_trees": 7 }}"#).unwrap();
        let cfg = PredictorConfig::from_json_file(tf.path()).unwrap();
        assert_eq!(cfg.num_trees, 7);

        let err = PredictorConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn schema_documents_fields() {
        let schema = serde_json::to_value(PredictorConfig::json_schema()).unwrap();
        let props = schema["properties"].as_object().unwrap();
        assert!(props.contains_key("num_trees"));
        assert!(props.contains_key("hoeffding_split_delta"));
        assert_eq!(props["num_trees"]["title"], "Number of trees");
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "num_features"));
    }
}
