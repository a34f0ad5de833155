mod choices;
mod predictor_config;
mod tree_config;

pub use choices::{AggregatorChoice, BaggingConfig, NormalizerConfig};
pub use predictor_config::PredictorConfig;
pub use tree_config::TreeConfig;
