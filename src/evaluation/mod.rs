mod estimators;
mod evaluators;
mod measurement;
mod preview;

pub use estimators::{BasicEstimator, DEFAULT_WINDOW, Estimator, WindowEstimator};
pub use evaluators::{BinaryClassificationEvaluator, PerformanceEvaluator, PerformanceEvaluatorExt};
pub use measurement::Measurement;
pub use preview::{CurveFormat, LearningCurve, Snapshot};
