mod basic_estimator;
mod estimator;
mod window_estimator;

pub use basic_estimator::BasicEstimator;
pub use estimator::Estimator;
pub use window_estimator::{DEFAULT_WINDOW, WindowEstimator};
