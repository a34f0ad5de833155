mod adwin;

pub use adwin::{DEFAULT_MAX_WINDOW, DEFAULT_MIN_WINDOW, DriftDetector};
