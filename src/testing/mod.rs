//! Stubs for exercising streams, classifiers and tasks in tests.

mod dummies;
mod stubs;

pub use dummies::{OracleClassifier, TrainSpyClassifier, TrainSpyHandle};
pub use stubs::VecStream;
