mod classifiers;

pub use classifiers::{OracleClassifier, TrainSpyClassifier, TrainSpyHandle};
