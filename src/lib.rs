pub mod classifiers;
pub mod config;
pub mod drift;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod streams;
pub mod tasks;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
