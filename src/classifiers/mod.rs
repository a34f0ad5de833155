pub mod classifier;
pub mod conditional_tests;
pub mod forest;
pub mod hoeffding_tree;

pub use classifier::Classifier;
pub use forest::{ForestStats, OnlineForest};
pub use hoeffding_tree::{HoeffdingTree, UpdateOutcome};
