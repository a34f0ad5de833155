mod hoeffding_tree;
pub mod instance_conditional_test;
pub mod nodes;
pub mod split_criteria;
pub mod statistics;

pub use hoeffding_tree::HoeffdingTree;
pub use nodes::UpdateOutcome;
