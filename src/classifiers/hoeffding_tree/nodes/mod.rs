mod leaf_node;
mod node;
mod node_budget;
mod split_node;

pub use leaf_node::LeafNode;
pub(crate) use leaf_node::LeafUpdate;
pub use node::{GrowthContext, Node, UpdateOutcome};
pub use node_budget::NodeBudget;
pub use split_node::SplitNode;
