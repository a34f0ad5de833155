use crate::classifiers::hoeffding_tree::instance_conditional_test::NumericAttributeBinaryTest;
use crate::classifiers::hoeffding_tree::nodes::{LeafNode, LeafUpdate, NodeBudget, SplitNode};
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::config::TreeConfig;

/// Result of routing one training sample through a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    /// The reached leaf absorbed the sample.
    Learned,
    /// The reached leaf turned into a split node with two fresh leaves.
    Split {
        attribute_index: usize,
        threshold: f64,
        depth: usize,
    },
    /// The reached leaf detected drift and forgot its statistics.
    DriftReset { depth: usize },
}

/// Everything a leaf needs to decide whether, and how, to grow.
pub struct GrowthContext<'a> {
    pub config: &'a TreeConfig,
    pub features: &'a [usize],
    pub criterion: &'a dyn SplitCriterion,
    pub budget: &'a mut NodeBudget,
}

#[derive(Debug, Clone)]
pub enum Node {
    Leaf(LeafNode),
    Split(SplitNode),
}

impl Node {
    pub fn new_leaf(depth: usize, bootstrap: &[f64], features: &[usize], config: &TreeConfig) -> Self {
        Node::Leaf(LeafNode::new(
            depth,
            bootstrap,
            features,
            config.new_drift_detector(),
        ))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.depth(),
            Node::Split(split) => split.depth(),
        }
    }

    /// `None` for leaves.
    pub fn choose_child(&self, fv: &[f64]) -> Option<&Node> {
        match self {
            Node::Leaf(_) => None,
            Node::Split(split) => Some(split.choose_child(fv)),
        }
    }

    pub fn filter_to_leaf(&self, fv: &[f64]) -> &LeafNode {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf,
                Node::Split(split) => node = split.choose_child(fv),
            }
        }
    }

    /// Positive-class probability of this leaf.
    ///
    /// # Panics
    ///
    /// Split nodes hold no prediction; callers descend with
    /// [`filter_to_leaf`](Self::filter_to_leaf) first.
    pub fn predict(&self) -> f64 {
        match self {
            Node::Leaf(leaf) => leaf.probability(),
            Node::Split(_) => panic!("predict called on a split node"),
        }
    }

    pub fn update(&mut self, fv: &[f64], label: bool, ctx: &mut GrowthContext<'_>) -> UpdateOutcome {
        let (depth, suggestion) = match self {
            Node::Split(split) => return split.choose_child_mut(fv).update(fv, label, ctx),
            Node::Leaf(leaf) => {
                let growth_allowed = ctx.budget.has_room(2);
                match leaf.learn_from_sample(fv, label, ctx.config, ctx.criterion, growth_allowed) {
                    LeafUpdate::Learned => return UpdateOutcome::Learned,
                    LeafUpdate::DriftReset => {
                        return UpdateOutcome::DriftReset {
                            depth: leaf.depth(),
                        };
                    }
                    LeafUpdate::SplitApproved(suggestion) => (leaf.depth(), suggestion),
                }
            }
        };

        let attribute_index = suggestion.get_attribute_index();
        let threshold = suggestion.get_threshold();

        // both children start from the sample that triggered the split
        ctx.budget.reserve(2);
        *self = Node::Split(SplitNode::new(
            depth,
            NumericAttributeBinaryTest::new(attribute_index, threshold),
            Node::new_leaf(depth + 1, fv, ctx.features, ctx.config),
            Node::new_leaf(depth + 1, fv, ctx.features, ctx.config),
        ));

        UpdateOutcome::Split {
            attribute_index,
            threshold,
            depth,
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Split(split) => 1 + split.left().node_count() + split.right().node_count(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Split(split) => split.left().leaf_count() + split.right().leaf_count(),
        }
    }

    /// Depth of the deepest leaf below (and including) this node.
    pub fn max_leaf_depth(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.depth(),
            Node::Split(split) => split
                .left()
                .max_leaf_depth()
                .max(split.right().max_leaf_depth()),
        }
    }
}
