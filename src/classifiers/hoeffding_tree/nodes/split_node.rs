use crate::classifiers::hoeffding_tree::instance_conditional_test::{
    Branch, InstanceConditionalTest, NumericAttributeBinaryTest,
};
use crate::classifiers::hoeffding_tree::nodes::Node;

/// Internal node routing samples by a numeric threshold test.
#[derive(Debug, Clone)]
pub struct SplitNode {
    depth: usize,
    split_test: NumericAttributeBinaryTest,
    left: Box<Node>,
    right: Box<Node>,
}

impl SplitNode {
    pub fn new(depth: usize, split_test: NumericAttributeBinaryTest, left: Node, right: Node) -> Self {
        Self {
            depth,
            split_test,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn split_test(&self) -> &NumericAttributeBinaryTest {
        &self.split_test
    }

    pub fn left(&self) -> &Node {
        &self.left
    }

    pub fn right(&self) -> &Node {
        &self.right
    }

    #[inline]
    pub fn choose_child(&self, fv: &[f64]) -> &Node {
        match self.split_test.branch_for_instance(fv) {
            Branch::Left => &self.left,
            Branch::Right => &self.right,
        }
    }

    #[inline]
    pub fn choose_child_mut(&mut self, fv: &[f64]) -> &mut Node {
        match self.split_test.branch_for_instance(fv) {
            Branch::Left => &mut self.left,
            Branch::Right => &mut self.right,
        }
    }
}
