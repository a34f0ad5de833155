/// Tracks how many nodes a tree holds against its optional cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeBudget {
    used: usize,
    max: Option<usize>,
}

impl NodeBudget {
    pub fn new(max: Option<usize>) -> Self {
        Self { used: 0, max }
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn has_room(&self, nodes: usize) -> bool {
        self.max.is_none_or(|max| self.used + nodes <= max)
    }

    pub fn reserve(&mut self, nodes: usize) {
        self.used += nodes;
    }
}
