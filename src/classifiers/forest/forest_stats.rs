use crate::classifiers::HoeffdingTree;
use std::fmt;

/// Structural counters of one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub node_count: usize,
    pub leaf_count: usize,
    pub depth: usize,
    pub split_count: u64,
    pub drift_reset_count: u64,
    pub samples_seen: u64,
    pub features: Vec<usize>,
}

impl From<&HoeffdingTree> for TreeStats {
    fn from(tree: &HoeffdingTree) -> Self {
        Self {
            node_count: tree.node_count(),
            leaf_count: tree.leaf_count(),
            depth: tree.depth(),
            split_count: tree.split_count(),
            drift_reset_count: tree.drift_reset_count(),
            samples_seen: tree.samples_seen(),
            features: tree.features().to_vec(),
        }
    }
}

/// Point-in-time view of a forest, taken under its read lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestStats {
    pub samples_seen: u64,
    pub trees: Vec<TreeStats>,
}

impl ForestStats {
    pub fn total_nodes(&self) -> usize {
        self.trees.iter().map(|t| t.node_count).sum()
    }

    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(|t| t.depth).max().unwrap_or(0)
    }

    pub fn total_splits(&self) -> u64 {
        self.trees.iter().map(|t| t.split_count).sum()
    }

    pub fn total_drift_resets(&self) -> u64 {
        self.trees.iter().map(|t| t.drift_reset_count).sum()
    }
}

impl fmt::Display for ForestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "samples={} trees={} nodes={} max_depth={} splits={} drift_resets={}",
            self.samples_seen,
            self.trees.len(),
            self.total_nodes(),
            self.max_depth(),
            self.total_splits(),
            self.total_drift_resets()
        )
    }
}
