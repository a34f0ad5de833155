pub mod aggregators;
mod forest_stats;
mod online_forest;

pub use aggregators::{Aggregator, MaxAggregator, MeanAggregator};
pub use forest_stats::{ForestStats, TreeStats};
pub use online_forest::OnlineForest;
