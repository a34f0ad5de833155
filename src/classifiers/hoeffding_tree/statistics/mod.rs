mod class_stats;
mod feature_stat;

pub use class_stats::ClassStats;
pub use feature_stat::FeatureStat;
