mod aggregator;
mod max_aggregator;
mod mean_aggregator;

pub use aggregator::Aggregator;
pub use max_aggregator::MaxAggregator;
pub use mean_aggregator::MeanAggregator;

use crate::config::AggregatorChoice;

impl From<AggregatorChoice> for Box<dyn Aggregator> {
    fn from(choice: AggregatorChoice) -> Self {
        match choice {
            AggregatorChoice::Mean => Box::new(MeanAggregator),
            AggregatorChoice::Max => Box::new(MaxAggregator),
        }
    }
}
