use crate::classifiers::forest::aggregators::Aggregator;

/// Most confident positive vote wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxAggregator;

impl MaxAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl Aggregator for MaxAggregator {
    fn aggregate(&self, probabilities: &[f64]) -> f64 {
        probabilities
            .iter()
            .copied()
            .reduce(f64::max)
            .map_or(0.5, |p| p.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_uninformative() {
        assert_eq!(MaxAggregator.aggregate(&[]), 0.5);
    }

    #[test]
    fn picks_largest() {
        assert_eq!(MaxAggregator::new().aggregate(&[0.1, 0.8, 0.3]), 0.8);
        assert_eq!(MaxAggregator.aggregate(&[0.0]), 0.0);
    }
}
