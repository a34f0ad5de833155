use crate::classifiers::forest::aggregators::Aggregator;

/// Arithmetic mean of the tree probabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAggregator;

impl MeanAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl Aggregator for MeanAggregator {
    fn aggregate(&self, probabilities: &[f64]) -> f64 {
        if probabilities.is_empty() {
            return 0.5;
        }
        let sum: f64 = probabilities.iter().sum();
        (sum / probabilities.len() as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_uninformative() {
        assert_eq!(MeanAggregator.aggregate(&[]), 0.5);
    }

    #[test]
    fn averages() {
        let p = MeanAggregator::new().aggregate(&[0.2, 0.4, 0.9]);
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn stays_in_unit_interval() {
        for probs in [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]] {
            let p = MeanAggregator.aggregate(&probs);
            assert!((0.0..=1.0).contains(&p));
        }
    }
}
