use crate::features::FeatureVector;

/// Online normalization of feature vectors.
///
/// `update` folds a training sample into the running statistics and
/// `transform` applies the current normalization. Side effects are confined
/// to the normalizer's own state; `transform` must be safe to call from
/// concurrent readers.
pub trait Normalizer: Send + Sync {
    fn update(&mut self, fv: &[f64]);
    fn transform(&self, fv: &[f64]) -> FeatureVector;
}

/// Leaves features unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNormalizer;

impl Normalizer for NoOpNormalizer {
    fn update(&mut self, _fv: &[f64]) {}

    fn transform(&self, fv: &[f64]) -> FeatureVector {
        fv.to_vec()
    }
}

const MIN_STD_DEV: f64 = 1e-9;

/// Per-feature running mean/variance scaling (Welford).
///
/// Features are returned unchanged until two samples have been seen.
#[derive(Debug, Clone)]
pub struct OnlineStandardNormalizer {
    count: u64,
    mean: Vec<f64>,
    m2: Vec<f64>,
}

impl OnlineStandardNormalizer {
    pub fn new(num_features: usize) -> Self {
        Self {
            count: 0,
            mean: vec![0.0; num_features],
            m2: vec![0.0; num_features],
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn std_dev(&self, index: usize) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2[index] / (self.count - 1) as f64).sqrt()
    }
}

impl Normalizer for OnlineStandardNormalizer {
    fn update(&mut self, fv: &[f64]) {
        debug_assert_eq!(fv.len(), self.mean.len(), "normalizer width mismatch");
        self.count += 1;
        let n = self.count as f64;
        for ((x, mean), m2) in fv.iter().zip(&mut self.mean).zip(&mut self.m2) {
            let delta = x - *mean;
            *mean += delta / n;
            *m2 += delta * (x - *mean);
        }
    }

    fn transform(&self, fv: &[f64]) -> FeatureVector {
        if self.count < 2 {
            return fv.to_vec();
        }
        fv.iter()
            .enumerate()
            .map(|(i, x)| (x - self.mean[i]) / self.std_dev(i).max(MIN_STD_DEV))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn noop_returns_input() {
        let mut n = NoOpNormalizer;
        n.update(&[3.0, 4.0]);
        assert_eq!(n.transform(&[3.0, 4.0]), vec![3.0, 4.0]);
    }

    #[test]
    fn standard_is_identity_during_warmup() {
        let mut n = OnlineStandardNormalizer::new(2);
        assert_eq!(n.transform(&[5.0, -1.0]), vec![5.0, -1.0]);
        n.update(&[5.0, -1.0]);
        assert_eq!(n.transform(&[5.0, -1.0]), vec![5.0, -1.0]);
    }

    #[test]
    fn standard_tracks_mean_and_variance() {
        let mut n = OnlineStandardNormalizer::new(1);
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            n.update(&[x]);
        }
        assert_eq!(n.count(), 8);
        assert!((n.mean()[0] - 5.0).abs() < EPS);
        // sample variance = 32 / 7
        assert!((n.std_dev(0) - (32.0f64 / 7.0).sqrt()).abs() < EPS);

        let z = n.transform(&[5.0]);
        assert!(z[0].abs() < EPS);
    }

    #[test]
    fn constant_feature_does_not_divide_by_zero() {
        let mut n = OnlineStandardNormalizer::new(1);
        for _ in 0..10 {
            n.update(&[1.5]);
        }
        let z = n.transform(&[1.5]);
        assert!(z[0].is_finite());
        assert!(z[0].abs() < EPS);
    }
}
