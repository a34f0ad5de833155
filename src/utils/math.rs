/// Hoeffding bound `sqrt(R² ln(1/δ) / 2n)`: with probability `1 - δ` the
/// true mean of a variable with range `R` lies within this distance of the
/// mean of `n` observations.
pub fn hoeffding_bound(range: f64, confidence: f64, n: f64) -> f64 {
    (((range * range) * (1.0 / confidence).ln()) / (2.0 * n)).sqrt()
}

/// Largest rate accepted by [`poisson`]. Beyond a few hundred `exp(-lambda)`
/// underflows and the draws would be biased.
pub const MAX_POISSON_LAMBDA: f64 = 100.0;

/// Draws from `Poisson(lambda)` by inversion; `lambda` must be in
/// `(0, MAX_POISSON_LAMBDA]`.
pub fn poisson<R: rand::Rng>(rng: &mut R, lambda: f64) -> u32 {
    debug_assert!(lambda > 0.0 && lambda <= MAX_POISSON_LAMBDA);
    let limit = (-lambda).exp();
    let mut k = 0;
    let mut product: f64 = rng.random();
    while product > limit {
        k += 1;
        product *= rng.random::<f64>();
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn bound_shrinks_with_more_samples() {
        let a = hoeffding_bound(1.0, 1e-3, 10.0);
        let b = hoeffding_bound(1.0, 1e-3, 1000.0);
        assert!(b < a);
        assert!((a - ((1000.0f64).ln() / 20.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn bound_grows_as_delta_shrinks() {
        assert!(hoeffding_bound(1.0, 1e-7, 50.0) > hoeffding_bound(1.0, 0.1, 50.0));
    }

    #[test]
    fn poisson_mean_is_close_to_lambda() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| u64::from(poisson(&mut rng, 1.0))).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 1.0).abs() < 0.05, "mean={mean}");
    }

    #[test]
    fn poisson_is_unbiased_at_the_largest_rate() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 5_000;
        let total: u64 = (0..n)
            .map(|_| u64::from(poisson(&mut rng, MAX_POISSON_LAMBDA)))
            .sum();
        let mean = total as f64 / n as f64;
        assert!((mean - MAX_POISSON_LAMBDA).abs() < 1.0, "mean={mean}");
    }
}
