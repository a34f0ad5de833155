use crate::evaluation::{Estimator, Measurement, PerformanceEvaluator};

const PROBABILITY_EPSILON: f64 = 1e-15;

/// Online evaluator for binary probabilistic classifiers.
///
/// Predictions are hard-thresholded at `0.5` for accuracy and the κ
/// statistics; log loss and Brier score use the probability directly.
///
/// Tracks:
/// - accuracy;
/// - Cohen's κ, from the marginals of true and predicted positives;
/// - κ-temporal, against a no-change baseline that predicts the previous
///   true label;
/// - log loss, with probabilities clamped away from 0 and 1;
/// - Brier score.
///
/// The estimator type decides whether metrics cover the whole stream
/// ([`BasicEstimator`](crate::evaluation::BasicEstimator)) or a sliding
/// window ([`WindowEstimator`](crate::evaluation::WindowEstimator)).
#[derive(Debug, Clone, Default)]
pub struct BinaryClassificationEvaluator<E: Estimator + Default> {
    correct: E,
    actual_positive: E,
    predicted_positive: E,
    correct_no_change: E,
    log_loss: E,
    brier: E,
    last_label: Option<bool>,
    seen: u64,
}

impl<E: Estimator + Default> BinaryClassificationEvaluator<E> {
    pub fn new() -> Self {
        Self::with_estimators(E::default)
    }

    /// Builds every metric's estimator with `make`, e.g. to pick a window
    /// size other than the default.
    pub fn with_estimators<F: Fn() -> E>(make: F) -> Self {
        Self {
            correct: make(),
            actual_positive: make(),
            predicted_positive: make(),
            correct_no_change: make(),
            log_loss: make(),
            brier: make(),
            last_label: None,
            seen: 0,
        }
    }

    pub fn seen(&self) -> u64 {
        self.seen
    }

    #[inline]
    fn indicator(b: bool) -> f64 {
        if b { 1.0 } else { 0.0 }
    }

    fn kappa(&self) -> f64 {
        let p_o = self.correct.estimation();
        let pt = self.actual_positive.estimation();
        let pp = self.predicted_positive.estimation();
        let p_e = pt * pp + (1.0 - pt) * (1.0 - pp);
        let denom = 1.0 - p_e;
        if denom.abs() > f64::EPSILON {
            (p_o - p_e) / denom
        } else {
            f64::NAN
        }
    }

    fn kappa_temporal(&self) -> f64 {
        let p_o = self.correct.estimation();
        let p_nc = self.correct_no_change.estimation();
        let denom = 1.0 - p_nc;
        if denom.abs() > f64::EPSILON {
            (p_o - p_nc) / denom
        } else {
            f64::NAN
        }
    }
}

impl<E: Estimator + Default> PerformanceEvaluator for BinaryClassificationEvaluator<E> {
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn add_result(&mut self, label: bool, probability: f64) {
        if !probability.is_finite() {
            return;
        }
        let p = probability.clamp(0.0, 1.0);
        let predicted = p >= 0.5;
        let y = Self::indicator(label);

        self.seen += 1;
        self.correct.add(Self::indicator(predicted == label));
        self.actual_positive.add(y);
        self.predicted_positive.add(Self::indicator(predicted));

        if let Some(prev) = self.last_label {
            self.correct_no_change.add(Self::indicator(prev == label));
        }
        self.last_label = Some(label);

        let p_clamped = p.clamp(PROBABILITY_EPSILON, 1.0 - PROBABILITY_EPSILON);
        self.log_loss.add(if label {
            -p_clamped.ln()
        } else {
            -(1.0 - p_clamped).ln()
        });
        self.brier.add((p - y) * (p - y));
    }

    fn performance(&self) -> Vec<Measurement> {
        let mut m = vec![Measurement::new("accuracy", self.correct.estimation())];

        if self.seen == 0 {
            m.extend([
                Measurement::new("kappa", 0.0),
                Measurement::new("kappa_t", 0.0),
                Measurement::new("log_loss", f64::NAN),
                Measurement::new("brier", f64::NAN),
            ]);
            return m;
        }

        m.push(Measurement::new("kappa", self.kappa()));
        m.push(Measurement::new("kappa_t", self.kappa_temporal()));
        m.push(Measurement::new("log_loss", self.log_loss.estimation()));
        m.push(Measurement::new("brier", self.brier.estimation()));
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{BasicEstimator, PerformanceEvaluatorExt, WindowEstimator};

    type Evaluator = BinaryClassificationEvaluator<BasicEstimator>;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_evaluator_reports_nan_accuracy_and_zero_kappa() {
        let e = Evaluator::new();
        assert!(e.metric("accuracy").unwrap().is_nan());
        assert_eq!(e.metric("kappa"), Some(0.0));
        assert_eq!(e.metric("kappa_t"), Some(0.0));
        assert!(e.metric("log_loss").unwrap().is_nan());
        assert_eq!(e.metric("missing"), None);
    }

    #[test]
    fn perfect_predictions() {
        let mut e = Evaluator::new();
        for i in 0..100 {
            let label = i % 2 == 0;
            e.add_result(label, if label { 1.0 } else { 0.0 });
        }
        assert_eq!(e.seen(), 100);
        assert_eq!(e.metric("accuracy"), Some(1.0));
        assert!(approx(e.metric("kappa").unwrap(), 1.0));
        assert!(approx(e.metric("brier").unwrap(), 0.0));
        assert!(e.metric("log_loss").unwrap() < 1e-12);
        // alternating labels make the no-change baseline always wrong
        assert!(approx(e.metric("kappa_t").unwrap(), 1.0));
    }

    #[test]
    fn constant_half_probability() {
        let mut e = Evaluator::new();
        for i in 0..10 {
            e.add_result(i < 5, 0.5);
        }
        // 0.5 counts as a positive prediction
        assert_eq!(e.metric("accuracy"), Some(0.5));
        assert!(approx(e.metric("kappa").unwrap(), 0.0));
        assert!(approx(e.metric("brier").unwrap(), 0.25));
        assert!(approx(e.metric("log_loss").unwrap(), std::f64::consts::LN_2));
    }

    #[test]
    fn confident_mistakes_are_clamped_not_infinite() {
        let mut e = Evaluator::new();
        e.add_result(true, 0.0);
        let loss = e.metric("log_loss").unwrap();
        assert!(loss.is_finite());
        assert!(approx(loss, -(PROBABILITY_EPSILON.ln())));
        assert_eq!(e.metric("brier"), Some(1.0));
    }

    #[test]
    fn non_finite_probabilities_are_skipped() {
        let mut e = Evaluator::new();
        e.add_result(true, f64::NAN);
        e.add_result(true, f64::INFINITY);
        assert_eq!(e.seen(), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut e = Evaluator::new();
        e.add_result(true, 0.9);
        e.reset();
        assert_eq!(e.seen(), 0);
        assert!(e.metric("accuracy").unwrap().is_nan());
    }

    #[test]
    fn windowed_accuracy_recovers_after_a_bad_phase() {
        let mut e = BinaryClassificationEvaluator::<WindowEstimator>::new();
        for _ in 0..2_000 {
            e.add_result(true, 0.0);
        }
        for _ in 0..1_000 {
            e.add_result(true, 1.0);
        }
        assert_eq!(e.metric("accuracy"), Some(1.0));
    }

    #[test]
    fn custom_window_size() {
        let mut e =
            BinaryClassificationEvaluator::with_estimators(|| WindowEstimator::new(10));
        for _ in 0..50 {
            e.add_result(false, 0.9);
        }
        for _ in 0..10 {
            e.add_result(true, 0.9);
        }
        assert_eq!(e.metric("accuracy"), Some(1.0));
        assert_eq!(e.seen(), 60);
    }
}
