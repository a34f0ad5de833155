/// Binary probabilistic classifier trained one sample at a time.
pub trait Classifier {
    /// Probability of the positive class, in `[0, 1]`.
    fn predict_proba(&self, features: &[f64]) -> f64;

    fn train_on_sample(&mut self, features: &[f64], label: bool);
}
