use crate::classifiers::Classifier;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Reads the answer from the first feature, as laid out by
/// [`VecStream::from_labels`](crate::testing::VecStream::from_labels).
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleClassifier;

impl Classifier for OracleClassifier {
    fn predict_proba(&self, features: &[f64]) -> f64 {
        features.first().copied().unwrap_or(0.5)
    }

    fn train_on_sample(&mut self, _features: &[f64], _label: bool) {}
}

/// Counts training calls; the count stays readable after the classifier
/// has been moved into a task.
#[derive(Debug, Default)]
pub struct TrainSpyClassifier {
    trained: Arc<AtomicUsize>,
}

#[derive(Debug, Clone)]
pub struct TrainSpyHandle(Arc<AtomicUsize>);

impl TrainSpyHandle {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl TrainSpyClassifier {
    pub fn new() -> (Self, TrainSpyHandle) {
        let trained = Arc::new(AtomicUsize::new(0));
        let handle = TrainSpyHandle(Arc::clone(&trained));
        (Self { trained }, handle)
    }
}

impl Classifier for TrainSpyClassifier {
    fn predict_proba(&self, _features: &[f64]) -> f64 {
        0.5
    }

    fn train_on_sample(&mut self, _features: &[f64], _label: bool) {
        self.trained.fetch_add(1, Ordering::SeqCst);
    }
}
