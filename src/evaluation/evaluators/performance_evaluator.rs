use crate::evaluation::Measurement;

/// Online evaluator of binary probabilistic predictions.
pub trait PerformanceEvaluator {
    /// Clears every metric.
    fn reset(&mut self);

    /// Feeds the true label of one sample and the positive-class
    /// probability predicted for it before training.
    ///
    /// Non-finite probabilities are skipped.
    fn add_result(&mut self, label: bool, probability: f64);

    /// Current value of every metric.
    fn performance(&self) -> Vec<Measurement>;
}

pub trait PerformanceEvaluatorExt {
    /// Returns `(name, value)` for each requested metric, preserving order.
    fn metrics<'a, I>(&self, names: I) -> Vec<(&'a str, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>;

    fn metric(&self, name: &str) -> Option<f64> {
        self.metrics([name]).into_iter().next().and_then(|(_, v)| v)
    }
}

impl<T: PerformanceEvaluator + ?Sized> PerformanceEvaluatorExt for T {
    fn metrics<'a, I>(&self, names: I) -> Vec<(&'a str, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let measurements = self.performance();
        names
            .into_iter()
            .map(|n| {
                let value = measurements.iter().find(|m| m.name == n).map(|m| m.value);
                (n, value)
            })
            .collect()
    }
}
