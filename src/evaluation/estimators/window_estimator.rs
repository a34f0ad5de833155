use crate::evaluation::estimators::Estimator;
use std::collections::VecDeque;

pub const DEFAULT_WINDOW: usize = 1000;

/// Mean over the most recent `window` observations, which makes drift
/// visible in a learning curve instead of averaging it away.
#[derive(Debug, Clone)]
pub struct WindowEstimator {
    values: VecDeque<f64>,
    sum: f64,
    window: usize,
}

impl WindowEstimator {
    pub fn new(window: usize) -> Self {
        debug_assert!(window > 0);
        Self {
            values: VecDeque::with_capacity(window),
            sum: 0.0,
            window,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for WindowEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Estimator for WindowEstimator {
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        if self.values.len() == self.window {
            if let Some(old) = self.values.pop_front() {
                self.sum -= old;
            }
        }
        self.values.push_back(v);
        self.sum += v;
    }

    fn estimation(&self) -> f64 {
        if self.values.is_empty() {
            f64::NAN
        } else {
            self.sum / self.values.len() as f64
        }
    }

    fn count(&self) -> u64 {
        self.values.len() as u64
    }
}
