use std::collections::VecDeque;

pub const DEFAULT_MIN_WINDOW: usize = 10;
pub const DEFAULT_MAX_WINDOW: usize = 1000;

const MIN_VARIANCE: f64 = 1e-10;

/// Adaptive-windowing change detector over a stream of binary outcomes.
///
/// Outcomes are appended to a window until either a statistically
/// significant difference between the means of two sub-windows is found
/// (drift: the window is cleared and [`add`](Self::add) returns `true`) or
/// the window reaches `max_window`, at which point the oldest outcome is
/// evicted.
#[derive(Debug, Clone)]
pub struct DriftDetector {
    window: VecDeque<f64>,
    sum: f64,
    sum_squares: f64,
    alpha: f64,
    min_window: usize,
    max_window: usize,
}

impl DriftDetector {
    /// Smaller `alpha` makes the detector more conservative.
    pub fn new(alpha: f64) -> Self {
        Self::with_window(alpha, DEFAULT_MIN_WINDOW, DEFAULT_MAX_WINDOW)
    }

    pub fn with_window(alpha: f64, min_window: usize, max_window: usize) -> Self {
        debug_assert!(alpha > 0.0 && alpha < 1.0, "alpha must be in (0, 1)");
        debug_assert!(min_window >= 1);
        debug_assert!(max_window >= min_window.saturating_mul(2));
        Self {
            window: VecDeque::with_capacity(max_window.min(128)),
            sum: 0.0,
            sum_squares: 0.0,
            alpha,
            min_window,
            max_window,
        }
    }

    /// Feeds one outcome. Returns `true` if drift was detected, in which case
    /// the detector has already been reset.
    pub fn add(&mut self, value: bool) -> bool {
        let x = if value { 1.0 } else { 0.0 };

        self.window.push_back(x);
        self.sum += x;
        self.sum_squares += x * x;

        if self.window.len() > self.max_window {
            if let Some(old) = self.window.pop_front() {
                self.sum -= old;
                self.sum_squares -= old * old;
            }
        }

        if self.window.len() < self.min_window {
            return false;
        }

        if self.detect() {
            self.reset();
            return true;
        }
        false
    }

    fn detect(&self) -> bool {
        let width = self.window.len();
        if width < 2 * self.min_window {
            return false;
        }

        let n = width as f64;
        let mean = self.sum / n;
        let variance = (self.sum_squares / n - mean * mean).max(MIN_VARIANCE);
        let eps = (2.0 * variance * (2.0 / self.alpha).ln() / n).sqrt();

        let mut left_sum: f64 = self
            .window
            .iter()
            .take(self.min_window)
            .sum();

        for cut in self.min_window..=width - self.min_window {
            if cut > self.min_window {
                left_sum += self.window[cut - 1];
            }
            let right_sum = self.sum - left_sum;
            let mean_left = left_sum / cut as f64;
            let mean_right = right_sum / (width - cut) as f64;

            if (mean_left - mean_right).abs() > eps {
                return true;
            }
        }
        false
    }

    /// Clears the window and running sums.
    pub fn reset(&mut self) {
        self.window.clear();
        self.sum = 0.0;
        self.sum_squares = 0.0;
    }

    pub fn width(&self) -> usize {
        self.window.len()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.window.is_empty() {
            return None;
        }
        Some(self.sum / self.window.len() as f64)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn min_window(&self) -> usize {
        self.min_window
    }

    pub fn max_window(&self) -> usize {
        self.max_window
    }
}
