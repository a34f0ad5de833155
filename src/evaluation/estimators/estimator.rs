/// Online scalar estimator (e.g., streaming mean).
///
/// Implementations accept values incrementally via [`add`](Self::add) and
/// expose the current estimate via [`estimation`](Self::estimation).
pub trait Estimator {
    /// Incorporates a new observation. `NaN` means "not applicable" and is
    /// ignored.
    fn add(&mut self, v: f64);

    /// Current estimate, `NaN` before the first observation.
    fn estimation(&self) -> f64;

    /// Number of observations the estimate is currently based on.
    fn count(&self) -> u64;
}
