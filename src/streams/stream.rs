use crate::features::Sample;
use std::io::Error;

/// Pull-based source of labelled samples.
///
/// Implementations may represent finite datasets or unbounded generators.
/// Every sample yielded must have exactly [`num_features`](Self::num_features)
/// values.
pub trait Stream {
    /// Length of every feature vector this stream produces.
    fn num_features(&self) -> usize;

    /// Indicates whether the stream *may* produce more samples.
    ///
    /// Finite streams return `false` once exhausted; if this returns
    /// `false`, a subsequent call to [`next_sample`](Self::next_sample) must
    /// return `None`.
    fn has_more_samples(&self) -> bool;

    /// Produces the next sample, or `None` if the stream is exhausted.
    fn next_sample(&mut self) -> Option<Sample>;

    /// Resets the stream to its initial state. Generators re-seed their RNG
    /// and clear internal counters.
    fn restart(&mut self) -> Result<(), Error>;
}
