use crate::features::Sample;
use crate::streams::Stream;
use std::io::Error;

/// Finite stream replaying a fixed list of samples.
pub struct VecStream {
    samples: Vec<Sample>,
    idx: usize,
}

impl VecStream {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples, idx: 0 }
    }

    /// One-feature samples whose only value encodes the label as 0 or 1.
    pub fn from_labels(labels: Vec<bool>) -> Self {
        Self::new(
            labels
                .into_iter()
                .map(|y| Sample::new(vec![if y { 1.0 } else { 0.0 }], y))
                .collect(),
        )
    }
}

impl Stream for VecStream {
    fn num_features(&self) -> usize {
        self.samples.first().map_or(0, |s| s.features.len())
    }

    fn has_more_samples(&self) -> bool {
        self.idx < self.samples.len()
    }

    fn next_sample(&mut self) -> Option<Sample> {
        let sample = self.samples.get(self.idx).cloned()?;
        self.idx += 1;
        Some(sample)
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.idx = 0;
        Ok(())
    }
}
