use std::io::{Error, ErrorKind};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::features::Sample;
use crate::streams::generators::sea::SeaFunction;
use crate::streams::stream::Stream;

const NUM_ATTRIBUTES: usize = 3;

/// SEA concepts generator.
///
/// Three attributes uniform in `[0, 10)`; only the first two are relevant.
/// Optionally switches to a second concept after a fixed number of samples,
/// which makes it a source of abrupt concept drift.
#[derive(Debug)]
pub struct SeaGenerator {
    seed: u64,
    rng: StdRng,
    initial_threshold: f64,
    threshold: f64,
    drift: Option<(usize, f64)>,
    balance_classes: bool,
    next_class_should_be_negative: bool,
    noise_percentage: u32,
    max_samples: Option<usize>,
    produced: usize,
}

impl SeaGenerator {
    pub fn new(
        function: SeaFunction,
        balance: bool,
        noise_percentage: u32,
        max_samples: Option<usize>,
        seed: u64,
    ) -> Result<Self, Error> {
        if noise_percentage > 100 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Noise percentage must be in [0, 100]",
            ));
        }

        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            initial_threshold: function.threshold(),
            threshold: function.threshold(),
            drift: None,
            balance_classes: balance,
            next_class_should_be_negative: false,
            noise_percentage,
            max_samples,
            produced: 0,
        })
    }

    pub fn new_with_threshold(
        threshold: f64,
        balance: bool,
        noise_percentage: u32,
        max_samples: Option<usize>,
        seed: u64,
    ) -> Result<Self, Error> {
        Self::check_threshold(threshold)?;
        Self::new(SeaFunction::F2, balance, noise_percentage, max_samples, seed).map(|mut g| {
            g.initial_threshold = threshold;
            g.threshold = threshold;
            g
        })
    }

    fn check_threshold(threshold: f64) -> Result<(), Error> {
        if !(0.0..=20.0).contains(&threshold) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Threshold must be in [0.0, 20.0] for attributes [0,10]",
            ));
        }
        Ok(())
    }

    /// Switches to `function` once `position` samples have been produced.
    pub fn with_drift(mut self, function: SeaFunction, position: usize) -> Self {
        self.drift = Some((position, function.threshold()));
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn produced(&self) -> usize {
        self.produced
    }

    #[inline]
    fn gen_attr(&mut self) -> f64 {
        self.rng.random_range(0.0..10.0)
    }

    #[inline]
    fn determine_class(&self, a1: f64, a2: f64) -> bool {
        a1 + a2 > self.threshold
    }

    #[inline]
    fn maybe_flip_with_noise(&mut self, label: bool) -> bool {
        let roll: u32 = self.rng.random_range(1..=100);
        if roll <= self.noise_percentage {
            !label
        } else {
            label
        }
    }

    fn apply_drift(&mut self) {
        if let Some((position, threshold)) = self.drift {
            if self.produced == position && self.threshold != threshold {
                debug!(
                    position,
                    from = self.threshold,
                    to = threshold,
                    "SEA concept change"
                );
                self.threshold = threshold;
            }
        }
    }
}

impl Stream for SeaGenerator {
    fn num_features(&self) -> usize {
        NUM_ATTRIBUTES
    }

    fn has_more_samples(&self) -> bool {
        self.max_samples.is_none_or(|max| self.produced < max)
    }

    fn next_sample(&mut self) -> Option<Sample> {
        if !self.has_more_samples() {
            return None;
        }
        self.apply_drift();

        let (a1, a2, a3, label) = loop {
            let a1 = self.gen_attr();
            let a2 = self.gen_attr();
            let a3 = self.gen_attr();
            let label = self.determine_class(a1, a2);

            if !self.balance_classes || label != self.next_class_should_be_negative {
                break (a1, a2, a3, label);
            }
        };
        if self.balance_classes {
            self.next_class_should_be_negative = !self.next_class_should_be_negative;
        }

        let label = self.maybe_flip_with_noise(label);
        self.produced += 1;
        Some(Sample::new(vec![a1, a2, a3], label))
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.threshold = self.initial_threshold;
        self.produced = 0;
        self.next_class_should_be_negative = false;
        Ok(())
    }
}
