use crate::classifiers::Classifier;
use crate::evaluation::{LearningCurve, PerformanceEvaluator, Snapshot};
use crate::streams::Stream;
use std::io::{Error, ErrorKind};
use std::sync::mpsc::Sender;
use std::time::Instant;
use tracing::{debug, info};

/// Test-then-train loop: every sample is first scored by the learner and
/// then used to train it.
pub struct PrequentialEvaluator {
    learner: Box<dyn Classifier>,
    stream: Box<dyn Stream>,
    evaluator: Box<dyn PerformanceEvaluator>,

    curve: LearningCurve,

    max_samples: Option<u64>,
    max_seconds: Option<u64>,
    sample_frequency: u64,

    processed: u64,
    start_time: Instant,

    progress_tx: Option<Sender<Snapshot>>,
}

impl PrequentialEvaluator {
    pub fn new(
        learner: Box<dyn Classifier>,
        stream: Box<dyn Stream>,
        evaluator: Box<dyn PerformanceEvaluator>,
        max_samples: Option<u64>,
        max_seconds: Option<u64>,
        sample_frequency: u64,
    ) -> Result<Self, Error> {
        if sample_frequency == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "sample_frequency must be > 0",
            ));
        }

        Ok(Self {
            learner,
            stream,
            evaluator,
            curve: LearningCurve::default(),
            max_samples,
            max_seconds,
            sample_frequency,
            processed: 0,
            start_time: Instant::now(),
            progress_tx: None,
        })
    }

    /// Every snapshot is also sent here. A dropped receiver is ignored.
    pub fn with_progress(mut self, tx: Sender<Snapshot>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn run(&mut self) -> Result<(), Error> {
        self.start_time = Instant::now();
        info!(
            max_samples = ?self.max_samples,
            max_seconds = ?self.max_seconds,
            sample_frequency = self.sample_frequency,
            "prequential evaluation started"
        );

        while self.stream.has_more_samples() {
            if let Some(n) = self.max_samples {
                if self.processed >= n {
                    break;
                }
            }
            if let Some(s) = self.max_seconds {
                if self.start_time.elapsed().as_secs() >= s {
                    break;
                }
            }
            let Some(sample) = self.stream.next_sample() else {
                break;
            };
            self.processed += 1;

            let probability = self.learner.predict_proba(&sample.features);
            self.evaluator.add_result(sample.label, probability);
            self.learner.train_on_sample(&sample.features, sample.label);

            if self.processed % self.sample_frequency == 0 {
                self.push_snapshot();
            }
        }

        if self.curve.latest().is_none_or(|s| s.samples_seen != self.processed) {
            self.push_snapshot();
        }
        info!(
            processed = self.processed,
            seconds = self.start_time.elapsed().as_secs_f64(),
            "prequential evaluation finished"
        );
        Ok(())
    }

    pub fn curve(&self) -> &LearningCurve {
        &self.curve
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    fn push_snapshot(&mut self) {
        let mut snapshot = Snapshot {
            samples_seen: self.processed,
            accuracy: f64::NAN,
            kappa: f64::NAN,
            log_loss: f64::NAN,
            brier: f64::NAN,
            seconds: self.start_time.elapsed().as_secs_f64(),
        };

        for m in self.evaluator.performance() {
            match m.name {
                "accuracy" => snapshot.accuracy = m.value,
                "kappa" => snapshot.kappa = m.value,
                "log_loss" => snapshot.log_loss = m.value,
                "brier" => snapshot.brier = m.value,
                _ => {}
            }
        }
        debug!(%snapshot, "snapshot");

        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(snapshot);
        }
        self.curve.push(snapshot);
    }
}
