use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// Metrics of a prequential run at one point in the stream.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub samples_seen: u64,
    pub accuracy: f64,
    pub kappa: f64,
    pub log_loss: f64,
    pub brier: f64,
    pub seconds: f64,
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "seen={}, acc={:.6}, kappa={:.6}, log_loss={:.6}, brier={:.6}, t={:.3}s",
            self.samples_seen, self.accuracy, self.kappa, self.log_loss, self.brier, self.seconds
        )
    }
}
