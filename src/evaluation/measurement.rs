use std::fmt;

/// Named scalar metric produced by a performance evaluator, such as
/// `"accuracy"` or `"log_loss"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: &'static str,
    pub value: f64,
}

impl Measurement {
    #[inline]
    pub fn new(name: &'static str, value: f64) -> Self {
        Self { name, value }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:.6}", self.name, self.value)
    }
}
