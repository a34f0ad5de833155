/// Running positive/negative label counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassStats {
    pub pos: u64,
    pub neg: u64,
}

impl ClassStats {
    pub fn new(pos: u64, neg: u64) -> Self {
        Self { pos, neg }
    }

    #[inline]
    pub fn update(&mut self, label: bool) {
        if label {
            self.pos += 1;
        } else {
            self.neg += 1;
        }
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.pos + self.neg
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Empirical probability of the positive class, `0.5` before any sample.
    pub fn probability(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.5;
        }
        self.pos as f64 / total as f64
    }

    pub fn is_pure(&self) -> bool {
        self.pos == 0 || self.neg == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_are_uninformative() {
        let s = ClassStats::default();
        assert_eq!(s.total(), 0);
        assert_eq!(s.probability(), 0.5);
        assert!(s.is_empty());
    }

    #[test]
    fn probability_tracks_counts() {
        let mut s = ClassStats::default();
        s.update(true);
        s.update(true);
        s.update(false);
        s.update(true);
        assert_eq!(s, ClassStats::new(3, 1));
        assert_eq!(s.probability(), 0.75);
        assert!(!s.is_pure());

        s.clear();
        assert_eq!(s.probability(), 0.5);
    }
}
