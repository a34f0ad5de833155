use std::cmp::Ordering;

/// A candidate binary split of a leaf on one feature at its fixed threshold.
#[derive(Debug, Clone, Copy)]
pub struct AttributeSplitSuggestion {
    attribute_index: usize,
    threshold: f64,
    merit: f64,
}

impl AttributeSplitSuggestion {
    pub fn new(attribute_index: usize, threshold: f64, merit: f64) -> Self {
        Self {
            attribute_index,
            threshold,
            merit,
        }
    }

    pub fn get_attribute_index(&self) -> usize {
        self.attribute_index
    }

    pub fn get_threshold(&self) -> f64 {
        self.threshold
    }

    pub fn get_merit(&self) -> f64 {
        self.merit
    }
}

impl PartialEq for AttributeSplitSuggestion {
    fn eq(&self, other: &Self) -> bool {
        self.merit == other.merit
    }
}

impl PartialOrd for AttributeSplitSuggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.merit.partial_cmp(&other.merit)
    }
}

/// Running best and second-best merit over the candidates of one leaf.
///
/// "Do not split" takes part as a candidate of merit zero, so the
/// second-best merit never drops below zero. Candidates must be offered in
/// ascending feature order: on an exact tie the earlier best is kept.
#[derive(Debug, Clone, Copy)]
pub struct SplitCandidates {
    best: Option<AttributeSplitSuggestion>,
    second_best_merit: f64,
}

impl Default for SplitCandidates {
    fn default() -> Self {
        Self {
            best: None,
            second_best_merit: 0.0,
        }
    }
}

impl SplitCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer(&mut self, suggestion: AttributeSplitSuggestion) {
        match self.best {
            Some(best) if suggestion > best => {
                self.second_best_merit = self.second_best_merit.max(best.merit);
                self.best = Some(suggestion);
            }
            Some(_) => {
                self.second_best_merit = self.second_best_merit.max(suggestion.merit);
            }
            None => self.best = Some(suggestion),
        }
    }

    pub fn best(&self) -> Option<&AttributeSplitSuggestion> {
        self.best.as_ref()
    }

    pub fn second_best_merit(&self) -> f64 {
        self.second_best_merit
    }

    /// Difference between the best and the runner-up merit.
    pub fn merit_gap(&self) -> Option<f64> {
        self.best.map(|b| b.merit - self.second_best_merit)
    }
}

impl FromIterator<AttributeSplitSuggestion> for SplitCandidates {
    fn from_iter<I: IntoIterator<Item = AttributeSplitSuggestion>>(iter: I) -> Self {
        let mut candidates = Self::new();
        for s in iter {
            candidates.offer(s);
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(attr: usize, merit: f64) -> AttributeSplitSuggestion {
        AttributeSplitSuggestion::new(attr, 0.0, merit)
    }

    #[test]
    fn empty_candidates_have_no_best() {
        let c = SplitCandidates::new();
        assert!(c.best().is_none());
        assert!(c.merit_gap().is_none());
    }

    #[test]
    fn tracks_best_and_runner_up() {
        let c: SplitCandidates = [s(0, 0.1), s(1, 0.4), s(2, 0.3)].into_iter().collect();
        assert_eq!(c.best().unwrap().get_attribute_index(), 1);
        assert_eq!(c.second_best_merit(), 0.3);
        assert!((c.merit_gap().unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn ties_keep_the_earlier_feature() {
        let c: SplitCandidates = [s(3, 0.2), s(5, 0.2)].into_iter().collect();
        assert_eq!(c.best().unwrap().get_attribute_index(), 3);
        assert_eq!(c.merit_gap(), Some(0.0));
    }

    #[test]
    fn single_candidate_is_compared_against_null_split() {
        let c: SplitCandidates = [s(0, 0.25)].into_iter().collect();
        assert_eq!(c.second_best_merit(), 0.0);
        assert_eq!(c.merit_gap(), Some(0.25));
    }
}
