use std::collections::BTreeSet;

/// Outcome of a submission.
///
/// `correct` holds only for exact set equality between the selection and the
/// evidence paragraphs; there is no partial credit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    correct: bool,
    missed: BTreeSet<usize>,
    extra: BTreeSet<usize>,
    timed_out: bool,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct
    }

    /// Evidence paragraphs the user did not select.
    #[must_use]
    pub fn missed(&self) -> &BTreeSet<usize> {
        &self.missed
    }

    /// Selected paragraphs that hold no evidence.
    #[must_use]
    pub fn extra(&self) -> &BTreeSet<usize> {
        &self.extra
    }

    /// True when the submission came from the countdown reaching zero.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }
}

/// Score a selection against the evidence set.
#[must_use]
pub fn score(selected: &BTreeSet<usize>, correct: &BTreeSet<usize>, timed_out: bool) -> Verdict {
    let missed: BTreeSet<usize> = correct.difference(selected).copied().collect();
    let extra: BTreeSet<usize> = selected.difference(correct).copied().collect();
    Verdict {
        correct: missed.is_empty() && extra.is_empty(),
        missed,
        extra,
        timed_out,
    }
}
