use std::collections::BTreeSet;
use std::sync::Arc;

use crate::model::Exercise;
use crate::scoring::{Verdict, score};

/// Seconds on the clock at the start of every exercise.
pub const INITIAL_TIME_SECS: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Loading,
    Playing,
    Submitted,
    Error,
}

/// Identifies one load cycle. Results and ticks carrying a stale epoch are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Epoch(u64);

impl Epoch {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What a timer tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Stale epoch, not playing, or already at zero. Nothing changed.
    Ignored,
    Counting { remaining: u32 },
    /// The clock hit zero and the session was submitted.
    Expired,
}

#[derive(Debug, Clone)]
enum Phase {
    Loading,
    Playing(Arc<Exercise>),
    Submitted {
        exercise: Arc<Exercise>,
        verdict: Verdict,
    },
    Error {
        message: String,
    },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Finite-state machine for one practice session.
///
/// The verdict lives inside the submitted phase, so it exists exactly when the
/// status is `Submitted`. The selection only changes while playing with time
/// left, and the clock only moves down while playing.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    selected: BTreeSet<usize>,
    time_limit: u32,
    time_remaining: u32,
    epoch: Epoch,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(INITIAL_TIME_SECS)
    }
}

impl Session {
    /// A fresh session in `Loading`, before any exercise has been requested.
    #[must_use]
    pub fn new(time_limit: u32) -> Self {
        Self {
            phase: Phase::Loading,
            selected: BTreeSet::new(),
            time_limit,
            time_remaining: time_limit,
            epoch: Epoch::default(),
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match self.phase {
            Phase::Loading => SessionStatus::Loading,
            Phase::Playing(_) => SessionStatus::Playing,
            Phase::Submitted { .. } => SessionStatus::Submitted,
            Phase::Error { .. } => SessionStatus::Error,
        }
    }

    #[must_use]
    pub fn exercise(&self) -> Option<&Arc<Exercise>> {
        match &self.phase {
            Phase::Playing(exercise) | Phase::Submitted { exercise, .. } => Some(exercise),
            Phase::Loading | Phase::Error { .. } => None,
        }
    }

    #[must_use]
    pub fn verdict(&self) -> Option<&Verdict> {
        match &self.phase {
            Phase::Submitted { verdict, .. } => Some(verdict),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error { message } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    #[must_use]
    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Seconds spent so far on the current exercise.
    #[must_use]
    pub fn elapsed(&self) -> u32 {
        self.time_limit.saturating_sub(self.time_remaining)
    }

    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Playing with time left: the only state in which the countdown runs.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Playing(_)) && self.time_remaining > 0
    }

    /// Reset everything and enter `Loading` for a new request.
    ///
    /// Returns the epoch the caller must present when the request resolves.
    pub fn begin_loading(&mut self) -> Epoch {
        self.epoch = Epoch(self.epoch.0.wrapping_add(1));
        self.phase = Phase::Loading;
        self.selected.clear();
        self.time_remaining = self.time_limit;
        self.epoch
    }

    /// Store a loaded exercise and start playing.
    ///
    /// With a zero time limit the clock is already out, so the session goes
    /// straight on to `Submitted` with a timed-out verdict.
    ///
    /// Returns `false` (and changes nothing) if `epoch` is stale or the session
    /// is no longer loading.
    pub fn finish_loading(&mut self, epoch: Epoch, exercise: Exercise) -> bool {
        if epoch != self.epoch || !matches!(self.phase, Phase::Loading) {
            return false;
        }
        self.phase = Phase::Playing(Arc::new(exercise));
        if self.time_remaining == 0 {
            self.submit();
        }
        true
    }

    /// Record a failed load. Same staleness rules as [`Session::finish_loading`].
    pub fn fail_loading(&mut self, epoch: Epoch, message: impl Into<String>) -> bool {
        if epoch != self.epoch || !matches!(self.phase, Phase::Loading) {
            return false;
        }
        self.phase = Phase::Error {
            message: message.into(),
        };
        true
    }

    /// Flip `index` in the selection. Silent no-op unless playing with time
    /// left and `index` is a valid paragraph. Returns whether anything changed.
    pub fn toggle_paragraph(&mut self, index: usize) -> bool {
        if self.time_remaining == 0 {
            return false;
        }
        let Phase::Playing(exercise) = &self.phase else {
            return false;
        };
        if !exercise.is_valid_index(index) {
            return false;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        true
    }

    /// Score the selection and enter `Submitted`.
    ///
    /// Only the first call while playing does anything; later calls return
    /// `None` and leave the verdict and clock untouched.
    pub fn submit(&mut self) -> Option<Verdict> {
        let Phase::Playing(exercise) = &self.phase else {
            return None;
        };
        let exercise = Arc::clone(exercise);
        let verdict = score(
            &self.selected,
            exercise.question().correct_paragraphs(),
            self.time_remaining == 0,
        );
        self.phase = Phase::Submitted {
            exercise,
            verdict: verdict.clone(),
        };
        Some(verdict)
    }

    /// Advance the countdown by one second on behalf of the timer armed for `epoch`.
    pub fn tick(&mut self, epoch: Epoch) -> Tick {
        if epoch != self.epoch || !self.is_running() {
            return Tick::Ignored;
        }
        self.time_remaining -= 1;
        if self.time_remaining > 0 {
            return Tick::Counting {
                remaining: self.time_remaining,
            };
        }
        match self.submit() {
            Some(_) => Tick::Expired,
            None => Tick::Ignored,
        }
    }
}
