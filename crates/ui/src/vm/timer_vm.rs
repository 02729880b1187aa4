/// Colour band of the countdown display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTone {
    Calm,
    Warning,
    Critical,
}

impl TimerTone {
    const WARNING_SECS: u32 = 45;
    const CRITICAL_SECS: u32 = 15;

    #[must_use]
    pub fn for_remaining(seconds: u32) -> Self {
        if seconds <= Self::CRITICAL_SECS {
            TimerTone::Critical
        } else if seconds <= Self::WARNING_SECS {
            TimerTone::Warning
        } else {
            TimerTone::Calm
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            TimerTone::Calm => "timer-calm",
            TimerTone::Warning => "timer-warning",
            TimerTone::Critical => "timer-critical",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerVm {
    pub remaining: u32,
    pub label: String,
    pub tone: TimerTone,
}

impl TimerVm {
    #[must_use]
    pub fn new(remaining: u32) -> Self {
        Self {
            remaining,
            label: format_clock(remaining),
            tone: TimerTone::for_remaining(remaining),
        }
    }
}

/// `MM:SS`, zero-padded.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes:02}:{remainder:02}")
}
