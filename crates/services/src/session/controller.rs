use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::watch;

use ielts_core::model::{
    Epoch, INITIAL_TIME_SECS, QuestionType, Session, SessionStatus, Tick, paragraph_label,
};
use ielts_core::scoring::Verdict;

use super::timer::CountdownTimer;
use crate::content::{ContentProvider, random_question_type};

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub time_limit_secs: u32,
    pub tick: Duration,
    /// Fixed question type to request. `None` picks one at random per exercise.
    pub question_type: Option<QuestionType>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: INITIAL_TIME_SECS,
            tick: Duration::from_secs(1),
            question_type: None,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs;
        self
    }

    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    #[must_use]
    pub fn with_question_type(mut self, question_type: Option<QuestionType>) -> Self {
        self.question_type = question_type;
        self
    }
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

struct State {
    session: Session,
    timer: CountdownTimer,
}

struct Shared {
    provider: Arc<dyn ContentProvider>,
    config: SessionConfig,
    state: Mutex<State>,
    updates: watch::Sender<Session>,
}

/// Sole writer of session state.
///
/// User intents, provider results and timer ticks all enter through this type.
/// Every change is published as a `Session` snapshot on a watch channel. The
/// state lock is never held across an `.await`.
///
/// Cloning yields another handle to the same session. When the last handle is
/// dropped the countdown is disarmed.
#[derive(Clone)]
pub struct SessionController {
    shared: Arc<Shared>,
}

impl SessionController {
    #[must_use]
    pub fn new(provider: Arc<dyn ContentProvider>, config: SessionConfig) -> Self {
        let session = Session::new(config.time_limit_secs);
        let (updates, _) = watch::channel(session.clone());
        Self {
            shared: Arc::new(Shared {
                provider,
                config,
                state: Mutex::new(State {
                    session,
                    timer: CountdownTimer::new(),
                }),
                updates,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.shared.config
    }

    /// Current state of the session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.shared.lock().session.clone()
    }

    /// Receive a fresh snapshot after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.shared.updates.subscribe()
    }

    #[must_use]
    pub fn is_timer_armed(&self) -> bool {
        self.shared.lock().timer.is_armed()
    }

    /// Throw away the current exercise and load a new one.
    ///
    /// Callable from any state. If another call starts before this one's
    /// request resolves, this call's result is discarded.
    pub async fn start_new_exercise(&self) -> SessionStatus {
        let epoch = {
            let mut state = self.shared.lock();
            state.timer.disarm();
            let epoch = state.session.begin_loading();
            self.shared.publish(&state);
            epoch
        };

        let hint = self
            .shared
            .config
            .question_type
            .unwrap_or_else(random_question_type);
        info!("requesting {hint} exercise (epoch {})", epoch.value());
        let result = self.shared.provider.generate_exercise(Some(hint)).await;

        let mut state = self.shared.lock();
        match result {
            Ok(exercise) => {
                let paragraphs = exercise.passage().paragraph_count();
                if state.session.finish_loading(epoch, exercise) {
                    info!("exercise loaded with {paragraphs} paragraphs");
                    if let Some(verdict) = state.session.verdict() {
                        info!("no time on the clock, submitted on load");
                        log_verdict(verdict);
                    }
                    self.arm_timer(&mut state, epoch);
                    self.shared.publish(&state);
                } else {
                    debug!("discarding exercise for superseded epoch {}", epoch.value());
                }
            }
            Err(err) => {
                if state.session.fail_loading(epoch, err.to_string()) {
                    warn!("exercise generation failed: {err}");
                    self.shared.publish(&state);
                } else {
                    debug!("ignoring failure for superseded epoch {}: {err}", epoch.value());
                }
            }
        }
        state.session.status()
    }

    /// Select or deselect a paragraph. Silent no-op unless playing with time
    /// left and `index` is valid. Returns whether the selection changed.
    pub fn toggle_paragraph(&self, index: usize) -> bool {
        let mut state = self.shared.lock();
        let changed = state.session.toggle_paragraph(index);
        if changed {
            self.shared.publish(&state);
        }
        changed
    }

    /// Score the current selection and finish the exercise.
    ///
    /// Returns the verdict when this call performed the submission, `None` if
    /// the session was not playing (already submitted, loading, or failed).
    pub fn submit(&self) -> Option<Verdict> {
        let mut state = self.shared.lock();
        let verdict = state.session.submit()?;
        state.timer.disarm();
        log_verdict(&verdict);
        self.shared.publish(&state);
        Some(verdict)
    }

    /// Stop the countdown. Used when the view owning the session goes away.
    pub fn shutdown(&self) {
        self.shared.lock().timer.disarm();
    }

    fn arm_timer(&self, state: &mut State, epoch: Epoch) {
        if !state.session.is_running() {
            return;
        }
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        state.timer.arm(self.shared.config.tick, move || match weak.upgrade() {
            Some(shared) => shared.on_tick(epoch),
            None => ControlFlow::Break(()),
        });
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &State) {
        self.updates.send_replace(state.session.clone());
    }

    fn on_tick(&self, epoch: Epoch) -> ControlFlow<()> {
        let mut state = self.lock();
        match state.session.tick(epoch) {
            Tick::Counting { remaining } => {
                debug!("{remaining}s remaining");
                self.publish(&state);
                ControlFlow::Continue(())
            }
            Tick::Expired => {
                info!("time is up, submitting automatically");
                if let Some(verdict) = state.session.verdict() {
                    log_verdict(verdict);
                }
                state.timer.disarm();
                self.publish(&state);
                ControlFlow::Break(())
            }
            Tick::Ignored => ControlFlow::Break(()),
        }
    }
}

fn log_verdict(verdict: &Verdict) {
    if verdict.is_correct() {
        info!("submission correct");
    } else {
        let missed: Vec<String> = verdict.missed().iter().map(|i| paragraph_label(*i)).collect();
        let extra: Vec<String> = verdict.extra().iter().map(|i| paragraph_label(*i)).collect();
        info!(
            "submission incorrect (missed: [{}], extra: [{}])",
            missed.join(", "),
            extra.join(", ")
        );
    }
}
