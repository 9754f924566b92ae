//! Click session state machine and its frame-driven runner.
//!
//! A session moves `Idle -> Running -> Done`. [`SessionController`] holds the
//! state plus its injected store and random source; [`start_analysis`] wires a
//! controller to a [`FrameScheduler`] so each frame advances progress until the
//! result is drawn.

use crate::best::BestScoreStore;
use crate::constants::{ANALYSIS_DURATION_MS, MAX_SCORE, PROGRESS_COMPLETE};
use crate::content::{COMMENTS, FUN_FACTS, comment_pool};
use crate::frames::FrameScheduler;
use crate::random::RandomSource;
use crate::verdict::{Verdict, headline};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Done,
}

/// Outcome of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickResult {
    pub score: u8,
    pub comment: &'static str,
    pub fact: &'static str,
}

impl ClickResult {
    #[must_use]
    pub const fn verdict(&self) -> Option<Verdict> {
        Verdict::for_score(self.score)
    }

    /// Text shown under the score: verdict if one applies, else the comment.
    #[must_use]
    pub fn headline(&self) -> &'static str {
        headline(self.score, self.comment)
    }
}

/// Session state; result fields exist only once the session is done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Idle,
    Running {
        progress: u8,
    },
    Done(ClickResult),
}

impl SessionState {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Running { .. } => Phase::Running,
            Self::Done(_) => Phase::Done,
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    #[must_use]
    pub const fn progress(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running { progress } => *progress,
            Self::Done(_) => PROGRESS_COMPLETE,
        }
    }

    #[must_use]
    pub const fn result(&self) -> Option<&ClickResult> {
        match self {
            Self::Done(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn score(&self) -> Option<u8> {
        self.result().map(|r| r.score)
    }

    #[must_use]
    pub fn comment(&self) -> Option<&'static str> {
        self.result().map(|r| r.comment)
    }

    #[must_use]
    pub fn fact(&self) -> Option<&'static str> {
        self.result().map(|r| r.fact)
    }
}

/// State plus best score, handed to observers after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub best: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Started,
    /// A session was already running; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// No session running; the frame was stale.
    Idle,
    Running(u8),
    Completed(ClickResult),
}

/// Progress after `elapsed_ms` of analysis, clamped to `0..=100`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_at(elapsed_ms: f64) -> u8 {
    let pct = (elapsed_ms.max(0.0) / ANALYSIS_DURATION_MS * 100.0).round();
    pct.clamp(0.0, f64::from(PROGRESS_COMPLETE)) as u8
}

/// Draw score, comment, and fact in that order.
pub fn draw_result<R: RandomSource + ?Sized>(rng: &mut R) -> ClickResult {
    let score = rng.draw_score().min(MAX_SCORE);
    let pool = comment_pool(score);
    let comment = pool
        .get(rng.pick(pool.len()))
        .copied()
        .unwrap_or(COMMENTS[0]);
    let fact = FUN_FACTS
        .get(rng.pick(FUN_FACTS.len()))
        .copied()
        .unwrap_or(FUN_FACTS[0]);
    ClickResult {
        score,
        comment,
        fact,
    }
}

/// Owns one device's session lifecycle.
#[derive(Debug)]
pub struct SessionController<B, R> {
    state: SessionState,
    started_at: f64,
    store: B,
    rng: R,
    completed: u64,
}

impl<B, R> SessionController<B, R>
where
    B: BestScoreStore,
    R: RandomSource,
{
    pub const fn new(store: B, rng: R) -> Self {
        Self {
            state: SessionState::Idle,
            started_at: 0.0,
            store,
            rng,
            completed: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn best(&self) -> Option<u8> {
        self.store.read()
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Number of sessions that reached `Done`.
    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.completed
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            best: self.best(),
        }
    }

    /// Enter `Running` at `now`, clearing any previous result.
    /// A second call while running is ignored.
    pub fn begin(&mut self, now: f64) -> Trigger {
        if self.state.is_running() {
            return Trigger::Ignored;
        }
        self.started_at = now;
        self.state = SessionState::Running { progress: 0 };
        Trigger::Started
    }

    /// Apply a frame at `now`. Completes the session once progress hits 100.
    pub fn advance(&mut self, now: f64) -> Tick {
        let SessionState::Running { progress: previous } = self.state else {
            return Tick::Idle;
        };
        let progress = progress_at(now - self.started_at).max(previous);
        if progress < PROGRESS_COMPLETE {
            log::trace!("analysis progress {progress}%");
            self.state = SessionState::Running { progress };
            return Tick::Running(progress);
        }

        let result = draw_result(&mut self.rng);
        let best = self.store.update(result.score);
        self.completed += 1;
        log::info!(
            "click scored {score}/100 (best {best})",
            score = result.score
        );
        self.state = SessionState::Done(result.clone());
        Tick::Completed(result)
    }
}

/// Side effects fired when a session starts.
pub trait ClickFeedback {
    /// Short audible tone. Must swallow its own failures.
    fn play_tone(&self);

    /// Brief wiggle on the trigger control that clears itself.
    fn pulse(&self);
}

/// Feedback that does nothing, for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentFeedback;

impl ClickFeedback for SilentFeedback {
    fn play_tone(&self) {}

    fn pulse(&self) {}
}

/// Receives a snapshot after every state change.
pub type Observer = Rc<dyn Fn(&SessionSnapshot)>;

/// Handle a click: start a session and keep requesting frames until it completes.
///
/// Returns [`Trigger::Ignored`] without touching state, feedback, or the
/// scheduler while a session is already running.
pub fn start_analysis<B, R, F>(
    controller: &Rc<RefCell<SessionController<B, R>>>,
    scheduler: &Rc<F>,
    feedback: &dyn ClickFeedback,
    observer: &Observer,
) -> Trigger
where
    B: BestScoreStore + 'static,
    R: RandomSource + 'static,
    F: FrameScheduler + ?Sized + 'static,
{
    let trigger = controller.borrow_mut().begin(scheduler.now());
    if trigger == Trigger::Ignored {
        return trigger;
    }
    feedback.pulse();
    feedback.play_tone();
    let snapshot = controller.borrow().snapshot();
    observer(&snapshot);
    request_tick(
        Rc::clone(controller),
        Rc::clone(scheduler),
        Rc::clone(observer),
    );
    trigger
}

fn request_tick<B, R, F>(
    controller: Rc<RefCell<SessionController<B, R>>>,
    scheduler: Rc<F>,
    observer: Observer,
) where
    B: BestScoreStore + 'static,
    R: RandomSource + 'static,
    F: FrameScheduler + ?Sized + 'static,
{
    let next = Rc::clone(&scheduler);
    scheduler.request_frame(Box::new(move |now| {
        let tick = controller.borrow_mut().advance(now);
        let snapshot = controller.borrow().snapshot();
        observer(&snapshot);
        if matches!(tick, Tick::Running(_)) {
            request_tick(controller, next, observer);
        }
    }));
}
