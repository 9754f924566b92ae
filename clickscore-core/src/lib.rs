//! Rate My Clicks core
//!
//! Platform-agnostic logic for the click-scoring widget: the session state
//! machine, best-score persistence, content pools, and verdicts. Platform
//! concerns (storage backend, frame delivery, audio) are injected through the
//! traits exported here.

pub mod best;
pub mod constants;
pub mod content;
pub mod frames;
pub mod random;
pub mod session;
pub mod verdict;

// Re-export commonly used types
pub use best::{
    BestScore, BestScoreStore, FailingStore, KeyValueStore, MemoryStore, StorageError, parse_best,
};
pub use constants::{ANALYSIS_DURATION_MS, BEST_SCORE_KEY, MAX_SCORE, WIGGLE_MS};
pub use content::{
    CENTURY_COMMENT, COMMENTS, FUN_FACTS, WEAK_CLICK_COMMENT, comment_pool, is_known_comment,
    is_known_fact,
};
pub use frames::{FrameCallback, FrameScheduler, ManualFrames};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use session::{
    ClickFeedback, ClickResult, Observer, Phase, SessionController, SessionSnapshot,
    SessionState, SilentFeedback, Tick, Trigger, draw_result, progress_at, start_analysis,
};
pub use verdict::{Verdict, headline};

/// Controller backed by a persistent key-value store and a seeded RNG.
pub type SeededController<S> = SessionController<BestScore<S>, SeededRandom>;

/// Build a controller that loads the best score from `backend` and draws from `seed`.
pub fn seeded_controller<S: KeyValueStore>(backend: S, seed: u64) -> SeededController<S> {
    SessionController::new(BestScore::load(backend), SeededRandom::from_seed(seed))
}
