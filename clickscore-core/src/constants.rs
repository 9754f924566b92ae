//! Timing, scoring, and storage constants for the click session.
//!
//! Everything tunable about the session lives here so behaviour only changes
//! through reviewed code, never through runtime configuration.

/// Wall-clock length of the fake analysis animation.
pub const ANALYSIS_DURATION_MS: f64 = 750.0;

/// How long the trigger control keeps its wiggle class after a click.
pub const WIGGLE_MS: u32 = 300;

/// Highest score a session can produce (inclusive).
pub const MAX_SCORE: u8 = 100;

/// Progress value that ends the running phase.
pub const PROGRESS_COMPLETE: u8 = 100;

/// Scores strictly above this bias the comment pool toward the century comment.
pub const CENTURY_ABOVE: u8 = 95;

/// Scores strictly below this bias the comment pool toward the weak-click comment.
pub const WEAK_BELOW: u8 = 10;

/// `localStorage` key holding the best score as a decimal string.
pub const BEST_SCORE_KEY: &str = "best-click-score";
