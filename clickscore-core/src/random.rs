//! Injectable randomness for score, comment, and fact draws.

use crate::constants::MAX_SCORE;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::VecDeque;

/// Source of every random decision a session makes.
pub trait RandomSource {
    /// Uniform score in `0..=100`.
    fn draw_score(&mut self) -> u8;

    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// ChaCha-backed source; the same seed always replays the same sessions.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha20Rng,
}

impl SeededRandom {
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn draw_score(&mut self) -> u8 {
        self.rng.gen_range(0..=MAX_SCORE)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }
}

/// Replays queued draws in order. Exhausted queues fall back to zero.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    scores: VecDeque<u8>,
    picks: VecDeque<usize>,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue score draws.
    #[must_use]
    pub fn with_scores(mut self, scores: impl IntoIterator<Item = u8>) -> Self {
        self.scores.extend(scores);
        self
    }

    /// Queue index picks; each session consumes two (comment, then fact).
    #[must_use]
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn draw_score(&mut self) -> u8 {
        self.scores.pop_front().unwrap_or(0).min(MAX_SCORE)
    }

    fn pick(&mut self, len: usize) -> usize {
        let idx = self.picks.pop_front().unwrap_or(0);
        idx.min(len.saturating_sub(1))
    }
}
