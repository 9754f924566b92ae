//! Display-only verdicts for extreme scores.

use serde::Serialize;

/// Override line shown in place of the session comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Legendary,
    Elite,
    Whisper,
}

impl Verdict {
    /// Map a score to its verdict, if any.
    ///
    /// `>= 95` wins over `>= 85`; `<= 10` never overlaps either.
    #[must_use]
    pub const fn for_score(score: u8) -> Option<Self> {
        if score >= 95 {
            Some(Self::Legendary)
        } else if score >= 85 {
            Some(Self::Elite)
        } else if score <= 10 {
            Some(Self::Whisper)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Legendary => "Legendary click!",
            Self::Elite => "Elite finger energy.",
            Self::Whisper => "Was that a tap or a whisper?",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Legendary => "legendary",
            Self::Elite => "elite",
            Self::Whisper => "whisper",
        }
    }
}

/// Line rendered under the score: the verdict when one applies, otherwise `comment`.
#[must_use]
pub fn headline(score: u8, comment: &str) -> &str {
    Verdict::for_score(score).map_or(comment, |verdict| verdict.text())
}
