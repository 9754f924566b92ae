//! Fixed comment and fun-fact pools.

use crate::constants::{CENTURY_ABOVE, WEAK_BELOW};

/// Every comment a session can pick, in display order.
pub const COMMENTS: [&str; 10] = [
    "Elegant click.",
    "That click was suspicious…",
    "10/10 would click again.",
    "Click of the century!",
    "A bold and decisive click.",
    "Weirdly satisfying.",
    "Weak click. Try harder.",
    "Majestic. Truly majestic.",
    "That click woke the servers.",
    "Certified crispy click.",
];

pub const FUN_FACTS: [&str; 5] = [
    "Fun fact: Honey never spoils.",
    "Fun fact: Bananas are berries, but strawberries aren't.",
    "Fun fact: Octopuses have three hearts.",
    "Fun fact: Your click traveled thousands of miles of fiber.",
    "Fun fact: A group of flamingos is called a flamboyance.",
];

/// Extra entry prepended for very high scores.
pub const CENTURY_COMMENT: &str = COMMENTS[3];

/// Extra entry prepended for very low scores.
pub const WEAK_CLICK_COMMENT: &str = COMMENTS[6];

/// Build the candidate comment pool for `score`.
///
/// The pool is always the full comment list; scores above 95 or below 10 get
/// one duplicate entry up front, which doubles the odds of the matching line.
#[must_use]
pub fn comment_pool(score: u8) -> Vec<&'static str> {
    let mut pool = Vec::with_capacity(COMMENTS.len() + 1);
    if score > CENTURY_ABOVE {
        pool.push(CENTURY_COMMENT);
    } else if score < WEAK_BELOW {
        pool.push(WEAK_CLICK_COMMENT);
    }
    pool.extend_from_slice(&COMMENTS);
    pool
}

#[must_use]
pub fn is_known_comment(text: &str) -> bool {
    COMMENTS.contains(&text)
}

#[must_use]
pub fn is_known_fact(text: &str) -> bool {
    FUN_FACTS.contains(&text)
}
