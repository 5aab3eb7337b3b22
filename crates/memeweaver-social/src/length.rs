//! Weighted post-length validation
//!
//! The platform does not count raw characters: most of the Latin, general
//! punctuation and quotation ranges weigh one unit, every other code point
//! weighs two, and any URL counts a flat 23 regardless of its length. The
//! limit applies to the weighted total.

/// Maximum weighted length of a post
pub const MAX_POST_WEIGHT: usize = 280;

/// Weighted length every URL collapses to after shortening
const URL_WEIGHT: usize = 23;

// Code point ranges that weigh a single unit (inclusive)
const LIGHT_RANGES: [(u32, u32); 4] = [
    (0x0000, 0x10FF),
    (0x2000, 0x200D),
    (0x2010, 0x201F),
    (0x2032, 0x2037),
];

fn char_weight(c: char) -> usize {
    let cp = c as u32;
    if LIGHT_RANGES.iter().any(|&(lo, hi)| cp >= lo && cp <= hi) {
        1
    } else {
        2
    }
}

fn is_url(token: &str) -> bool {
    token.starts_with("http://") || token.starts_with("https://")
}

/// Weighted length of a post under the platform's counting rules
pub fn weighted_len(text: &str) -> usize {
    let mut total = 0;
    let mut rest = text;

    while !rest.is_empty() {
        // Whitespace between tokens keeps its character weight
        let trimmed = rest.trim_start();
        total += rest[..rest.len() - trimmed.len()].chars().map(char_weight).sum::<usize>();
        if trimmed.is_empty() {
            break;
        }

        let token_end = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        let token = &trimmed[..token_end];

        if is_url(token) {
            total += URL_WEIGHT;
        } else {
            total += token.chars().map(char_weight).sum::<usize>();
        }

        rest = &trimmed[token_end..];
    }

    total
}

/// Whether a post fits the platform limit
pub fn is_post_valid(text: &str) -> bool {
    weighted_len(text) <= MAX_POST_WEIGHT
}
