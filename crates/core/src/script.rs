//! Gujarati script detection.

use std::ops::RangeInclusive;

/// The Gujarati Unicode block.
pub const GUJARATI_BLOCK: RangeInclusive<char> = '\u{0A80}'..='\u{0AFF}';

/// Whether `c` lies in the Gujarati block.
pub fn is_gujarati(c: char) -> bool {
    GUJARATI_BLOCK.contains(&c)
}

/// Whether any character of `text` is Gujarati.
pub fn contains_gujarati(text: &str) -> bool {
    text.chars().any(is_gujarati)
}

/// Empty or whitespace-only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
