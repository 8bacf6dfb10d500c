//! Cleaned-transcript generation.
//!
//! Cleaning is NFKC normalization followed by one regex pass over the master
//! strip class. Characters with an ASCII stand-in (em dash, long dashes,
//! arrow, horizontal bar, multiplication sign) are replaced; everything else
//! in the class is removed. A final NFKC pass recomposes base characters and
//! combining marks that were only separated by a removed character, so the
//! output is a fixed point of `clean`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

use crate::tables::{STRIP_CLASS, clean_replacement};

static STRIP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(STRIP_CLASS).expect("valid stealth strip class"));

/// Produce the cleaned plain-text version of `raw`.
///
/// # Examples
///
/// ```
/// use unveil_core::clean;
///
/// assert_eq!(clean("A\u{200B}B"), "AB");
/// assert_eq!(clean("x\u{2192}y"), "x->y");
/// ```
#[must_use]
pub fn clean(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let normalized: String = raw.nfkc().collect();
    let stripped = strip_stealth(&normalized);
    match stripped {
        // Nothing removed: `normalized` is already NFKC.
        Cow::Borrowed(_) => normalized,
        Cow::Owned(stripped) => stripped.nfkc().collect(),
    }
}

/// Remove or replace every match of the master strip class.
///
/// Returns `Cow::Borrowed` when `text` contains no stealth character.
#[must_use]
pub fn strip_stealth(text: &str) -> Cow<'_, str> {
    STRIP_REGEX.replace_all(text, |caps: &Captures<'_>| {
        caps[0]
            .chars()
            .next()
            .and_then(clean_replacement)
            .unwrap_or_default()
    })
}
