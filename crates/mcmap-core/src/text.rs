//! Accent- and case-insensitive text folding.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase, decompose to NFD, drop combining marks and trim.
///
/// `"  Résilié "` and `"resilie"` both fold to `"resilie"`. Folding is a
/// projection: applying it to its own output returns the same string.
#[must_use]
pub fn fold(raw: &str) -> String {
    let stripped: String = raw
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    stripped.trim().to_string()
}
