//! Deterministic pattern-based extraction used when the remote tier is unavailable.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ClassificationResult;

/// A standalone run of exactly five ASCII digits.
pub static ZIP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[0-9]{5}(?-u:\b)").expect("Failed to compile zip regex")
});

/// `brand:` label, case-insensitive, followed by a word.
pub static BRAND_PATTERN: Lazy<Regex> = Lazy::new(|| labeled_pattern("brand"));

/// `category:` label, case-insensitive, followed by a word.
pub static CATEGORY_PATTERN: Lazy<Regex> = Lazy::new(|| labeled_pattern("category"));

/// `time_pref:` label, case-insensitive, followed by a word.
pub static TIME_PREF_PATTERN: Lazy<Regex> = Lazy::new(|| labeled_pattern("time_pref"));

fn labeled_pattern(label: &str) -> Regex {
    Regex::new(&format!(r"(?i:{label}):\s*([0-9A-Za-z_]+)"))
        .expect("Failed to compile label regex")
}

fn first_labeled(pattern: &Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Extracts the four fields with fixed patterns.
///
/// Each field is matched independently and takes its first match; a field
/// with no match is empty. Pure and infallible.
///
/// # Examples
///
/// ```
/// use classify_core::fallback::fallback_extract;
///
/// let result = fallback_extract("brand:Acme category:Electronics time_pref:Morning zip 90210");
/// assert_eq!(result.zip, "90210");
/// assert_eq!(result.brand, "Acme");
/// assert_eq!(result.category, "Electronics");
/// assert_eq!(result.time_pref, "Morning");
/// ```
#[must_use]
pub fn fallback_extract(text: &str) -> ClassificationResult {
    ClassificationResult {
        zip: ZIP_PATTERN
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        brand: first_labeled(&BRAND_PATTERN, text),
        category: first_labeled(&CATEGORY_PATTERN, text),
        time_pref: first_labeled(&TIME_PREF_PATTERN, text),
    }
}
