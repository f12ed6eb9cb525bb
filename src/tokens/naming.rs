//! Variable name cleanup.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Turn a raw variable name into an output-safe identifier.
///
/// Each whitespace run and each `/` becomes a single `-`, then the result is
/// lowercased: `"Colors/Primary Blue"` becomes `"colors-primary-blue"`.
pub fn format_variable_name(name: &str) -> String {
    WHITESPACE_RUN.replace_all(name, "-").replace('/', "-").to_lowercase()
}

/// Sort key for name ordering: cleaned prefix plus trailing number.
///
/// `"Brand/500"` splits into `("brand", 500)`. Names without a
/// `-<digits>` suffix keep the whole cleaned name and a number of 0.
/// Suffixes that overflow `u64` saturate to `u64::MAX`.
pub fn sort_key(name: &str) -> (String, u64) {
    let clean = format_variable_name(name);
    let digits_start = clean.trim_end_matches(|c: char| c.is_ascii_digit()).len();

    if digits_start < clean.len() && clean[..digits_start].ends_with('-') {
        // Overlong suffixes saturate
        let number = clean[digits_start..].parse().unwrap_or(u64::MAX);
        let prefix = clean[..digits_start - 1].to_string();
        return (prefix, number);
    }

    (clean, 0)
}
