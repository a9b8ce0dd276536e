//! Code normalization
//!
//! Upstream extraction stores each feedback row's codes as one
//! comma-separated string ("unclear instructions, ta unavailability").
//! These helpers turn such rows into the flat, normalized code list the
//! clustering pass consumes.

use std::collections::HashSet;

/// Trim and lowercase a piece of text
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Split one comma-separated codeword string into normalized, non-empty codes
pub fn split_codewords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_text)
        .filter(|code| !code.is_empty())
        .collect()
}

/// Flatten many codeword rows, keeping duplicates.
///
/// Repetition is signal: a code mentioned by ten students should weigh ten
/// times in the counts.
pub fn collect_codes<I, S>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    rows.into_iter()
        .flat_map(|row| split_codewords(row.as_ref()))
        .collect()
}

/// Distinct codes in first-occurrence order
pub fn unique_codes<S: AsRef<str>>(codes: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    codes
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| seen.insert(*c))
        .map(str::to_string)
        .collect()
}
