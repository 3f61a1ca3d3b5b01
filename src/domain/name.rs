//! Section and variable name rules.
//!
//! Names are case-insensitive in the source and always stored upper-cased.
//! A valid name starts with an ASCII letter followed by ASCII letters, digits,
//! `-` or `_`.

/// Implicit section holding variables declared before any `[section]` header.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Trim and upper-case a raw name as it appears in the source or a query.
/// Only ASCII letters change case.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

pub fn is_valid(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        }
        _ => false,
    }
}

/// Validate the trimmed `raw` text and return its normalized form.
pub fn normalize_valid(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    is_valid(trimmed).then(|| trimmed.to_ascii_uppercase())
}
