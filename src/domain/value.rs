//! Conversions from raw value text to typed values.

const TRUE_TOKENS: [&str; 5] = ["true", "t", "yes", "y", "1"];
const FALSE_TOKENS: [&str; 5] = ["false", "f", "no", "n", "0"];

/// Interpret `text` as a flag. Only the true tokens (`true`, `t`, `yes`,
/// `y`, `1`, in any case) are true; everything else is false.
pub fn as_bool(text: &str) -> bool {
    let text = text.trim();
    TRUE_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t))
}

/// Like [`as_bool`], but `None` for text that is not a recognised token.
pub fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if TRUE_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t)) {
        Some(false)
    } else {
        None
    }
}

pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

pub fn parse_double(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}
