use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Plain decimal literal: optional sign, digits with optional fraction, optional exponent.
    /// Examples: "100", "-5", "2.5", ".5", "3.", "1e3", "+4E-2"
    static ref NUMBER_PATTERN: Regex = Regex::new(
        r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$"
    ).unwrap();
}

/// Check if a string is a plain decimal number literal
pub fn looks_like_number(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return false;
    }

    NUMBER_PATTERN.is_match(trimmed)
}

/// Parse text as a finite number, or `None` if it is not a plain decimal
/// literal or overflows `f64`
pub fn parse_number(s: &str) -> Option<f64> {
    if !looks_like_number(s) {
        return None;
    }
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
