//! Best-effort field coercion for CSV cells.
//!
//! An absent column parses as the literal `"0"`, which always succeeds. A
//! present cell that does not parse (including an empty one) falls back to
//! zero as well, so both cases converge on the same value.

/// Literal substituted for an absent numeric column before parsing.
const ABSENT_NUMBER: &str = "0";

/// Parses a floating point cell, defaulting to `0.0`.
///
/// Surrounding whitespace is ignored. Non-finite values (`nan`, `inf`)
/// are treated as malformed since JSON cannot represent them.
#[must_use]
pub fn parse_f64_or_zero(value: Option<&str>) -> f64 {
    value
        .unwrap_or(ABSENT_NUMBER)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parses an integer cell, defaulting to `0`.
///
/// Surrounding whitespace is ignored. Decimal input such as `"12.0"` is
/// malformed.
#[must_use]
pub fn parse_i64_or_zero(value: Option<&str>) -> i64 {
    value
        .unwrap_or(ABSENT_NUMBER)
        .trim()
        .parse::<i64>()
        .unwrap_or(0)
}

/// Returns the trimmed cell, or an empty string if the column is absent.
#[must_use]
pub fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Splits a comma-separated cell into trimmed pieces.
///
/// A blank cell yields an empty list rather than `[""]`. Empty pieces
/// between commas are kept as empty strings.
#[must_use]
pub fn split_list(value: Option<&str>) -> Vec<String> {
    let whole = value.map(str::trim).unwrap_or_default();
    if whole.is_empty() {
        return Vec::new();
    }
    whole.split(',').map(|s| s.trim().to_string()).collect()
}
