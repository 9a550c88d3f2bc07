//! Serial string normalization
//!
//! Every comparison against a serial goes through [`normalize`] first:
//! trim, upper-case, drop internal whitespace and hyphens.

/// Normalize a raw serial string.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
///
/// # Examples
///
/// ```
/// use fretdate_common::serial::normalize;
///
/// assert_eq!(normalize("  si-0206 0234 "), "SI02060234");
/// assert_eq!(normalize("US12345678"), "US12345678");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Parse an all-digit slice. Callers only pass regex-captured digit runs.
pub(crate) fn digits(s: &str) -> u32 {
    s.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u32, |acc, b| acc.saturating_mul(10).saturating_add(u32::from(b - b'0')))
}

/// Parse an all-digit slice as a wide integer (long sequential serials)
pub(crate) fn digits_u64(s: &str) -> u64 {
    s.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, b| acc.saturating_mul(10).saturating_add(u64::from(b - b'0')))
}
