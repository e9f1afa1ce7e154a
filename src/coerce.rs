//! Coercion utilities for textual config values.
//!
//! Pure functions with no I/O. The duration syntax matches what operators
//! write in config files: a decimal magnitude with an optional unit suffix
//! (`30s`, `5m`, `2h`); a bare number means seconds.

use std::time::Duration;

/// Parse a duration of the form `^[0-9]+[smh]?$`.
///
/// Missing suffix defaults to seconds. Anything else (`"3d"`, `"ABCs"`, an
/// empty string) is `None`. Magnitudes that overflow `u64` seconds are `None`
/// as well.
pub fn parse_duration(value: &str) -> Option<Duration> {
    if !is_valid_duration(value) {
        return None;
    }

    let magnitude: u64 = leading_digits(value)?.parse().ok()?;
    let unit_secs: u64 = match value.as_bytes().last() {
        Some(b'm') => 60,
        Some(b'h') => 3600,
        _ => 1,
    };
    Some(Duration::from_secs(magnitude.checked_mul(unit_secs)?))
}

/// First contiguous run of decimal digits anywhere in `value`, or `None`
/// when the input contains no digit.
pub fn leading_digits(value: &str) -> Option<&str> {
    let start = value.find(|c: char| c.is_ascii_digit())?;
    let run = &value[start..];
    let end = run
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(run.len());
    Some(&run[..end])
}

/// The whole string must be digits followed by at most one of `s`, `m`, `h`.
fn is_valid_duration(value: &str) -> bool {
    let bytes = value.as_bytes();
    let digits = match bytes.last() {
        Some(b's' | b'm' | b'h') => &bytes[..bytes.len() - 1],
        _ => bytes,
    };
    !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}
