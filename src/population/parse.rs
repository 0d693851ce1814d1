//! String parsing for the archetype table's clock and percentage fields.

use std::error::Error;
use std::fmt;

/// Malformed field value encountered while parsing archetype input.
#[derive(Debug, Clone)]
pub struct FormatError {
    /// The offending input string.
    pub input: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FormatError {
    fn new(input: &str, message: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse \"{}\": {}", self.input, self.message)
    }
}

impl Error for FormatError {}

/// Parses a 12-hour clock string (`"H:MM AM"` / `"H:MM PM"`) into minutes
/// since midnight.
///
/// `12:00 AM` maps to minute 0 and `12:00 PM` to minute 720. A string
/// without an AM/PM suffix is rejected; callers must not fall back to a
/// default reading.
///
/// # Errors
///
/// Returns a `FormatError` if the suffix is missing, the `H:MM` body is
/// malformed, or hour/minute are out of range.
pub fn parse_clock_minutes(s: &str) -> Result<u32, FormatError> {
    let trimmed = s.trim();
    let (body, is_pm) = if let Some(b) = trimmed.strip_suffix("AM") {
        (b, false)
    } else if let Some(b) = trimmed.strip_suffix("PM") {
        (b, true)
    } else {
        return Err(FormatError::new(s, "missing AM/PM marker"));
    };

    let (hour_str, minute_str) = body
        .trim()
        .split_once(':')
        .ok_or_else(|| FormatError::new(s, "expected H:MM before the AM/PM marker"))?;

    let hour: u32 = hour_str
        .trim()
        .parse()
        .map_err(|_| FormatError::new(s, "hour is not an integer"))?;
    let minute: u32 = minute_str
        .trim()
        .parse()
        .map_err(|_| FormatError::new(s, "minute is not an integer"))?;

    if hour == 0 || hour > 12 {
        return Err(FormatError::new(s, "hour must be in 1..=12"));
    }
    if minute > 59 {
        return Err(FormatError::new(s, "minute must be in 0..=59"));
    }

    let hour24 = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    Ok(hour24 * 60 + minute)
}

/// Parses a percentage string (`"80%"`) into a fraction (`0.8`).
///
/// A missing `%` suffix is tolerated as long as the remainder is numeric.
///
/// # Errors
///
/// Returns a `FormatError` if the value is not a finite number.
pub fn parse_percent(s: &str) -> Result<f32, FormatError> {
    let trimmed = s.trim();
    let body = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    let value: f32 = body
        .parse()
        .map_err(|_| FormatError::new(s, "expected a number with optional % suffix"))?;
    if !value.is_finite() {
        return Err(FormatError::new(s, "expected a finite number"));
    }
    Ok(value / 100.0)
}
