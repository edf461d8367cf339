use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::ArbscanError;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Check that `day` has the shape `YYYY-MM-DD`, character by character.
///
/// Only the shape is checked: `9999-99-99` passes.
///
/// # Errors
/// Returns `InvalidDateFormat` on wrong length, a separator other than `-` at
/// positions 4 and 7, or a non-digit anywhere else.
pub fn validate_day_format(day: &str) -> Result<(), ArbscanError> {
    if day.chars().count() != 10 {
        return Err(ArbscanError::invalid_date(day));
    }
    for (idx, ch) in day.chars().enumerate() {
        let ok = if idx == 4 || idx == 7 {
            ch == '-'
        } else {
            ch.is_ascii_digit()
        };
        if !ok {
            return Err(ArbscanError::invalid_date(day));
        }
    }
    Ok(())
}

/// Millisecond timestamp of UTC midnight starting `day`.
///
/// # Errors
/// Returns `InvalidDateFormat` if `day` fails [`validate_day_format`] or is
/// well-formed but not a calendar date.
pub fn determine_ms_timestamp(day: &str) -> Result<i64, ArbscanError> {
    validate_day_format(day)?;
    let date =
        NaiveDate::parse_from_str(day, DAY_FORMAT).map_err(|_| ArbscanError::invalid_date(day))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ArbscanError::invalid_date(day))?;
    Ok(midnight.and_utc().timestamp_millis())
}

/// Convert milliseconds since epoch to a UTC datetime.
///
/// # Errors
/// Returns `MalformedRecord` if `ms` is outside chrono's representable range.
pub fn ms_to_datetime(ms: i64) -> Result<DateTime<Utc>, ArbscanError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| ArbscanError::MalformedRecord(format!("timestamp {ms} out of range")))
}

/// Human-readable `YYYY-MM-DD HH:MM:SS` rendering used in output files.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Parse a timestamp as found in quote files.
///
/// Accepts RFC 3339, or a naive `YYYY-MM-DD HH:MM[:SS[.fff]]` with either a
/// space or `T` separator, interpreted as UTC.
///
/// # Errors
/// Returns `MalformedRecord` if no form matches.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ArbscanError> {
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    let s = raw.trim();
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ArbscanError::MalformedRecord(format!("unparseable timestamp `{raw}`")))
}
