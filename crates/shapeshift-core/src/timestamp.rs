//! Timestamp parsing used by `enforce` coercion
//!
//! Coercing to `timestamp` delegates to a [`TimestampParser`]. The default,
//! [`ChronoTimestampParser`], accepts the common machine and human layouts;
//! callers with other conventions plug in their own implementation.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Free-form text could not be parsed as a timestamp
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognized timestamp: '{input}'")]
pub struct TimestampError {
    pub input: String,
}

/// Parses free-form date/time text
pub trait TimestampParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<DateTime<FixedOffset>, TimestampError>;
}

/// Default parser backed by chrono
///
/// Naive date-times and bare dates are interpreted as UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTimestampParser;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

impl TimestampParser for ChronoTimestampParser {
    fn parse(&self, text: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
        let text = text.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Ok(parsed);
        }
        if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
            return Ok(parsed);
        }

        for format in DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
            }
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(text, format) {
                let naive = date.and_hms_opt(0, 0, 0).ok_or_else(|| TimestampError {
                    input: text.to_string(),
                })?;
                return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
            }
        }

        Err(TimestampError {
            input: text.to_string(),
        })
    }
}

/// Whether `text` is an RFC 3339 timestamp, the form coerced timestamps take
pub fn is_rfc3339(text: &str) -> bool {
    DateTime::parse_from_rfc3339(text).is_ok()
}
