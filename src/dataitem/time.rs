//! Gregorian calendar timestamps.

use chrono::{NaiveDate, NaiveTime};

use super::DataItemError;

/// A Gregorian calendar date-time without a timezone.
///
/// The host hands timestamps around as 14-character `YYYYMMDDhhmmss`
/// strings; [`WikiTime::from_timestamp14`] parses and validates that form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WikiTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl WikiTime {
    /// Construct from explicit calendar fields, validating the date.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<WikiTime, DataItemError> {
        let date = NaiveDate::from_ymd_opt(year, month, day);
        let time = NaiveTime::from_hms_opt(hour, minute, second);
        match (date, time) {
            (Some(_), Some(_)) => Ok(WikiTime {
                year,
                month,
                day,
                hour,
                minute,
                second,
            }),
            _ => Err(DataItemError::InvalidDate(format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            ))),
        }
    }

    /// Parse a 14-character `YYYYMMDDhhmmss` host timestamp.
    pub fn from_timestamp14(stamp: &str) -> Result<WikiTime, DataItemError> {
        if stamp.len() != 14 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DataItemError::MalformedTimestamp(stamp.to_string()));
        }
        let field = |range: std::ops::Range<usize>| -> u32 {
            // Digits only at this point, so the parse cannot fail.
            stamp[range].parse().unwrap_or(0)
        };
        WikiTime::from_ymd_hms(
            field(0..4) as i32,
            field(4..6),
            field(6..8),
            field(8..10),
            field(10..12),
            field(12..14),
        )
    }

    /// Parse a `YYYY-MM-DD` or `YYYY-MM-DD hh:mm:ss` display form.
    pub fn from_display(text: &str) -> Result<WikiTime, DataItemError> {
        let text = text.trim();
        let (date_part, time_part) = match text.split_once([' ', 'T']) {
            Some((d, t)) => (d, Some(t)),
            None => (text, None),
        };
        let mut date_fields = date_part.split('-');
        let (Some(y), Some(m), Some(d)) =
            (date_fields.next(), date_fields.next(), date_fields.next())
        else {
            return Err(DataItemError::MalformedTimestamp(text.to_string()));
        };
        let parse =
            |s: &str| -> Result<u32, DataItemError> {
                s.parse()
                    .map_err(|_| DataItemError::MalformedTimestamp(text.to_string()))
            };
        let (hour, minute, second) = match time_part {
            Some(t) => {
                let mut fields = t.split(':');
                (
                    fields.next().map(parse).transpose()?.unwrap_or(0),
                    fields.next().map(parse).transpose()?.unwrap_or(0),
                    fields.next().map(parse).transpose()?.unwrap_or(0),
                )
            }
            None => (0, 0, 0),
        };
        WikiTime::from_ymd_hms(
            parse(y)? as i32,
            parse(m)?,
            parse(d)?,
            hour,
            minute,
            second,
        )
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl std::fmt::Display for WikiTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
