//! `"HH:MM"` time-of-day validation and parsing.
//!
//! [`is_valid_time`] is the gate every expander applies before building a
//! schedule. [`parse_time`] turns a validated string into a [`TimeOfDay`];
//! a `None` result means "no schedule can be built from this input" and the
//! caller short-circuits to an empty list.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::Serialize;

use crate::error::ScheduleError;

/// A validated wall-clock time with minute precision.
///
/// Only constructed through [`parse_time`] or [`FromStr`], so both components
/// are always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    /// Hour component (0-23).
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Minute component (0-59).
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// The time with seconds and sub-seconds zeroed.
    pub fn to_naive_time(self) -> NaiveTime {
        // Fields are range-checked at construction; the fallback is unreachable.
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s).ok_or_else(|| ScheduleError::InvalidTime(format!("'{s}'")))
    }
}

/// Check that `text` is exactly `H:MM` or `HH:MM` with hour 0-23 and minute 00-59.
///
/// Equivalent to the pattern `^([01]?[0-9]|2[0-3]):[0-5][0-9]$`: one or two
/// hour digits, exactly two minute digits, nothing else.
///
/// # Examples
///
/// ```
/// use schedule_engine::time::is_valid_time;
///
/// assert!(is_valid_time("14:00"));
/// assert!(is_valid_time("9:05"));
/// assert!(!is_valid_time("25:00"));
/// assert!(!is_valid_time("12:00:00"));
/// ```
pub fn is_valid_time(text: &str) -> bool {
    let Some((hour, minute)) = text.split_once(':') else {
        return false;
    };

    if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if minute.len() != 2 || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    // Digits only and at most two of them, so these parses cannot fail.
    let hour: u32 = hour.parse().unwrap_or(u32::MAX);
    let minute: u32 = minute.parse().unwrap_or(u32::MAX);

    hour <= 23 && minute <= 59
}

/// Parse `"H:MM"` / `"HH:MM"` into a [`TimeOfDay`].
///
/// Returns `None` when a part is missing, is not an integer, is out of range,
/// or when the input carries more than two `:`-separated parts.
pub fn parse_time(text: &str) -> Option<TimeOfDay> {
    let mut parts = text.split(':');
    let hour = parse_component(parts.next()?)?;
    let minute = parse_component(parts.next()?)?;

    if parts.next().is_some() {
        return None;
    }
    if hour > 23 || minute > 59 {
        return None;
    }

    Some(TimeOfDay { hour, minute })
}

/// ASCII digits only. `str::parse` on its own would accept a leading `+`.
fn parse_component(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Validate and parse in one step, the way the expanders consume time strings.
pub(crate) fn validated(text: &str) -> Option<TimeOfDay> {
    if !is_valid_time(text) {
        tracing::debug!(time = text, "rejecting malformed time of day");
        return None;
    }
    parse_time(text)
}
