//! Civil-calendar helpers.
//!
//! All date arithmetic happens on [`NaiveDate`] in the schedule's timezone and
//! only the final step turns a date plus a time of day into an instant. That
//! keeps a 14:00 slot at 14:00 local on both sides of a DST transition.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::{resolve_local, DstPolicy};
use crate::error::ScheduleError;
use crate::interval::DateInterval;
use crate::time::TimeOfDay;

// ── Weekday names ───────────────────────────────────────────────────────────

/// One of the seven lowercase day names a weekly schedule is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayName {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// Lookup table from name to weekday, indexed Sunday = 0.
const WEEKDAY_TABLE: [(&str, WeekdayName); 7] = [
    ("sunday", WeekdayName::Sunday),
    ("monday", WeekdayName::Monday),
    ("tuesday", WeekdayName::Tuesday),
    ("wednesday", WeekdayName::Wednesday),
    ("thursday", WeekdayName::Thursday),
    ("friday", WeekdayName::Friday),
    ("saturday", WeekdayName::Saturday),
];

impl WeekdayName {
    /// Map a lowercase day name; anything else is `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        WEEKDAY_TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, day)| day)
    }

    /// Index 0-6 with Sunday = 0.
    pub fn index(self) -> u32 {
        self.to_weekday().num_days_from_sunday()
    }

    pub fn name(self) -> &'static str {
        WEEKDAY_TABLE[self.index() as usize].0
    }

    pub fn to_weekday(self) -> Weekday {
        match self {
            WeekdayName::Sunday => Weekday::Sun,
            WeekdayName::Monday => Weekday::Mon,
            WeekdayName::Tuesday => Weekday::Tue,
            WeekdayName::Wednesday => Weekday::Wed,
            WeekdayName::Thursday => Weekday::Thu,
            WeekdayName::Friday => Weekday::Fri,
            WeekdayName::Saturday => Weekday::Sat,
        }
    }
}

impl fmt::Display for WeekdayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeekdayName {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ScheduleError::NoValidWeekdays(vec![s.to_string()]))
    }
}

/// Map names to weekdays, silently dropping unknown ones. Input order is kept.
pub fn parse_weekdays<S: AsRef<str>>(names: &[S]) -> Vec<WeekdayName> {
    names
        .iter()
        .filter_map(|n| {
            let day = WeekdayName::from_name(n.as_ref());
            if day.is_none() {
                tracing::debug!(name = n.as_ref(), "ignoring unknown weekday name");
            }
            day
        })
        .collect()
}

// ── Date arithmetic ─────────────────────────────────────────────────────────

/// The next date falling on `weekday`, strictly after `from`.
///
/// When `from` is already that weekday the result is a full week later.
/// `None` past the end of the representable calendar.
pub fn next_occurrence_after(from: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let current = u64::from(from.weekday().num_days_from_sunday());
    let target = u64::from(weekday.num_days_from_sunday());
    let days_ahead = (target + 7 - current) % 7;
    let days_ahead = if days_ahead == 0 { 7 } else { days_ahead };
    from.checked_add_days(Days::new(days_ahead))
}

/// `date` plus `months` calendar months, clamped to the last day of a shorter
/// month (January 31 + 1 month = February 28 or 29).
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// The civil date of `now` in `tz`.
pub fn local_date(now: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}

/// The first instant of `date` in `tz`.
///
/// Zones that spring forward at midnight start the day at the end of the gap.
pub fn start_of_day(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN);
    resolve_local(&midnight, tz, DstPolicy::ShiftForward).map(|dt| dt.with_timezone(&Utc))
}

/// Stamp a start and end time of day onto `date` in `tz`.
///
/// Returns `None` if either end cannot be placed under `policy`, or if the
/// resulting interval would end before it starts.
pub fn stamp_interval(
    date: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
    tz: &Tz,
    policy: DstPolicy,
) -> Option<DateInterval> {
    let start_time = resolve_local(&date.and_time(start.to_naive_time()), tz, policy)?;
    let end_time = resolve_local(&date.and_time(end.to_naive_time()), tz, policy)?;

    if start_time > end_time {
        tracing::debug!(%date, %start, %end, "dropping interval that ends before it starts");
        return None;
    }

    Some(DateInterval::new(
        start_time.with_timezone(&Utc),
        end_time.with_timezone(&Utc),
    ))
}
