//! Expand a set of weekday names into the coming week's intervals, or a year
//! of weekly intervals.

use chrono::Days;

use crate::calendar::{next_occurrence_after, parse_weekdays, stamp_interval};
use crate::interval::DateInterval;
use crate::request::ScheduleContext;
use crate::time::validated;

/// Number of weekly iterations produced when repetition is on.
pub const WEEKS_PER_YEAR: u64 = 52;

/// Expand a weekly availability declaration.
///
/// For each known name in `weekdays`, finds the next occurrence of that
/// weekday strictly after today (today is never included, even when it
/// matches) and stamps `start_time`-`end_time` onto it. With `repeat_weekly`
/// the same is done from anchors `today + 0..52` weeks.
///
/// Unknown names are skipped. An empty `weekdays` slice, missing or malformed
/// times, or a set with no known name yields an empty list. The result is
/// sorted ascending by start time regardless of input order.
///
/// # Examples
///
/// ```
/// use chrono::{Datelike, TimeZone, Utc};
/// use schedule_engine::{weekly_schedule_dates, ScheduleContext};
///
/// // Sunday 2023-10-01.
/// let ctx = ScheduleContext::new(Utc.with_ymd_and_hms(2023, 10, 1, 12, 0, 0).unwrap(), chrono_tz::UTC);
/// let slots = weekly_schedule_dates(&["sunday"], Some("14:00"), Some("15:00"), false, &ctx);
///
/// assert_eq!(slots.len(), 1);
/// assert_eq!(slots[0].start_time.day(), 8);
/// ```
pub fn weekly_schedule_dates<S: AsRef<str>>(
    weekdays: &[S],
    start_time: Option<&str>,
    end_time: Option<&str>,
    repeat_weekly: bool,
    ctx: &ScheduleContext,
) -> Vec<DateInterval> {
    let (Some(start_time), Some(end_time)) = (start_time, end_time) else {
        tracing::debug!("weekly schedule missing start or end time");
        return Vec::new();
    };
    if weekdays.is_empty() {
        tracing::debug!("weekly schedule has no weekdays");
        return Vec::new();
    }
    let (Some(start), Some(end)) = (validated(start_time), validated(end_time)) else {
        return Vec::new();
    };

    let days = parse_weekdays(weekdays);
    if days.is_empty() {
        tracing::debug!(requested = weekdays.len(), "weekly schedule has no known weekdays");
        return Vec::new();
    }

    let today = ctx.today();
    let weeks = if repeat_weekly { WEEKS_PER_YEAR } else { 1 };

    let mut intervals: Vec<DateInterval> = (0..weeks)
        .filter_map(|week| today.checked_add_days(Days::new(week * 7)))
        .flat_map(|anchor| {
            days.iter()
                .filter_map(move |day| next_occurrence_after(anchor, day.to_weekday()))
        })
        .filter_map(|date| stamp_interval(date, start, end, ctx.timezone(), ctx.dst_policy()))
        .collect();

    intervals.sort_by_key(|i| i.start_time);

    tracing::debug!(
        %today,
        repeat_weekly,
        weekdays = days.len(),
        count = intervals.len(),
        "expanded weekly schedule"
    );
    intervals
}
