//! Expand a single availability date into one interval, or one per month for
//! a year.

use chrono::NaiveDate;

use crate::calendar::{add_months, stamp_interval};
use crate::interval::DateInterval;
use crate::request::ScheduleContext;
use crate::time::validated;

/// Number of monthly occurrences produced when repetition is on.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Expand a monthly availability declaration.
///
/// Stamps `start_time`-`end_time` onto `anchor_date` in the context timezone.
/// With `repeat_monthly` the same slot is produced for the anchor month and
/// the eleven that follow, the day of month clamped for shorter months.
///
/// Total over its input: a missing field, a malformed time, or a start after
/// the end yields an empty list. Output is month-ascending.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use schedule_engine::{monthly_schedule_dates, ScheduleContext};
///
/// let ctx = ScheduleContext::new(Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap(), chrono_tz::UTC);
/// let anchor = NaiveDate::from_ymd_opt(2023, 10, 1);
///
/// let once = monthly_schedule_dates(anchor, Some("14:00"), Some("15:00"), false, &ctx);
/// assert_eq!(once.len(), 1);
///
/// let yearly = monthly_schedule_dates(anchor, Some("14:00"), Some("15:00"), true, &ctx);
/// assert_eq!(yearly.len(), 12);
/// ```
pub fn monthly_schedule_dates(
    anchor_date: Option<NaiveDate>,
    start_time: Option<&str>,
    end_time: Option<&str>,
    repeat_monthly: bool,
    ctx: &ScheduleContext,
) -> Vec<DateInterval> {
    let (Some(anchor), Some(start_time), Some(end_time)) = (anchor_date, start_time, end_time)
    else {
        tracing::debug!("monthly schedule missing anchor date or times");
        return Vec::new();
    };
    let (Some(start), Some(end)) = (validated(start_time), validated(end_time)) else {
        return Vec::new();
    };

    let months = if repeat_monthly { MONTHS_PER_YEAR } else { 1 };

    let intervals: Vec<DateInterval> = (0..months)
        .filter_map(|offset| add_months(anchor, offset))
        .filter_map(|date| stamp_interval(date, start, end, ctx.timezone(), ctx.dst_policy()))
        .collect();

    tracing::debug!(
        %anchor,
        repeat_monthly,
        count = intervals.len(),
        "expanded monthly schedule"
    );
    intervals
}
