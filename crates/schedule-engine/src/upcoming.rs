//! Select the slots that are still bookable.

use chrono::{DateTime, Utc};

use crate::calendar::start_of_day;
use crate::interval::Scheduled;
use crate::request::ScheduleContext;

/// Keep every interval that has not ended yet (`end > now`), in input order.
pub fn upcoming_schedules<T: Scheduled + Clone>(intervals: &[T], now: DateTime<Utc>) -> Vec<T> {
    intervals
        .iter()
        .filter(|i| i.end_time() > now)
        .cloned()
        .collect()
}

/// Keep today's intervals that have not ended yet, sorted by start time.
///
/// "Today" is the civil date of `ctx.now()` in the context timezone: an
/// interval qualifies when it starts at or after local midnight, starts before
/// the next local midnight, and ends after now.
///
/// Intervals on later days are never returned, even when today has nothing
/// left; the result is then empty.
pub fn next_date_schedules<T: Scheduled + Clone>(intervals: &[T], ctx: &ScheduleContext) -> Vec<T> {
    if intervals.is_empty() {
        return Vec::new();
    }

    let now = ctx.now();
    let today = ctx.today();
    let tz = ctx.timezone();
    let bounds = today.succ_opt().and_then(|tomorrow| {
        // Next civil midnight, not +24h: DST days are 23 or 25 hours long.
        Some((start_of_day(today, tz)?, start_of_day(tomorrow, tz)?))
    });
    let Some((start_of_today, start_of_tomorrow)) = bounds else {
        tracing::debug!(%today, "cannot place today's bounds in timezone");
        return Vec::new();
    };

    let mut selected: Vec<T> = intervals
        .iter()
        .filter(|i| {
            let start = i.start_time();
            start >= start_of_today && i.end_time() > now && start < start_of_tomorrow
        })
        .cloned()
        .collect();

    selected.sort_by_key(|i| i.start_time());
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::DateInterval;
    use chrono::{TimeDelta, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn slot(offset_hours: i64, length_hours: i64) -> DateInterval {
        let start = now() + TimeDelta::hours(offset_hours);
        DateInterval::new(start, start + TimeDelta::hours(length_hours))
    }

    // ── upcoming_schedules ──────────────────────────────────────────────

    #[test]
    fn test_upcoming_keeps_unfinished_in_order() {
        let input = vec![slot(30, 1), slot(-3, 1), slot(-1, 2), slot(2, 1)];
        let result = upcoming_schedules(&input, now());
        assert_eq!(result, vec![input[0], input[2], input[3]]);
    }

    #[test]
    fn test_upcoming_excludes_ending_exactly_now() {
        let input = vec![slot(-1, 1)];
        assert!(upcoming_schedules(&input, now()).is_empty());
    }

    // ── next_date_schedules ─────────────────────────────────────────────

    #[test]
    fn test_next_date_empty_input() {
        let ctx = ScheduleContext::new(now(), chrono_tz::UTC);
        let empty: Vec<DateInterval> = Vec::new();
        assert!(next_date_schedules(&empty, &ctx).is_empty());
    }

    #[test]
    fn test_next_date_all_past() {
        let ctx = ScheduleContext::new(now(), chrono_tz::UTC);
        let input = vec![slot(-30, 1), slot(-5, 2), slot(-2, 2)];
        assert!(next_date_schedules(&input, &ctx).is_empty());
    }

    #[test]
    fn test_next_date_keeps_only_today_remaining_sorted() {
        let ctx = ScheduleContext::new(now(), chrono_tz::UTC);
        let input = vec![
            slot(48, 1), // day after tomorrow
            slot(5, 1),  // today 17:00
            slot(-4, 1), // today 08:00, already over
            slot(1, 1),  // today 13:00
            slot(-1, 2), // today 11:00, still running
        ];
        let result = next_date_schedules(&input, &ctx);
        assert_eq!(result, vec![input[4], input[3], input[1]]);
    }

    #[test]
    fn test_next_date_excludes_tomorrow_when_today_exhausted() {
        let ctx = ScheduleContext::new(now(), chrono_tz::UTC);
        let input = vec![slot(-2, 1), slot(14, 1)];
        assert!(next_date_schedules(&input, &ctx).is_empty());
    }

    #[test]
    fn test_next_date_uses_local_day() {
        // 12:00 UTC is 21:00 in Tokyo; 15:00 UTC is already tomorrow there.
        let ctx = ScheduleContext::new(now(), chrono_tz::Asia::Tokyo);
        let input = vec![slot(1, 1), slot(3, 1)];
        let result = next_date_schedules(&input, &ctx);
        assert_eq!(result, vec![input[0]]);
    }

    fn utc_slot(m: u32, d: u32, h: u32, min: u32) -> DateInterval {
        let start = Utc.with_ymd_and_hms(2024, m, d, h, min, 0).unwrap();
        DateInterval::new(start, start + TimeDelta::minutes(30))
    }

    #[test]
    fn test_next_date_fall_back_day_is_25_hours() {
        // 2024-11-03 in New York runs from 04:00Z to 05:00Z the next day.
        let now = Utc.with_ymd_and_hms(2024, 11, 3, 15, 0, 0).unwrap();
        let ctx = ScheduleContext::new(now, chrono_tz::America::New_York);
        let late_evening = utc_slot(11, 4, 4, 30); // 23:30 EST
        let next_midnight = utc_slot(11, 4, 5, 0); // 00:00 EST on the 4th

        let result = next_date_schedules(&[next_midnight, late_evening], &ctx);
        assert_eq!(result, vec![late_evening]);
    }

    #[test]
    fn test_next_date_spring_forward_day_is_23_hours() {
        // 2024-03-10 in New York runs from 05:00Z to 04:00Z the next day.
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap();
        let ctx = ScheduleContext::new(now, chrono_tz::America::New_York);
        let late_evening = utc_slot(3, 11, 3, 30); // 23:30 EDT
        let next_midnight = utc_slot(3, 11, 4, 0); // 00:00 EDT on the 11th

        let result = next_date_schedules(&[next_midnight, late_evening], &ctx);
        assert_eq!(result, vec![late_evening]);
    }
}
