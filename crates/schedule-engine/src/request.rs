//! Request dispatch and the injected schedule context.
//!
//! A [`ScheduleRequest`] is the caller-side declaration (tagged by
//! `scheduleType`), and a [`ScheduleContext`] carries everything the
//! expanders would otherwise read from the environment: the current instant,
//! the civil timezone, and the DST policy.
//!
//! [`expand_schedule`] keeps the total contract (invalid input → empty list).
//! [`try_expand_schedule`] is the strict adapter for callers that want to tell
//! the user *why* nothing was produced.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::calendar::{local_date, parse_weekdays};
use crate::dst::DstPolicy;
use crate::error::{Result, ScheduleError};
use crate::interval::DateInterval;
use crate::monthly::monthly_schedule_dates;
use crate::time::{is_valid_time, parse_time, TimeOfDay};
use crate::weekly::weekly_schedule_dates;

// ── ScheduleContext ─────────────────────────────────────────────────────────

/// The current instant and civil frame every expansion is computed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleContext {
    now: DateTime<Utc>,
    timezone: Tz,
    dst_policy: DstPolicy,
}

impl ScheduleContext {
    pub fn new(now: DateTime<Utc>, timezone: Tz) -> Self {
        Self {
            now,
            timezone,
            dst_policy: DstPolicy::default(),
        }
    }

    /// Build a context from an IANA timezone name.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTimezone`] if the name is not a known
    /// IANA timezone.
    pub fn from_timezone_name(now: DateTime<Utc>, timezone: &str) -> Result<Self> {
        let tz = timezone
            .parse::<Tz>()
            .map_err(|_| ScheduleError::InvalidTimezone(format!("'{timezone}'")))?;
        Ok(Self::new(now, tz))
    }

    pub fn with_dst_policy(mut self, dst_policy: DstPolicy) -> Self {
        self.dst_policy = dst_policy;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn timezone(&self) -> &Tz {
        &self.timezone
    }

    pub fn dst_policy(&self) -> DstPolicy {
        self.dst_policy
    }

    /// The civil date of `now` in the context timezone.
    pub fn today(&self) -> NaiveDate {
        local_date(self.now, &self.timezone)
    }
}

// ── ScheduleRequest ─────────────────────────────────────────────────────────

/// A doctor's availability declaration, discriminated by `scheduleType`.
///
/// Every field is optional on the wire so that incomplete form input still
/// deserializes and then expands to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheduleType", rename_all = "lowercase")]
pub enum ScheduleRequest {
    #[serde(rename_all = "camelCase")]
    Monthly {
        #[serde(default)]
        anchor_date: Option<NaiveDate>,
        #[serde(default)]
        start_time: Option<String>,
        #[serde(default)]
        end_time: Option<String>,
        #[serde(default)]
        repeat_monthly: bool,
    },
    #[serde(rename_all = "camelCase")]
    Weekly {
        #[serde(default)]
        weekdays: Vec<String>,
        #[serde(default)]
        start_time: Option<String>,
        #[serde(default)]
        end_time: Option<String>,
        #[serde(default)]
        repeat_weekly: bool,
    },
}

impl ScheduleRequest {
    fn times(&self) -> (Option<&str>, Option<&str>) {
        match self {
            ScheduleRequest::Monthly {
                start_time,
                end_time,
                ..
            }
            | ScheduleRequest::Weekly {
                start_time,
                end_time,
                ..
            } => (start_time.as_deref(), end_time.as_deref()),
        }
    }
}

/// Expand a request into concrete intervals. Invalid input yields `[]`.
pub fn expand_schedule(request: &ScheduleRequest, ctx: &ScheduleContext) -> Vec<DateInterval> {
    let (start_time, end_time) = request.times();
    match request {
        ScheduleRequest::Monthly {
            anchor_date,
            repeat_monthly,
            ..
        } => monthly_schedule_dates(*anchor_date, start_time, end_time, *repeat_monthly, ctx),
        ScheduleRequest::Weekly {
            weekdays,
            repeat_weekly,
            ..
        } => weekly_schedule_dates(weekdays, start_time, end_time, *repeat_weekly, ctx),
    }
}

/// Expand a request, naming the first reason it cannot produce intervals.
///
/// # Errors
///
/// - [`ScheduleError::MissingField`]: anchor date or a time is absent
/// - [`ScheduleError::InvalidTime`]: a time is not `H:MM`/`HH:MM` in range
/// - [`ScheduleError::NoValidWeekdays`]: no weekday name is recognized
/// - [`ScheduleError::InvertedRange`]: the start time is after the end time
/// - [`ScheduleError::EmptySchedule`]: input is well-formed but nothing
///   could be placed (e.g. every occurrence skipped by [`DstPolicy::Skip`])
pub fn try_expand_schedule(
    request: &ScheduleRequest,
    ctx: &ScheduleContext,
) -> Result<Vec<DateInterval>> {
    let (start_time, end_time) = request.times();

    match request {
        ScheduleRequest::Monthly { anchor_date, .. } => {
            anchor_date.ok_or(ScheduleError::MissingField("anchorDate"))?;
        }
        ScheduleRequest::Weekly { weekdays, .. } => {
            if parse_weekdays(weekdays).is_empty() {
                return Err(ScheduleError::NoValidWeekdays(weekdays.clone()));
            }
        }
    }

    let start_time = start_time.ok_or(ScheduleError::MissingField("startTime"))?;
    let end_time = end_time.ok_or(ScheduleError::MissingField("endTime"))?;
    let start = checked_time(start_time)?;
    let end = checked_time(end_time)?;
    if start > end {
        return Err(ScheduleError::InvertedRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let intervals = expand_schedule(request, ctx);
    if intervals.is_empty() {
        return Err(ScheduleError::EmptySchedule);
    }
    Ok(intervals)
}

fn checked_time(text: &str) -> Result<TimeOfDay> {
    if !is_valid_time(text) {
        return Err(ScheduleError::InvalidTime(format!("'{text}'")));
    }
    parse_time(text).ok_or_else(|| ScheduleError::InvalidTime(format!("'{text}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ctx() -> ScheduleContext {
        ScheduleContext::new(
            Utc.with_ymd_and_hms(2023, 10, 1, 16, 0, 0).unwrap(),
            chrono_tz::America::New_York,
        )
    }

    fn weekly(days: &[&str], start: &str, end: &str, repeat: bool) -> ScheduleRequest {
        ScheduleRequest::Weekly {
            weekdays: days.iter().map(|d| d.to_string()).collect(),
            start_time: Some(start.into()),
            end_time: Some(end.into()),
            repeat_weekly: repeat,
        }
    }

    // ── ScheduleContext ─────────────────────────────────────────────────

    #[test]
    fn test_context_from_timezone_name() {
        let c = ScheduleContext::from_timezone_name(ctx().now(), "Europe/London").unwrap();
        assert_eq!(*c.timezone(), chrono_tz::Europe::London);
        assert_eq!(c.dst_policy(), DstPolicy::ShiftForward);
    }

    #[test]
    fn test_context_invalid_timezone() {
        let err = ScheduleContext::from_timezone_name(ctx().now(), "Mars/Olympus").unwrap_err();
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_context_today_is_local() {
        let c = ScheduleContext::new(
            Utc.with_ymd_and_hms(2023, 10, 1, 16, 0, 0).unwrap(),
            chrono_tz::Asia::Tokyo,
        );
        assert_eq!(c.today(), NaiveDate::from_ymd_opt(2023, 10, 2).unwrap());
    }

    // ── Serde ───────────────────────────────────────────────────────────

    #[test]
    fn test_request_deserializes_weekly() {
        let json = r#"{
            "scheduleType": "weekly",
            "weekdays": ["monday", "friday"],
            "startTime": "09:00",
            "endTime": "12:00",
            "repeatWeekly": true
        }"#;
        let req: ScheduleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req, weekly(&["monday", "friday"], "09:00", "12:00", true));
    }

    #[test]
    fn test_request_deserializes_partial_monthly() {
        let json = r#"{ "scheduleType": "monthly", "anchorDate": "2023-10-01" }"#;
        let req: ScheduleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            req,
            ScheduleRequest::Monthly {
                anchor_date: NaiveDate::from_ymd_opt(2023, 10, 1),
                start_time: None,
                end_time: None,
                repeat_monthly: false,
            }
        );
        assert!(expand_schedule(&req, &ctx()).is_empty());
    }

    #[test]
    fn test_request_rejects_unknown_type() {
        let json = r#"{ "scheduleType": "daily" }"#;
        assert!(serde_json::from_str::<ScheduleRequest>(json).is_err());
    }

    #[test]
    fn test_request_serializes_tag() {
        let json = serde_json::to_value(weekly(&["monday"], "09:00", "10:00", false)).unwrap();
        assert_eq!(json["scheduleType"], "weekly");
        assert_eq!(json["repeatWeekly"], false);
    }

    // ── expand_schedule ─────────────────────────────────────────────────

    #[test]
    fn test_expand_dispatches_weekly() {
        let result = expand_schedule(&weekly(&["sunday"], "14:00", "15:00", true), &ctx());
        assert_eq!(result.len(), 52);
    }

    #[test]
    fn test_expand_dispatches_monthly() {
        let req = ScheduleRequest::Monthly {
            anchor_date: NaiveDate::from_ymd_opt(2023, 10, 1),
            start_time: Some("14:00".into()),
            end_time: Some("15:00".into()),
            repeat_monthly: true,
        };
        assert_eq!(expand_schedule(&req, &ctx()).len(), 12);
    }

    // ── try_expand_schedule ─────────────────────────────────────────────

    #[test]
    fn test_try_expand_ok() {
        let result = try_expand_schedule(&weekly(&["monday"], "09:00", "10:00", false), &ctx());
        assert_eq!(result.unwrap().len(), 1);
    }

    #[test]
    fn test_try_expand_missing_anchor() {
        let req = ScheduleRequest::Monthly {
            anchor_date: None,
            start_time: Some("14:00".into()),
            end_time: Some("15:00".into()),
            repeat_monthly: false,
        };
        assert_eq!(
            try_expand_schedule(&req, &ctx()),
            Err(ScheduleError::MissingField("anchorDate"))
        );
    }

    #[test]
    fn test_try_expand_missing_time() {
        let mut req = weekly(&["monday"], "09:00", "10:00", false);
        if let ScheduleRequest::Weekly { end_time, .. } = &mut req {
            *end_time = None;
        }
        assert_eq!(
            try_expand_schedule(&req, &ctx()),
            Err(ScheduleError::MissingField("endTime"))
        );
    }

    #[test]
    fn test_try_expand_invalid_time() {
        let err = try_expand_schedule(&weekly(&["monday"], "09:00", "24:00", false), &ctx());
        assert_eq!(err, Err(ScheduleError::InvalidTime("'24:00'".into())));
    }

    #[test]
    fn test_try_expand_no_weekdays() {
        let err = try_expand_schedule(&weekly(&["someday"], "09:00", "10:00", false), &ctx());
        assert_eq!(err, Err(ScheduleError::NoValidWeekdays(vec!["someday".into()])));
    }

    #[test]
    fn test_try_expand_inverted() {
        let err = try_expand_schedule(&weekly(&["monday"], "11:00", "10:00", false), &ctx());
        assert_eq!(
            err,
            Err(ScheduleError::InvertedRange {
                start: "11:00".into(),
                end: "10:00".into()
            })
        );
    }

    #[test]
    fn test_try_expand_everything_skipped() {
        // The only occurrence lands on the 2024-03-10 spring-forward gap.
        let c = ScheduleContext::new(
            Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap(),
            chrono_tz::America::New_York,
        )
        .with_dst_policy(DstPolicy::Skip);
        let req = weekly(&["sunday"], "02:15", "02:45", false);
        assert_eq!(try_expand_schedule(&req, &c), Err(ScheduleError::EmptySchedule));
    }
}
