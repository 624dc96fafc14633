//! # schedule-engine
//!
//! Deterministic availability expansion for appointment booking.
//!
//! Turns a doctor's availability declaration (a single date repeated monthly,
//! or a set of weekdays repeated weekly) into concrete dated intervals, detects
//! overlap between intervals at the same location, and selects the slots that
//! are still bookable. Every function is pure: the caller injects "now" and the
//! civil timezone through a [`ScheduleContext`].
//!
//! ## Modules
//!
//! - [`time`] — `"HH:MM"` validation and parsing
//! - [`calendar`] — Civil-calendar helpers: weekday table, next occurrence, month addition
//! - [`dst`] — DST gap/overlap policy for stamping wall-clock times
//! - [`interval`] — Interval value types and the [`Scheduled`] trait
//! - [`monthly`] — Single date → one or twelve monthly intervals
//! - [`weekly`] — Weekday set → one week or fifty-two weeks of intervals
//! - [`conflict`] — Same-location overlap detection
//! - [`upcoming`] — Upcoming and next-date slot selection
//! - [`request`] — Request dispatch, injected clock, strict adapter
//! - [`error`] — Error types

pub mod calendar;
pub mod conflict;
pub mod dst;
pub mod error;
pub mod interval;
pub mod monthly;
pub mod request;
pub mod time;
pub mod upcoming;
pub mod weekly;

pub use calendar::WeekdayName;
pub use conflict::{find_conflicts, has_conflict, is_overlapping, Conflict};
pub use dst::DstPolicy;
pub use error::ScheduleError;
pub use interval::{DateInterval, LocatedInterval, Scheduled};
pub use monthly::monthly_schedule_dates;
pub use request::{expand_schedule, try_expand_schedule, ScheduleContext, ScheduleRequest};
pub use time::{is_valid_time, parse_time, TimeOfDay};
pub use upcoming::{next_date_schedules, upcoming_schedules};
pub use weekly::weekly_schedule_dates;
