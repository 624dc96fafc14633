//! DST transition policies for stamping wall-clock times.
//!
//! A civil date plus a time of day does not always name exactly one instant:
//! spring-forward gaps have none and fall-back overlaps have two. The policy
//! decides what an occurrence inside a gap becomes. Overlaps always resolve to
//! the earlier instant.

use chrono::{DateTime, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// What to do with a wall-clock time that falls in a spring-forward gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DstPolicy {
    /// Move the time forward by the length of the gap (02:30 becomes 03:30
    /// on a one-hour spring-forward night).
    #[default]
    ShiftForward,
    /// Drop the occurrence.
    Skip,
}

/// Resolve a local wall-clock datetime in `tz` to an instant under `policy`.
///
/// Returns `None` only when the policy is [`DstPolicy::Skip`] and the time does
/// not exist, or when the timezone data cannot place it at all.
pub fn resolve_local(naive: &NaiveDateTime, tz: &Tz, policy: DstPolicy) -> Option<DateTime<Tz>> {
    if let Some(dt) = tz.from_local_datetime(naive).earliest() {
        return Some(dt);
    }

    match policy {
        DstPolicy::Skip => {
            tracing::trace!(%naive, timezone = %tz, "skipping nonexistent local time");
            None
        }
        DstPolicy::ShiftForward => {
            // Apply the offset in force before the gap; the resulting instant
            // lands the same distance past the transition.
            let before = *naive - TimeDelta::days(1);
            let offset = tz.offset_from_local_datetime(&before).earliest()?.fix();
            let utc = *naive - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
            let shifted = tz.from_utc_datetime(&utc);
            tracing::trace!(%naive, %shifted, "shifted local time out of DST gap");
            Some(shifted)
        }
    }
}
