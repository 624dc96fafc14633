//! Interval value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything that occupies a span of time: generated slots, stored rows,
/// bookings. The selectors in [`crate::upcoming`] are generic over it.
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
    fn end_time(&self) -> DateTime<Utc>;
}

/// A concrete dated slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateInterval {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl DateInterval {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Length in whole minutes (negative if the interval is inverted).
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Attach a location, producing the shape the overlap detector compares.
    pub fn at(self, location_id: impl Into<String>) -> LocatedInterval {
        LocatedInterval {
            interval: self,
            location_id: location_id.into(),
        }
    }
}

impl Scheduled for DateInterval {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }
}

/// An interval bound to the place it is offered. Intervals only conflict when
/// their `location_id`s match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatedInterval {
    #[serde(flatten)]
    pub interval: DateInterval,
    pub location_id: String,
}

impl Scheduled for LocatedInterval {
    fn start_time(&self) -> DateTime<Utc> {
        self.interval.start_time
    }

    fn end_time(&self) -> DateTime<Utc> {
        self.interval.end_time
    }
}

impl<T: Scheduled> Scheduled for &T {
    fn start_time(&self) -> DateTime<Utc> {
        (**self).start_time()
    }

    fn end_time(&self) -> DateTime<Utc> {
        (**self).end_time()
    }
}
