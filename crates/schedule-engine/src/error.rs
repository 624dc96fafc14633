//! Error types for schedule-engine operations.
//!
//! The expanders themselves never fail: invalid input yields an empty list.
//! These errors are produced only by the strict adapters at the boundary.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("No valid weekdays in {0:?}")]
    NoValidWeekdays(Vec<String>),

    #[error("Start time {start} is after end time {end}")]
    InvertedRange { start: String, end: String },

    #[error("Schedule produced no intervals")]
    EmptySchedule,
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
