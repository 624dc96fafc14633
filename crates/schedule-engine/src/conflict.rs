//! Detect overlapping intervals at the same location.
//!
//! Intervals are half-open: one that starts exactly when another ends does not
//! conflict with it, and a zero-length interval conflicts with nothing.

use serde::Serialize;

use crate::interval::LocatedInterval;

/// A stored interval and a candidate that overlaps it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub existing: LocatedInterval,
    pub candidate: LocatedInterval,
    pub overlap_minutes: i64,
}

/// Whether `candidate` overlaps `existing`.
///
/// Different locations never overlap, and neither does an interval with no
/// interior (`start >= end`). Otherwise the intervals overlap iff
/// `candidate.start < existing.end && candidate.end > existing.start`.
pub fn is_overlapping(existing: &LocatedInterval, candidate: &LocatedInterval) -> bool {
    if existing.location_id != candidate.location_id {
        return false;
    }

    let existing = &existing.interval;
    let candidate = &candidate.interval;
    if existing.start_time >= existing.end_time || candidate.start_time >= candidate.end_time {
        return false;
    }
    candidate.start_time < existing.end_time && candidate.end_time > existing.start_time
}

/// Whether `candidate` overlaps any of `existing`.
pub fn has_conflict(existing: &[LocatedInterval], candidate: &LocatedInterval) -> bool {
    existing.iter().any(|e| is_overlapping(e, candidate))
}

/// Find every (existing, candidate) pair that overlaps.
///
/// The overlap duration is `min(ends) - max(starts)`. Pairs are reported in
/// candidate order, then existing order.
pub fn find_conflicts(
    existing: &[LocatedInterval],
    candidates: &[LocatedInterval],
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for candidate in candidates {
        for stored in existing {
            if !is_overlapping(stored, candidate) {
                continue;
            }
            let overlap_start = stored.interval.start_time.max(candidate.interval.start_time);
            let overlap_end = stored.interval.end_time.min(candidate.interval.end_time);

            conflicts.push(Conflict {
                existing: stored.clone(),
                candidate: candidate.clone(),
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            });
        }
    }

    if !conflicts.is_empty() {
        tracing::debug!(count = conflicts.len(), "found conflicting intervals");
    }
    conflicts
}
