#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{EventId, GridSegment};

/// The lane a segment was given within its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StackAssignment {
    pub segment: GridSegment,
    pub level: u32,
}

/// Assigns every segment the lowest stack level at which it collides with no
/// segment already placed.
///
/// Segments are placed left to right; among segments starting in the same
/// column the narrower one is placed first and therefore gets the lower level.
/// Segments that tie on both keep their input order. The result is in
/// placement order.
#[must_use]
pub fn resolve(segments: &[GridSegment]) -> Vec<StackAssignment> {
    let mut ordered = segments.to_vec();
    ordered.sort_by_key(|segment| (segment.column_start, segment.column_span));

    let mut placed: Vec<StackAssignment> = Vec::with_capacity(ordered.len());

    for segment in ordered {
        let mut level = 0;
        while placed
            .iter()
            .any(|other| other.level == level && other.segment.overlaps(&segment))
        {
            level += 1;
        }

        tracing::trace!(
            event = %segment.event_id,
            row = segment.row,
            level,
            "placed segment"
        );
        placed.push(StackAssignment { segment, level });
    }

    placed
}

/// Level given to `event_id`'s segment in `row`.
#[must_use]
pub fn level_of(assignments: &[StackAssignment], event_id: EventId, row: u32) -> Option<u32> {
    assignments
        .iter()
        .find(|assignment| {
            assignment.segment.event_id == event_id && assignment.segment.row == row
        })
        .map(|assignment| assignment.level)
}
