use chrono::Weekday;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{EventId, StackAssignment};

/// Rendering parameters.
///
/// Heights and offsets are plain numbers in whatever unit the caller renders
/// with (the defaults assume `em`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LayoutConfig {
    pub first_day_of_week: Weekday,
    pub base_row_height: f64,
    /// Height of one stacked lane, event plus spacing.
    pub level_unit_height: f64,
    /// Distance of the top-most lane from the bottom edge of the row.
    pub base_offset: f64,
    /// Whether rendered months carry previous/next links.
    pub navigation_links: bool,
    /// Whether placed segments keep their event's link.
    pub link_to_events: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            first_day_of_week: Weekday::Sun,
            base_row_height: 20.0,
            level_unit_height: 2.0,
            base_offset: 0.5,
            navigation_links: true,
            link_to_events: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowLayout {
    pub row: u32,
    pub max_stack_level: u32,
    pub additional_height: f64,
    pub height: f64,
}

/// Where one segment is drawn within its row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotOffset {
    pub event_id: EventId,
    pub level: u32,
    /// `max_stack_level - level`: level 0 ends up in the highest slot.
    pub visual_slot: u32,
    /// Measured upward from the bottom edge of the row.
    pub vertical_offset: f64,
}

/// Computes how much a row has to grow to fit its stacked segments and where
/// each of them is drawn. Assignments belonging to other rows are ignored.
#[must_use]
pub fn adjust(
    row: u32,
    assignments: &[StackAssignment],
    config: &LayoutConfig,
) -> (RowLayout, Vec<SlotOffset>) {
    let in_row = || assignments.iter().filter(move |a| a.segment.row == row);

    let max_stack_level = in_row().map(|a| a.level).max().unwrap_or(0);
    let additional_height = f64::from(max_stack_level) * config.level_unit_height;

    let offsets = in_row()
        .map(|assignment| {
            let visual_slot = max_stack_level - assignment.level;
            SlotOffset {
                event_id: assignment.segment.event_id,
                level: assignment.level,
                visual_slot,
                vertical_offset: config.base_offset
                    + f64::from(visual_slot) * config.level_unit_height,
            }
        })
        .collect();

    let layout = RowLayout {
        row,
        max_stack_level,
        additional_height,
        height: config.base_row_height + additional_height,
    };

    (layout, offsets)
}
