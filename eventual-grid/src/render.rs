use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::layout::adjust;
use crate::{
    resolve, segment, EventRange, GridSegment, LayoutConfig, MonthGrid, MonthRef, Result,
    RowLayout,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayCell {
    pub day_number: u32,
    pub iso_date: NaiveDate,
}

/// A segment ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedSegment {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub segment: GridSegment,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub link: Option<String>,
    pub stack_level: u32,
    pub visual_slot: u32,
    pub vertical_offset: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonthView {
    pub grid: MonthGrid,
    /// e.g. `February 2024`
    pub title: String,
    /// Weekday of each column, left to right.
    pub weekdays: [Weekday; 7],
    pub day_cells: Vec<DayCell>,
    pub event_segments: Vec<PlacedSegment>,
    pub row_layouts: Vec<RowLayout>,
    pub previous: Option<MonthRef>,
    pub next: Option<MonthRef>,
}

/// Lays out `events` on the grid of `month` in `year`.
///
/// Events outside the month are skipped, events crossing its edges are
/// clipped. Every row of the grid gets a [`RowLayout`], including empty ones.
pub fn render_month(
    year: i32,
    month: u32,
    events: &[EventRange],
    config: &LayoutConfig,
) -> Result<MonthView> {
    let grid = MonthGrid::build(year, month, config.first_day_of_week)?;
    let current = MonthRef::new(year, month)?;

    let day_cells = grid
        .days()
        .map(|date| DayCell {
            day_number: date.day(),
            iso_date: date,
        })
        .collect();

    let mut rows: BTreeMap<u32, Vec<(GridSegment, &EventRange)>> =
        (1..=grid.total_rows).map(|row| (row, Vec::new())).collect();

    for event in events {
        for piece in segment(event, &grid) {
            rows.entry(piece.row).or_default().push((piece, event));
        }
    }

    let mut event_segments = Vec::new();
    let mut row_layouts = Vec::with_capacity(rows.len());

    for (row, mut pieces) in rows {
        let segments: Vec<GridSegment> = pieces.iter().map(|(piece, _)| *piece).collect();
        let assignments = resolve(&segments);
        let (layout, offsets) = adjust(row, &assignments, config);

        if layout.max_stack_level > 0 {
            tracing::debug!(
                row,
                max_stack_level = layout.max_stack_level,
                additional_height = layout.additional_height,
                "expanding row"
            );
        }

        for (assignment, offset) in assignments.iter().zip(offsets) {
            let Some(position) = pieces
                .iter()
                .position(|(piece, _)| *piece == assignment.segment)
            else {
                continue;
            };
            let (_, event) = pieces.swap_remove(position);

            event_segments.push(PlacedSegment {
                segment: assignment.segment,
                title: event.title().to_string(),
                link: event
                    .link()
                    .filter(|_| config.link_to_events)
                    .map(str::to_string),
                stack_level: assignment.level,
                visual_slot: offset.visual_slot,
                vertical_offset: offset.vertical_offset,
            });
        }

        row_layouts.push(layout);
    }

    tracing::debug!(
        month = %current,
        events = events.len(),
        segments = event_segments.len(),
        "rendered month"
    );

    let (previous, next) = if config.navigation_links {
        (current.previous(), current.next())
    } else {
        (None, None)
    };

    Ok(MonthView {
        title: grid.first_day().format("%B %Y").to_string(),
        weekdays: column_weekdays(config.first_day_of_week),
        grid,
        day_cells,
        event_segments,
        row_layouts,
        previous,
        next,
    })
}

fn column_weekdays(first_day_of_week: Weekday) -> [Weekday; 7] {
    let mut weekday = first_day_of_week;
    std::array::from_fn(|_| {
        let column = weekday;
        weekday = weekday.succ();
        column
    })
}
