use chrono::Datelike;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::date::weekday_index;
use crate::{EventId, EventRange, MonthGrid};

/// The part of an event that falls into one week row.
///
/// Columns are 1-based and `column_start + column_span - 1 <= 7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSegment {
    pub event_id: EventId,
    pub row: u32,
    pub column_start: u32,
    pub column_span: u32,
}

impl GridSegment {
    /// Exclusive end column.
    #[must_use]
    pub fn column_end(&self) -> u32 {
        self.column_start + self.column_span
    }

    /// Two segments collide when they share a row and their half-open column
    /// ranges intersect.
    #[must_use]
    pub fn overlaps(&self, other: &GridSegment) -> bool {
        self.row == other.row
            && self.column_start < other.column_end()
            && other.column_start < self.column_end()
    }
}

/// Splits `event` into one segment per week row it touches in `grid`.
///
/// The event is clipped to the month first, so an event that starts before or
/// ends after the month only contributes its in-month days. An event that lies
/// entirely outside the month yields no segments.
#[must_use]
pub fn segment(event: &EventRange, grid: &MonthGrid) -> Vec<GridSegment> {
    let start = event.start().max(grid.first_day());
    let end = event.end().min(grid.last_day());

    if start > end {
        return Vec::new();
    }

    let start_week = grid.row_of(start.day());
    let end_week = grid.row_of(end.day());
    let start_column = weekday_index(start, grid.first_day_of_week) + 1;
    let end_column = weekday_index(end, grid.first_day_of_week) + 1;

    (start_week..=end_week)
        .map(|row| {
            let column_start = if row > start_week { 1 } else { start_column };
            let column_end = if row < end_week { 7 } else { end_column };

            GridSegment {
                event_id: event.id(),
                row,
                column_start,
                column_span: column_end - column_start + 1,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(start: NaiveDate, end: NaiveDate) -> EventRange {
        EventRange::new(EventId(1), "Event", start, Some(end))
    }

    fn february() -> MonthGrid {
        MonthGrid::build(2024, 2, Weekday::Sun).unwrap()
    }

    fn spans(segments: &[GridSegment]) -> Vec<(u32, u32, u32)> {
        segments
            .iter()
            .map(|s| (s.row, s.column_start, s.column_span))
            .collect()
    }

    #[test]
    fn single_day() {
        let segments = segment(&event(date(2024, 2, 14), date(2024, 2, 14)), &february());
        assert_eq!(spans(&segments), [(3, 4, 1)]);
    }

    #[test]
    fn several_days_in_one_week() {
        let segments = segment(&event(date(2024, 2, 12), date(2024, 2, 15)), &february());
        assert_eq!(spans(&segments), [(3, 2, 4)]);
    }

    #[test]
    fn crosses_a_week_boundary() {
        // Friday the 9th through Tuesday the 13th.
        let segments = segment(&event(date(2024, 2, 9), date(2024, 2, 13)), &february());
        assert_eq!(spans(&segments), [(2, 6, 2), (3, 1, 3)]);
    }

    #[test]
    fn spans_full_middle_weeks() {
        let segments = segment(&event(date(2024, 2, 2), date(2024, 2, 20)), &february());
        assert_eq!(spans(&segments), [(1, 6, 2), (2, 1, 7), (3, 1, 7), (4, 1, 3)]);
    }

    #[test]
    fn clipped_at_the_end_of_the_month() {
        let segments = segment(&event(date(2024, 2, 28), date(2024, 3, 2)), &february());
        assert_eq!(spans(&segments), [(5, 4, 2)]);
    }

    #[test]
    fn clipped_at_the_start_of_the_month() {
        let segments = segment(&event(date(2024, 1, 29), date(2024, 2, 3)), &february());
        assert_eq!(spans(&segments), [(1, 5, 3)]);
    }

    #[test]
    fn outside_the_month() {
        let segments = segment(&event(date(2024, 3, 2), date(2024, 3, 4)), &february());
        assert!(segments.is_empty());

        let segments = segment(&event(date(2023, 2, 2), date(2023, 2, 4)), &february());
        assert!(segments.is_empty());
    }

    #[test]
    fn monday_start_moves_sunday_to_the_last_column() {
        let grid = MonthGrid::build(2024, 2, Weekday::Mon).unwrap();
        // Saturday the 10th through Monday the 12th.
        let segments = segment(&event(date(2024, 2, 10), date(2024, 2, 12)), &grid);
        assert_eq!(spans(&segments), [(2, 6, 2), (3, 1, 1)]);
    }

    #[test]
    fn overlap_predicate() {
        let a = GridSegment {
            event_id: EventId(1),
            row: 2,
            column_start: 1,
            column_span: 2,
        };
        let touching = GridSegment {
            column_start: 3,
            ..a
        };
        let crossing = GridSegment {
            column_start: 2,
            ..a
        };
        let other_row = GridSegment { row: 3, ..a };

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&crossing));
        assert!(crossing.overlaps(&a));
        assert!(!a.overlaps(&other_row));
    }
}
