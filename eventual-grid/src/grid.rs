use chrono::{Datelike, NaiveDate, Weekday};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::date::{first_of_month, last_of_month, weekday_index};
use crate::{Error, Result};

/// Shape of one month laid out in week rows of seven columns.
///
/// Deserializing only reads `year`, `month` and `first_day_of_week`; the
/// derived fields are always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRecord"))]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub first_day_of_week: Weekday,
    pub leading_empty_cells: u32,
    pub trailing_empty_cells: u32,
    pub day_count: u32,
    pub total_rows: u32,
}

/// A 1-based grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub row: u32,
    pub column: u32,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct GridRecord {
    year: i32,
    month: u32,
    first_day_of_week: Weekday,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRecord> for MonthGrid {
    type Error = Error;

    fn try_from(record: GridRecord) -> Result<Self> {
        Self::build(record.year, record.month, record.first_day_of_week)
    }
}

impl MonthGrid {
    pub fn build(year: i32, month: u32, first_day_of_week: Weekday) -> Result<Self> {
        let (Some(first), Some(last)) = (first_of_month(year, month), last_of_month(year, month))
        else {
            return Err(Error::InvalidDate(format!(
                "{year:04}-{month:02} is not a supported month"
            )));
        };

        let leading_empty_cells = weekday_index(first, first_day_of_week);
        let trailing_empty_cells = 6 - weekday_index(last, first_day_of_week);
        let day_count = last.day();
        let total_rows = (leading_empty_cells + day_count + trailing_empty_cells).div_ceil(7);

        Ok(Self {
            year,
            month,
            first_day_of_week,
            leading_empty_cells,
            trailing_empty_cells,
            day_count,
            total_rows,
        })
    }

    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        self.day(1)
    }

    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.day(self.day_count)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Row and column holding `date`, or `None` outside this month.
    #[must_use]
    pub fn cell_of(&self, date: NaiveDate) -> Option<Cell> {
        self.contains(date).then(|| Cell {
            row: self.row_of(date.day()),
            column: weekday_index(date, self.first_day_of_week) + 1,
        })
    }

    /// Every day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first_day().iter_days().take(self.day_count as usize)
    }

    pub(crate) fn row_of(&self, day_of_month: u32) -> u32 {
        (day_of_month + self.leading_empty_cells).div_ceil(7)
    }

    fn day(&self, day: u32) -> NaiveDate {
        // `build` validated every day in 1..=day_count.
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or(NaiveDate::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn february_2024_sunday_start() {
        let grid = MonthGrid::build(2024, 2, Weekday::Sun).unwrap();

        assert_eq!(grid.leading_empty_cells, 4);
        assert_eq!(grid.day_count, 29);
        assert_eq!(grid.trailing_empty_cells, 2);
        assert_eq!(grid.total_rows, 5);
    }

    #[test]
    fn february_2024_monday_start() {
        let grid = MonthGrid::build(2024, 2, Weekday::Mon).unwrap();

        assert_eq!(grid.leading_empty_cells, 3);
        assert_eq!(grid.trailing_empty_cells, 3);
        assert_eq!(grid.total_rows, 5);
    }

    #[test]
    fn four_row_month() {
        // February 2015 starts on a Sunday and has 28 days.
        let grid = MonthGrid::build(2015, 2, Weekday::Sun).unwrap();

        assert_eq!(grid.leading_empty_cells, 0);
        assert_eq!(grid.trailing_empty_cells, 0);
        assert_eq!(grid.total_rows, 4);
    }

    #[test]
    fn six_row_month() {
        // March 2025 starts on a Saturday and has 31 days.
        let grid = MonthGrid::build(2025, 3, Weekday::Sun).unwrap();

        assert_eq!(grid.leading_empty_cells, 6);
        assert_eq!(grid.total_rows, 6);
    }

    #[test]
    fn rejects_unsupported_months() {
        assert!(matches!(
            MonthGrid::build(2024, 0, Weekday::Sun),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            MonthGrid::build(2024, 13, Weekday::Sun),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            MonthGrid::build(0, 6, Weekday::Sun),
            Err(Error::InvalidDate(_))
        ));
        assert!(MonthGrid::build(1, 1, Weekday::Sun).is_ok());
    }

    #[test]
    fn cells_cover_the_month() {
        let grid = MonthGrid::build(2024, 2, Weekday::Sun).unwrap();

        let first = grid.cell_of(grid.first_day()).unwrap();
        assert_eq!(first, Cell { row: 1, column: 5 });

        let last = grid.cell_of(grid.last_day()).unwrap();
        assert_eq!(last, Cell { row: 5, column: 5 });

        let outside = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(grid.cell_of(outside), None);

        assert_eq!(grid.days().count(), 29);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializing_recomputes_the_shape() {
        let json = r#"{
            "year": 2024,
            "month": 2,
            "first_day_of_week": "Sun",
            "leading_empty_cells": 0,
            "trailing_empty_cells": 0,
            "day_count": 3,
            "total_rows": 1
        }"#;

        let grid: MonthGrid = serde_json::from_str(json).unwrap();
        assert_eq!(grid, MonthGrid::build(2024, 2, Weekday::Sun).unwrap());

        let start = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 4).unwrap();
        let event = crate::EventRange::new(crate::EventId(1), "Weekend", start, Some(end));
        let segments = crate::segment(&event, &grid);

        assert_eq!(segments.len(), 2);
        assert_eq!((segments[0].row, segments[0].column_start), (1, 7));
        assert_eq!((segments[1].row, segments[1].column_start), (2, 1));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializing_rejects_unsupported_months() {
        let json = r#"{"year": 2024, "month": 13, "first_day_of_week": "Mon"}"#;
        assert!(serde_json::from_str::<MonthGrid>(json).is_err());
    }
}
