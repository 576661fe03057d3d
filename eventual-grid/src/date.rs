use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::{Error, Result};

/// Position of `date` within a week that starts on `first_day_of_week`,
/// `0` being the first column of the grid and `6` the last.
#[must_use]
pub fn weekday_index(date: NaiveDate, first_day_of_week: Weekday) -> u32 {
    let day = date.weekday().num_days_from_sunday();
    let first = first_day_of_week.num_days_from_sunday();
    (day + 7 - first) % 7
}

/// Number of days in `month` of `year`, or `None` when the pair cannot be
/// represented.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    Some(last_of_month(year, month)?.day())
}

pub(crate) fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if year < 1 {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, 1)
}

pub(crate) fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first = first_of_month(year, month)?;
    let (next_year, next_month) = match month {
        12 => (year.checked_add(1)?, 1),
        _ => (year, month + 1),
    };

    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(next) => next.pred_opt(),
        // December of the last representable year.
        None => first.with_day(31),
    }
}

/// Parses a calendar day, discarding any time of day that follows it.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(datetime.date());
        }
    }

    Err(Error::InvalidDate(format!("`{raw}` is not a calendar date")))
}
