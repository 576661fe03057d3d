use chrono::NaiveDate;
use ics::{
    parameters::Value,
    properties::{DtEnd, DtStart, Summary, URL},
};

use crate::{EventRange, MonthGrid};

fn all_day(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Builds an iCalendar holding the in-month part of every event as an
/// all-day entry.
#[must_use]
pub fn month_to_ics<'a>(
    name: &'a str,
    grid: &MonthGrid,
    events: &'a [EventRange],
) -> ics::ICalendar<'a> {
    let mut icalendar = ics::ICalendar::new("2.0", name);

    for event in events
        .iter()
        .filter(|event| event.overlaps(grid.first_day(), grid.last_day()))
    {
        icalendar.add_event(event_to_ics(event, grid));
    }

    icalendar
}

fn event_to_ics<'a>(event: &'a EventRange, grid: &MonthGrid) -> ics::Event<'a> {
    let start = event.start().max(grid.first_day());
    let end = event.end().min(grid.last_day());
    // DTEND of an all-day entry is exclusive.
    let end = end.succ_opt().unwrap_or(end);

    let id = format!("{}_{}", event.id(), all_day(start));
    let mut ics_event = ics::Event::new(id, format!("{}T000000", all_day(start)));

    let mut dtstart = DtStart::new(all_day(start));
    dtstart.add(Value::new("DATE"));
    ics_event.push(dtstart);

    let mut dtend = DtEnd::new(all_day(end));
    dtend.add(Value::new("DATE"));
    ics_event.push(dtend);

    ics_event.push(Summary::new(event.title()));

    if let Some(link) = event.link() {
        ics_event.push(URL::new(link));
    }

    ics_event
}
