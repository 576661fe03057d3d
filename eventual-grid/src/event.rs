use std::fmt;

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::date::parse_date;
use crate::Result;

/// Identifier assigned to an event by the store it was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An all-day event covering `start..=end`.
///
/// `end` is never earlier than `start`: a missing, malformed or inverted end
/// date collapses the event to a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "EventRecord"))]
pub struct EventRange {
    id: EventId,
    title: String,
    start: NaiveDate,
    end: NaiveDate,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    link: Option<String>,
}

impl EventRange {
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Self {
        let end = end.filter(|end| *end >= start).unwrap_or(start);

        Self {
            id,
            title: title.into(),
            start,
            end,
            link: None,
        }
    }

    /// Builds an event from stored date strings. Only the start date has to
    /// be well formed.
    pub fn parse(
        id: EventId,
        title: impl Into<String>,
        start: &str,
        end: Option<&str>,
    ) -> Result<Self> {
        let start = parse_date(start)?;
        let end = end.and_then(|end| parse_date(end).ok());

        Ok(Self::new(id, title, start, end))
    }

    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Whether any day of the event falls within `from..=to`.
    #[must_use]
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start <= to && self.end >= from
    }
}

/// Shape of an event as stored, before normalization.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct EventRecord {
    id: EventId,
    title: String,
    start: String,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<EventRecord> for EventRange {
    type Error = crate::Error;

    fn try_from(record: EventRecord) -> Result<Self> {
        let event = Self::parse(record.id, record.title, &record.start, record.end.as_deref())?;

        Ok(match record.link {
            Some(link) => event.with_link(link),
            None => event,
        })
    }
}
