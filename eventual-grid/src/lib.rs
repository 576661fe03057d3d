mod date;
mod error;
mod event;
mod grid;
mod layout;
mod navigation;
mod render;
mod segment;
mod stack;

#[cfg(feature = "ics")]
mod ics;

pub use date::{days_in_month, weekday_index};
pub use error::{Error, Result};
pub use event::{EventId, EventRange};
pub use grid::{Cell, MonthGrid};
pub use layout::{adjust, LayoutConfig, RowLayout, SlotOffset};
pub use navigation::MonthRef;
pub use render::{render_month, DayCell, MonthView, PlacedSegment};
pub use segment::{segment, GridSegment};
pub use stack::{level_of, resolve, StackAssignment};

#[cfg(feature = "ics")]
pub use ics::month_to_ics;
