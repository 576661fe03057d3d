use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the grid pipeline.
///
/// An empty set of events is never an error, it renders an empty grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A year, month or date token that is malformed or out of range.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A month/year navigation token pair that is absent or does not match
    /// the `MM` / `YYYY` form. Callers usually recover by falling back to
    /// the current month.
    #[error("missing or malformed navigation token: {0}")]
    MissingOrMalformedNavigationToken(String),
}
