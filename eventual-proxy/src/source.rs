use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use eventual_grid::EventRange;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read events: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode events: {0}")]
    Json(#[from] serde_json::Error),
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// The external store months are filled from.
pub enum EventSource {
    /// Events loaded once from a JSON file.
    File(Arc<Vec<EventRange>>),
    /// An endpoint answering `GET {url}?start=YYYY-MM-DD&end=YYYY-MM-DD` with
    /// a JSON array of events.
    Upstream { client: reqwest::Client, url: String },
}

impl EventSource {
    pub async fn load_file(path: &Path) -> Result<Self, SourceError> {
        let raw = tokio::fs::read(path).await?;
        let events: Vec<EventRange> = serde_json::from_slice(&raw)?;

        tracing::info!(count = events.len(), path = %path.display(), "loaded events");
        Ok(Self::File(Arc::new(events)))
    }

    pub fn upstream(url: impl Into<String>) -> Self {
        Self::Upstream {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Events overlapping `start..=end`, ordered by start date and id.
    pub async fn fetch_events(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EventRange>, SourceError> {
        let events = match self {
            Self::File(events) => events.as_ref().clone(),
            Self::Upstream { client, url } => {
                tracing::debug!(%url, %start, %end, "querying upstream");
                client
                    .get(url)
                    .query(&[("start", start.to_string()), ("end", end.to_string())])
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<Vec<EventRange>>()
                    .await?
            }
        };

        Ok(within(events, start, end))
    }
}

fn within(events: Vec<EventRange>, start: NaiveDate, end: NaiveDate) -> Vec<EventRange> {
    let mut events: Vec<_> = events
        .into_iter()
        .filter(|event| event.overlaps(start, end))
        .collect();
    events.sort_by_key(|event| (event.start(), event.id()));
    events
}
