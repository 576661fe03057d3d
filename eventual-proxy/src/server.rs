use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use eventual_grid::{month_to_ics, render_month, EventRange, LayoutConfig, MonthGrid, MonthRef};
use serde::Deserialize;

use crate::cache::Cache;
use crate::source::{EventSource, SourceError};

pub const MONTH_PATH: &str = "/month";

pub type EventCache = Cache<MonthRef, Vec<EventRange>>;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<EventSource>,
    pub cache: Arc<EventCache>,
    pub layout: LayoutConfig,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(MONTH_PATH, get(handle_month))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .with_state(state)
}

#[derive(Deserialize)]
struct MonthQuery {
    #[serde(rename = "eventual-m")]
    month: Option<String>,
    #[serde(rename = "eventual-y")]
    year: Option<String>,
    #[serde(default)]
    ics: bool,
}

enum ProxyError {
    Source(SourceError),
    Render(eventual_grid::Error),
}

impl From<SourceError> for ProxyError {
    fn from(err: SourceError) -> Self {
        Self::Source(err)
    }
}

impl From<eventual_grid::Error> for ProxyError {
    fn from(err: eventual_grid::Error) -> Self {
        Self::Render(err)
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            Self::Source(err) => {
                tracing::warn!(%err, "failed to fetch events");
                (StatusCode::BAD_GATEWAY, "Failed to fetch events").into_response()
            }
            Self::Render(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
        }
    }
}

async fn handle_month(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, ProxyError> {
    let current = MonthRef::of(Utc::now().date_naive());
    let month = MonthRef::resolve(query.month.as_deref(), query.year.as_deref(), current);

    let grid = MonthGrid::build(month.year, month.month, state.layout.first_day_of_week)?;
    let events = month_events(&state, month, &grid).await?;

    tracing::info!(%month, events = events.len(), ics = query.ics, "serving month");

    if query.ics {
        let name = month.to_string();
        let body = month_to_ics(&name, &grid, &events).to_string();
        return Ok(([(header::CONTENT_TYPE, "text/calendar")], body).into_response());
    }

    let view = render_month(month.year, month.month, &events, &state.layout)?;
    Ok(Json(view).into_response())
}

async fn month_events(
    state: &AppState,
    month: MonthRef,
    grid: &MonthGrid,
) -> Result<Arc<Vec<EventRange>>, SourceError> {
    if let Some(events) = state.cache.get(&month) {
        return Ok(events);
    }

    let events = state
        .source
        .fetch_events(grid.first_day(), grid.last_day())
        .await?;

    Ok(state.cache.insert(month, events))
}
