use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::json;
use tracing::warn;

use crate::charts::ChartId;
use crate::dashboard::{ChartUpdate, DashEvent, SharedDashboard, StateSnapshot, lock};
use crate::error::DashError;

#[derive(Clone)]
struct AppState {
    dashboard: SharedDashboard,
    page: Arc<str>,
}

/// HTTP surface: the page, chart payloads, a state summary and the event sink.
pub fn router(dashboard: SharedDashboard, page: String) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/charts/{chart}", get(chart_payload))
        .route("/api/state", get(state_snapshot))
        .route("/api/events", post(post_event))
        .with_state(AppState {
            dashboard,
            page: Arc::from(page),
        })
}

async fn index(State(app): State<AppState>) -> Html<String> {
    Html(app.page.to_string())
}

async fn chart_payload(
    State(app): State<AppState>,
    Path(chart): Path<String>,
) -> Result<Response, ApiError> {
    let chart: ChartId = chart.parse()?;
    let payload = lock(&app.dashboard)?.state().payload(chart).cloned();
    let payload = payload.ok_or(ApiError::NotRendered(chart))?;

    Ok((
        [
            (header::CONTENT_TYPE, payload.content_type),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Bytes::copy_from_slice(&payload.body),
    )
        .into_response())
}

async fn state_snapshot(State(app): State<AppState>) -> Result<Json<StateSnapshot>, ApiError> {
    let snapshot = lock(&app.dashboard)?.state().snapshot();
    Ok(Json(snapshot))
}

/// Image renders are CPU-bound, so dispatch runs off the async workers.
async fn post_event(
    State(app): State<AppState>,
    Json(event): Json<DashEvent>,
) -> Result<Json<ChartUpdate>, ApiError> {
    let dashboard = app.dashboard.clone();
    let update = tokio::task::spawn_blocking(move || {
        let mut guard = lock(&dashboard)?;
        guard.accept(&event)
    })
    .await
    .map_err(|err| ApiError::Join(err.to_string()))??;
    Ok(Json(update))
}

#[derive(Debug)]
enum ApiError {
    Dash(DashError),
    NotRendered(ChartId),
    Join(String),
}

impl From<DashError> for ApiError {
    fn from(err: DashError) -> Self {
        Self::Dash(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Dash(err) => {
                let status = match &err {
                    DashError::UnknownChart(_) | DashError::UnknownEventSource(_) => {
                        StatusCode::NOT_FOUND
                    }
                    DashError::SliderOutOfRange { .. }
                    | DashError::MissingEventValue(_)
                    | DashError::InvalidData(_) => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            Self::NotRendered(chart) => (
                StatusCode::NOT_FOUND,
                format!("chart `{chart}` has not been rendered yet"),
            ),
            Self::Join(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            warn!(%status, %message, "request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
