//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{debug, warn};

use crate::domain::StationId;
use crate::navitia::{DatetimeRepresents, ErrorKind, JourneyError, JourneyQuery};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/stations", get(list_stations))
        .route("/api/v1/travel-orders/resolve", post(resolve_order))
        .route("/api/v1/journeys", get(search_journeys))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every catalog station.
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    let stations = state.catalog.iter().map(StationSummary::from_entry).collect();
    Json(StationListResponse { stations })
}

/// Resolve recognized entities (and optional caller position) to a travel order.
async fn resolve_order(
    State(state): State<AppState>,
    Json(req): Json<ResolveOrderRequest>,
) -> Json<ResolveOrderResponse> {
    let order = state.resolver.resolve(&req.entities, req.coordinates());
    Json(ResolveOrderResponse::from_order(
        order,
        state.resolver.stations(),
    ))
}

/// Search journeys between two catalog stations.
async fn search_journeys(
    State(state): State<AppState>,
    Query(params): Query<JourneySearchParams>,
) -> Result<Json<JourneySearchResponse>, AppError> {
    let represents = match params.datetime_represents.as_deref() {
        None | Some("") => DatetimeRepresents::Departure,
        Some(raw) => DatetimeRepresents::parse(raw).ok_or_else(|| AppError::BadRequest {
            message: format!("Invalid datetime_represents: {raw}"),
        })?,
    };

    let mut query = JourneyQuery::new(
        StationId(params.departure_id),
        StationId(params.destination_id),
    )
    .represents(represents);
    if let Some(iso) = params.datetime_iso.filter(|s| !s.trim().is_empty()) {
        query = query.at(iso);
    }

    let journeys = state.navitia.search_journeys(&query).await?;
    debug!(count = journeys.len(), "journey search succeeded");
    Ok(Json(JourneySearchResponse::new(journeys)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Journey(JourneyError),
}

impl From<JourneyError> for AppError {
    fn from(e: JourneyError) -> Self {
        AppError::Journey(e)
    }
}

/// HTTP status reported for each journey error kind.
pub fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Configuration => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Authentication => StatusCode::BAD_GATEWAY,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest { message } => {
                debug!(%message, "bad request");
                let body = Json(ErrorResponse { error: message });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Journey(err) => {
                let status = status_for_kind(err.kind());
                warn!(status = status.as_u16(), error = %err, "journey search failed");
                let body = Json(JourneyErrorResponse::from_error(&err));
                (status, body).into_response()
            }
        }
    }
}
