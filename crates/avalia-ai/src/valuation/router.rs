use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::edit::FieldEdit;
use super::estimation::PriceEstimator;
use super::render::{render, FormLayout};
use super::repository::SessionRepository;
use super::schema::schema;
use super::service::{ValuationService, ValuationServiceError};
use super::session::SessionId;

#[derive(Debug, Default, Deserialize)]
pub struct OpenSessionRequest {
    #[serde(default)]
    pub layout: Option<FormLayout>,
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub edits: Vec<FieldEdit>,
}

/// Router builder exposing the valuation form over HTTP.
pub fn valuation_router<R, E>(service: Arc<ValuationService<R, E>>) -> Router
where
    R: SessionRepository + 'static,
    E: PriceEstimator + 'static,
{
    Router::new()
        .route("/api/v1/valuation/schema", get(schema_handler))
        .route("/api/v1/valuation/sessions", post(open_handler::<R, E>))
        .route(
            "/api/v1/valuation/sessions/:session_id",
            get(view_handler::<R, E>),
        )
        .route(
            "/api/v1/valuation/sessions/:session_id/fields",
            post(edit_handler::<R, E>),
        )
        .route(
            "/api/v1/valuation/sessions/:session_id/advance",
            post(advance_handler::<R, E>),
        )
        .route(
            "/api/v1/valuation/sessions/:session_id/retreat",
            post(retreat_handler::<R, E>),
        )
        .route(
            "/api/v1/valuation/sessions/:session_id/estimate",
            post(estimate_handler::<R, E>),
        )
        .with_state(service)
}

pub(crate) async fn schema_handler() -> Response {
    (StatusCode::OK, Json(schema())).into_response()
}

pub(crate) async fn open_handler<R, E>(
    State(service): State<Arc<ValuationService<R, E>>>,
    request: Option<Json<OpenSessionRequest>>,
) -> Response
where
    R: SessionRepository + 'static,
    E: PriceEstimator + 'static,
{
    let layout = request.and_then(|Json(request)| request.layout);
    match service.open(layout) {
        Ok(session) => (StatusCode::CREATED, Json(render(&session))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn view_handler<R, E>(
    State(service): State<Arc<ValuationService<R, E>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    E: PriceEstimator + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, Json(render(&session))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn edit_handler<R, E>(
    State(service): State<Arc<ValuationService<R, E>>>,
    Path(session_id): Path<String>,
    Json(request): Json<EditRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    E: PriceEstimator + 'static,
{
    match service.edit(&SessionId(session_id), &request.edits) {
        Ok(session) => (StatusCode::OK, Json(render(&session))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn advance_handler<R, E>(
    State(service): State<Arc<ValuationService<R, E>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    E: PriceEstimator + 'static,
{
    match service.advance(&SessionId(session_id)) {
        Ok((session, _)) => (StatusCode::OK, Json(render(&session))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn retreat_handler<R, E>(
    State(service): State<Arc<ValuationService<R, E>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    E: PriceEstimator + 'static,
{
    match service.retreat(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, Json(render(&session))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn estimate_handler<R, E>(
    State(service): State<Arc<ValuationService<R, E>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    E: PriceEstimator + 'static,
{
    match service.estimate(&SessionId(session_id)).await {
        Ok(session) => (StatusCode::OK, Json(render(&session))).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ValuationServiceError) -> Response {
    let status = err.status_code();

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
