use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::info;

use super::calculator::ApplicantProfile;
use super::reference::ReferenceStore;
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing scoring, matching, and reference-data endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: ReferenceStore + 'static,
{
    Router::new()
        .route("/api/v1/crs/assess", post(assess_handler::<S>))
        .route("/api/v1/crs/score", post(score_handler::<S>))
        .route("/api/v1/programs", get(programs_handler::<S>))
        .route("/api/v1/draws", get(draws_handler::<S>))
        .route("/api/v1/points-reference", get(points_reference_handler::<S>))
        .route("/api/v1/reference/refresh", post(refresh_handler::<S>))
        .with_state(service)
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::InvalidProfile(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        AssessmentServiceError::Table(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}

fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

pub(crate) async fn assess_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    payload: Result<Json<ApplicantProfile>, JsonRejection>,
) -> Response
where
    S: ReferenceStore + 'static,
{
    let Json(profile) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.assess(&profile) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    payload: Result<Json<ApplicantProfile>, JsonRejection>,
) -> Response
where
    S: ReferenceStore + 'static,
{
    let Json(profile) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.score(&profile) {
        Ok(score) => (StatusCode::OK, Json(score)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn programs_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Response
where
    S: ReferenceStore + 'static,
{
    match service.active_programs() {
        Ok(programs) => (StatusCode::OK, Json(programs)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn draws_handler<S>(State(service): State<Arc<AssessmentService<S>>>) -> Response
where
    S: ReferenceStore + 'static,
{
    match service.draws() {
        Ok(draws) => (StatusCode::OK, Json(draws)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn points_reference_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Response
where
    S: ReferenceStore + 'static,
{
    match service.points_reference() {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn refresh_handler<S>(State(service): State<Arc<AssessmentService<S>>>) -> Response
where
    S: ReferenceStore + 'static,
{
    service.refresh();
    info!("reference cache invalidated on request");
    let payload = json!({ "status": "refreshing" });
    (StatusCode::ACCEPTED, Json(payload)).into_response()
}
