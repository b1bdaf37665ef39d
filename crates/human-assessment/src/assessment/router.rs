use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::answers::AnswerSet;
use super::flow::FlowError;
use super::questionnaire::catalog;
use super::scoring::ScoringError;
use super::service::{AdvanceRequest, AssessmentRequest, AssessmentService};

/// Router builder exposing the questionnaire, scoring, report and survey endpoints.
pub fn assessment_router(service: Arc<AssessmentService>) -> Router {
    Router::new()
        .route("/api/v1/questionnaire", get(questionnaire_handler))
        .route("/api/v1/assessments/score", post(score_handler))
        .route("/api/v1/assessments/report", post(report_handler))
        .route("/api/v1/survey/advance", post(advance_handler))
        .with_state(service)
}

pub(crate) async fn questionnaire_handler() -> Response {
    (StatusCode::OK, Json(catalog())).into_response()
}

pub(crate) async fn score_handler(
    State(service): State<Arc<AssessmentService>>,
    Json(answers): Json<AnswerSet>,
) -> Response {
    match service.score(&answers) {
        Ok(card) => (StatusCode::OK, Json(card)).into_response(),
        Err(error) => scoring_rejection(&error),
    }
}

pub(crate) async fn report_handler(
    State(service): State<Arc<AssessmentService>>,
    Json(request): Json<AssessmentRequest>,
) -> Response {
    match service.report(&request.profile, &request.answers).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => scoring_rejection(&error),
    }
}

pub(crate) async fn advance_handler(Json(request): Json<AdvanceRequest>) -> Response {
    match request.session.advance(request.submission) {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(error @ (FlowError::OutOfOrder { .. } | FlowError::AlreadyComplete)) => {
            let payload = json!({
                "error": error.to_string(),
                "step": request.session.step(),
            });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

fn scoring_rejection(error: &ScoringError) -> Response {
    let payload = json!({
        "error": error.to_string(),
        "field": error.field(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}
