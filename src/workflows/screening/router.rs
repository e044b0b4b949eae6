use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::JobProfile;
use super::pipeline::{PipelineError, ScreeningOutcome, ScreeningPipeline};
use super::report::views::CandidateView;

/// Router builder exposing the batch screening endpoint.
pub fn screening_router(pipeline: Arc<ScreeningPipeline>) -> Router {
    Router::new()
        .route("/api/v1/screening/run", post(run_handler))
        .with_state(pipeline)
}

#[derive(Debug, Deserialize)]
pub struct ScreeningRunRequest {
    pub job_profile: JobProfile,
    pub cv_texts: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScreeningRunResponse {
    pub job_title: String,
    pub candidates: Vec<CandidateView>,
    pub selected: Vec<CandidateView>,
    pub rejected: Vec<CandidateView>,
    pub candidates_processed: usize,
    pub notifications_sent: usize,
    pub interviews_scheduled: usize,
    pub errors: Vec<String>,
}

impl ScreeningRunResponse {
    fn from_outcome(outcome: &ScreeningOutcome) -> Self {
        Self {
            job_title: outcome.job_profile.title.clone(),
            candidates: views(&outcome.candidates),
            selected: views(&outcome.selected),
            rejected: views(&outcome.rejected),
            candidates_processed: outcome.state.candidates_processed,
            notifications_sent: outcome.state.notifications_sent,
            interviews_scheduled: outcome.state.interviews_scheduled,
            errors: outcome.state.errors.clone(),
        }
    }
}

fn views(candidates: &[super::domain::Candidate]) -> Vec<CandidateView> {
    candidates.iter().map(CandidateView::from_candidate).collect()
}

pub(crate) async fn run_handler(
    State(pipeline): State<Arc<ScreeningPipeline>>,
    axum::Json(request): axum::Json<ScreeningRunRequest>,
) -> Response {
    match pipeline.run(&request.job_profile, &request.cv_texts).await {
        Ok(outcome) => {
            let payload = ScreeningRunResponse::from_outcome(&outcome);
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error @ (PipelineError::EmptyBatch | PipelineError::InvalidProfile(_))) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
