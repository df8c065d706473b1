// src/api/roi.rs
use crate::api::stats::ApiResponse;
use crate::database::{
    get_roi_submission, insert_roi_submission, list_roi_submissions, StoredRoiSubmission,
};
use crate::models::{RoiSubmissionRequest, SubmissionResponse};
use crate::roi::{compute_roi, Industry};
use crate::server::ServerState;
use rocket::serde::json::Json;
use rocket::{get, post, State};
use serde::Serialize;
use tracing::{error, info};

#[derive(Serialize)]
pub struct RoiSubmissionsResponse {
    pub submissions: Vec<StoredRoiSubmission>,
    pub total_count: usize,
    pub page: usize,
    pub per_page: usize,
}

// The browser calculator posts its input plus the report it already showed
// the visitor. Validation gates persistence; the stored report is always
// recomputed here so rows never depend on what the client claims. The
// function is deterministic, so an honest client sees identical numbers.
#[post("/roi", data = "<request>")]
pub async fn submit_roi(
    state: &State<ServerState>,
    request: Json<RoiSubmissionRequest>,
) -> Json<SubmissionResponse> {
    let request = request.into_inner();

    let field_errors = state.validator.validate_roi_submission(&request.input);
    if !field_errors.is_empty() {
        return Json(SubmissionResponse::rejected(
            "Please fix the highlighted fields".to_string(),
            field_errors,
        ));
    }

    let results = match compute_roi(&request.input) {
        Some(results) => results,
        None => {
            return Json(SubmissionResponse::failed(
                "ROI inputs are incomplete".to_string(),
            ))
        }
    };

    let submission = match StoredRoiSubmission::from_parts(&request.input, results) {
        Some(submission) => submission,
        None => {
            return Json(SubmissionResponse::failed(
                "ROI inputs are incomplete".to_string(),
            ))
        }
    };

    match insert_roi_submission(&state.db_pool, &submission).await {
        Ok(()) => {
            info!(
                "🧮 ROI submission stored: {} ({})",
                submission.id,
                submission.industry.key()
            );
            Json(SubmissionResponse::accepted(
                "Thanks! Your ROI report has been saved.".to_string(),
            ))
        }
        Err(e) => {
            error!("Failed to store ROI submission: {}", e);
            Json(SubmissionResponse::failed(
                "We could not save your report. Please try again.".to_string(),
            ))
        }
    }
}

#[get("/roi/submissions?<page>&<per_page>&<industry>&<min_net_savings>")]
pub async fn get_roi_submissions(
    state: &State<ServerState>,
    page: Option<usize>,
    per_page: Option<usize>,
    industry: Option<String>,
    min_net_savings: Option<f64>,
) -> Json<ApiResponse<RoiSubmissionsResponse>> {
    let page = page.unwrap_or(1);
    let per_page = per_page.unwrap_or(50).min(1000);

    let industry = industry.as_deref().map(Industry::from_key);

    match list_roi_submissions(&state.db_pool, page, per_page, industry, min_net_savings).await {
        Ok(submissions) => {
            let len = submissions.len();
            Json(ApiResponse::success(RoiSubmissionsResponse {
                submissions,
                total_count: len,
                page,
                per_page,
            }))
        }
        Err(e) => Json(ApiResponse::error(e.to_string())),
    }
}

#[get("/roi/submissions/<id>")]
pub async fn get_roi_submission_detail(
    state: &State<ServerState>,
    id: rocket::serde::uuid::Uuid,
) -> Json<ApiResponse<StoredRoiSubmission>> {
    match get_roi_submission(&state.db_pool, &id.to_string()).await {
        Ok(Some(submission)) => Json(ApiResponse::success(submission)),
        Ok(None) => Json(ApiResponse::error(format!("Submission not found: {}", id))),
        Err(e) => Json(ApiResponse::error(e.to_string())),
    }
}
