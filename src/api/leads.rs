// src/api/leads.rs
use crate::api::stats::ApiResponse;
use crate::database::{insert_lead_submission, list_lead_submissions, StoredLeadSubmission};
use crate::models::{LeadSubmissionRequest, SubmissionResponse};
use crate::roi::Industry;
use crate::server::ServerState;
use chrono::Utc;
use rocket::serde::json::Json;
use rocket::{get, post, State};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Serialize)]
pub struct LeadsResponse {
    pub leads: Vec<StoredLeadSubmission>,
    pub total_count: usize,
    pub page: usize,
    pub per_page: usize,
}

// Shared intake for the demo-request, enterprise-contact and trial-signup
// forms. Same response contract as the ROI endpoint.
#[post("/leads", data = "<request>")]
pub async fn submit_lead(
    state: &State<ServerState>,
    request: Json<LeadSubmissionRequest>,
) -> Json<SubmissionResponse> {
    let request = request.into_inner();

    let field_errors = state.validator.validate_lead_submission(&request);
    if !field_errors.is_empty() {
        return Json(SubmissionResponse::rejected(
            "Please fix the highlighted fields".to_string(),
            field_errors,
        ));
    }

    let lead = StoredLeadSubmission {
        id: Uuid::new_v4().to_string(),
        form_type: request.form_type.clone(),
        full_name: request.full_name.trim().to_string(),
        email: request.email.trim().to_string(),
        company_name: request.company_name.clone(),
        phone: request.phone.clone(),
        industry: request.industry.as_deref().map(Industry::from_key),
        message: request.message.clone(),
        created_at: Utc::now(),
    };

    match insert_lead_submission(&state.db_pool, &lead).await {
        Ok(()) => {
            info!("📇 Lead stored: {} ({})", lead.id, lead.form_type);
            Json(SubmissionResponse::accepted(
                "Thanks! We'll be in touch shortly.".to_string(),
            ))
        }
        Err(e) => {
            error!("Failed to store lead: {}", e);
            Json(SubmissionResponse::failed(
                "We could not save your request. Please try again.".to_string(),
            ))
        }
    }
}

#[get("/leads?<page>&<per_page>&<form_type>")]
pub async fn get_leads(
    state: &State<ServerState>,
    page: Option<usize>,
    per_page: Option<usize>,
    form_type: Option<String>,
) -> Json<ApiResponse<LeadsResponse>> {
    let page = page.unwrap_or(1);
    let per_page = per_page.unwrap_or(50).min(1000);

    match list_lead_submissions(&state.db_pool, page, per_page, form_type.as_deref()).await {
        Ok(leads) => {
            let len = leads.len();
            Json(ApiResponse::success(LeadsResponse {
                leads,
                total_count: len,
                page,
                per_page,
            }))
        }
        Err(e) => Json(ApiResponse::error(e.to_string())),
    }
}
