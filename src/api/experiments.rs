// src/api/experiments.rs
use crate::api::stats::ApiResponse;
use crate::experiments::{assign_variant, find_experiment};
use crate::server::ServerState;
use rocket::{get, serde::json::Json, State};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct VariantAssignment {
    pub experiment: String,
    pub visitor_id: String,
    pub variant: Option<String>,
}

// Unknown or disabled experiments assign no variant and the site renders
// the default experience. A visitor without an id gets one minted here and
// echoed back so the site can persist it.
#[get("/experiments/<key>?<visitor>")]
pub async fn get_variant(
    state: &State<ServerState>,
    key: String,
    visitor: Option<String>,
) -> Json<ApiResponse<VariantAssignment>> {
    let visitor_id = visitor
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let variant = find_experiment(&state.config.experiments, &key)
        .and_then(|experiment| assign_variant(experiment, &visitor_id))
        .map(str::to_string);

    Json(ApiResponse::success(VariantAssignment {
        experiment: key,
        visitor_id,
        variant,
    }))
}
