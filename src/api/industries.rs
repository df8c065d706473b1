// src/api/industries.rs
use crate::api::stats::ApiResponse;
use crate::roi::{Industry, IndustryFactor};
use rocket::{get, serde::json::Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct IndustryEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub factor: IndustryFactor,
}

// Every form on the site renders its industry select from this catalog so
// the options never drift between forms.
#[get("/industries")]
pub async fn get_industries() -> Json<ApiResponse<Vec<IndustryEntry>>> {
    let catalog: Vec<IndustryEntry> = Industry::all()
        .into_iter()
        .map(|industry| IndustryEntry {
            key: industry.key(),
            label: industry.label(),
            factor: industry.factor(),
        })
        .collect();

    Json(ApiResponse::success(catalog))
}
