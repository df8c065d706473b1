// src/server/routes.rs
// Health and index live here; every other route is defined in its API module

pub mod health {
    use rocket::{get, serde::json::Json};
    use serde_json::{json, Value};

    #[get("/health")]
    pub async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "service": "roi-capture-api"
        }))
    }

    #[get("/")]
    pub async fn index() -> Json<Value> {
        Json(json!({
            "name": "ROI Capture API",
            "version": "0.1.0",
            "description": "API behind the marketing site's ROI calculator and lead forms",
            "endpoints": {
                "health": "/api/health",
                "roi": "/api/roi",
                "roi_submissions": "/api/roi/submissions",
                "leads": "/api/leads",
                "industries": "/api/industries",
                "experiments": "/api/experiments/<key>",
                "stats": "/api/stats"
            }
        }))
    }
}
