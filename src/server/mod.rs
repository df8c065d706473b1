// src/server/mod.rs - Rocket assembly and shared state
use crate::api::*;
use crate::config::Config;
use crate::database::DbPool;
use crate::validation::FormValidator;
use rocket::{routes, Build, Rocket};

pub mod routes;

pub struct ServerState {
    pub config: Config,
    pub db_pool: DbPool,
    pub validator: FormValidator,
}

pub fn build_rocket(config: Config, db_pool: DbPool) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", config.server.host.clone()))
        .merge(("port", config.server.port));

    let state = ServerState {
        config,
        db_pool,
        validator: FormValidator::new(),
    };

    rocket::custom(figment).manage(state).mount(
        "/api",
        routes![
            // Health and info endpoints
            routes::health::health_check,
            routes::health::index,
            // Form capture endpoints
            submit_roi,
            submit_lead,
            // Site content endpoints
            get_industries,
            get_variant,
            // Admin endpoints
            get_roi_submissions,
            get_roi_submission_detail,
            get_leads,
            get_stats,
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_db_pool;
    use crate::experiments::{ExperimentConfig, VariantConfig};
    use pretty_assertions::assert_eq;
    use rocket::http::Status;
    use rocket::local::asynchronous::Client;
    use serde_json::{json, Value};

    async fn scratch_client() -> (tempfile::TempDir, Client) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.db");
        let pool = create_db_pool(path.to_str().unwrap()).await.unwrap();

        let mut config = Config::default();
        config.experiments = vec![ExperimentConfig {
            key: "roi_headline".to_string(),
            enabled: true,
            variants: vec![
                VariantConfig {
                    name: "control".to_string(),
                    weight: 50,
                },
                VariantConfig {
                    name: "savings_first".to_string(),
                    weight: 50,
                },
            ],
        }];

        let client = Client::tracked(build_rocket(config, pool)).await.unwrap();
        (dir, client)
    }

    fn hvac_payload() -> Value {
        json!({
            "industry": "hvac",
            "monthly_installations": 100,
            "average_technicians": 5,
            "average_travel_time": 45,
            "fuel_cost_per_gallon": 4.5,
            "average_wage_per_hour": 35,
            "company_name": "Comfort Air LLC",
            "email": "ops@comfortair.example"
        })
    }

    #[rocket::async_test]
    async fn health_endpoint_reports_the_service() {
        let (_dir, client) = scratch_client().await;

        let response = client.get("/api/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "roi-capture-api");
    }

    #[rocket::async_test]
    async fn complete_roi_submission_is_stored() {
        let (_dir, client) = scratch_client().await;

        let response = client
            .post("/api/roi")
            .json(&hvac_payload())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["ok"], true);

        let listing = client.get("/api/roi/submissions").dispatch().await;
        let body: Value = listing.into_json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["total_count"], 1);

        // The stored report is server-computed, never the client's copy
        let row = &body["data"]["submissions"][0];
        assert_eq!(row["industry"], "hvac");
        assert_eq!(row["email"], "ops@comfortair.example");
        assert_eq!(row["results"]["savings"]["net_monthly_savings"], 4453.125);
    }

    #[rocket::async_test]
    async fn client_supplied_calculations_are_ignored() {
        let (_dir, client) = scratch_client().await;

        let mut payload = hvac_payload();
        payload["calculations"] = json!({
            "current_costs": {
                "monthly_fuel_costs": 0.0,
                "monthly_labor_costs": 0.0,
                "total_monthly_costs": 0.0,
                "annual_costs": 0.0
            },
            "savings": {
                "time_reduction_percentage": 99.0,
                "fuel_savings": 0.0,
                "labor_savings": 0.0,
                "net_monthly_savings": 999999.0,
                "net_annual_savings": 0.0
            },
            "roi": {
                "payback_period_months": 0.0,
                "roi_percentage": 9999.0,
                "break_even_point": "0 months"
            },
            "efficiency": {
                "current_installs_per_tech_per_day": 0.0,
                "improved_installs_per_tech_per_day": 0.0,
                "improvement_percentage": 0.0
            }
        });

        let response = client.post("/api/roi").json(&payload).dispatch().await;
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["ok"], true);

        let listing = client.get("/api/roi/submissions").dispatch().await;
        let body: Value = listing.into_json().await.unwrap();
        let row = &body["data"]["submissions"][0];
        assert_eq!(row["results"]["savings"]["net_monthly_savings"], 4453.125);
    }

    #[rocket::async_test]
    async fn submission_without_email_is_rejected_and_not_stored() {
        let (_dir, client) = scratch_client().await;

        let response = client
            .post("/api/roi")
            .json(&json!({
                "industry": "solar",
                "monthly_installations": 40,
                "average_technicians": 3,
                "average_travel_time": 30,
                "fuel_cost_per_gallon": 4.1,
                "average_wage_per_hour": 38
            }))
            .dispatch()
            .await;

        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["ok"], false);
        assert!(body["field_errors"]["email"].is_string());

        let listing = client.get("/api/roi/submissions").dispatch().await;
        let body: Value = listing.into_json().await.unwrap();
        assert_eq!(body["data"]["total_count"], 0);
    }

    #[rocket::async_test]
    async fn submission_detail_is_served_by_id() {
        let (_dir, client) = scratch_client().await;

        client
            .post("/api/roi")
            .json(&hvac_payload())
            .dispatch()
            .await;

        let listing = client.get("/api/roi/submissions").dispatch().await;
        let body: Value = listing.into_json().await.unwrap();
        let id = body["data"]["submissions"][0]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let detail = client
            .get(format!("/api/roi/submissions/{}", id))
            .dispatch()
            .await;
        let detail: Value = detail.into_json().await.unwrap();
        assert_eq!(detail["success"], true);
        assert_eq!(detail["data"]["id"], id.as_str());

        let missing = client
            .get(format!("/api/roi/submissions/{}", uuid::Uuid::new_v4()))
            .dispatch()
            .await;
        let missing: Value = missing.into_json().await.unwrap();
        assert_eq!(missing["success"], false);
    }

    #[rocket::async_test]
    async fn industry_catalog_is_complete_and_ordered() {
        let (_dir, client) = scratch_client().await;

        let response = client.get("/api/industries").dispatch().await;
        let body: Value = response.into_json().await.unwrap();

        let entries = body["data"].as_array().unwrap();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0]["key"], "hvac");
        assert_eq!(entries[0]["factor"]["time_reduction"], 0.35);
        assert_eq!(entries[9]["key"], "other");
    }

    #[rocket::async_test]
    async fn variant_assignment_is_sticky_over_http() {
        let (_dir, client) = scratch_client().await;

        let first = client
            .get("/api/experiments/roi_headline?visitor=visitor-7")
            .dispatch()
            .await;
        let first: Value = first.into_json().await.unwrap();

        let second = client
            .get("/api/experiments/roi_headline?visitor=visitor-7")
            .dispatch()
            .await;
        let second: Value = second.into_json().await.unwrap();

        assert!(first["data"]["variant"].is_string());
        assert_eq!(first["data"]["variant"], second["data"]["variant"]);
        assert_eq!(first["data"]["visitor_id"], "visitor-7");
    }

    #[rocket::async_test]
    async fn unknown_experiment_assigns_no_variant() {
        let (_dir, client) = scratch_client().await;

        let response = client
            .get("/api/experiments/summer_sale?visitor=visitor-1")
            .dispatch()
            .await;
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["experiment"], "summer_sale");
        assert!(body["data"]["variant"].is_null());
    }

    #[rocket::async_test]
    async fn missing_visitor_gets_a_minted_id() {
        let (_dir, client) = scratch_client().await;

        let response = client.get("/api/experiments/roi_headline").dispatch().await;
        let body: Value = response.into_json().await.unwrap();

        let visitor_id = body["data"]["visitor_id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(visitor_id).is_ok());
    }

    #[rocket::async_test]
    async fn lead_submission_round_trips() {
        let (_dir, client) = scratch_client().await;

        let response = client
            .post("/api/leads")
            .json(&json!({
                "form_type": "demo_request",
                "full_name": "Jordan Reyes",
                "email": "jordan@fieldworks.example",
                "company_name": "Fieldworks",
                "industry": "electrical"
            }))
            .dispatch()
            .await;
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["ok"], true);

        let listing = client
            .get("/api/leads?form_type=demo_request")
            .dispatch()
            .await;
        let body: Value = listing.into_json().await.unwrap();
        assert_eq!(body["data"]["total_count"], 1);
        assert_eq!(body["data"]["leads"][0]["full_name"], "Jordan Reyes");
        assert_eq!(body["data"]["leads"][0]["industry"], "electrical");
    }

    #[rocket::async_test]
    async fn malformed_lead_reports_every_broken_field() {
        let (_dir, client) = scratch_client().await;

        let response = client
            .post("/api/leads")
            .json(&json!({ "form_type": "newsletter" }))
            .dispatch()
            .await;
        let body: Value = response.into_json().await.unwrap();

        assert_eq!(body["ok"], false);
        assert!(body["field_errors"]["form_type"].is_string());
        assert!(body["field_errors"]["full_name"].is_string());
        assert!(body["field_errors"]["email"].is_string());
    }

    #[rocket::async_test]
    async fn stats_reflect_stored_submissions() {
        let (_dir, client) = scratch_client().await;

        client
            .post("/api/roi")
            .json(&hvac_payload())
            .dispatch()
            .await;

        let response = client.get("/api/stats").dispatch().await;
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["total_roi_submissions"], 1);
        assert_eq!(body["data"]["avg_net_monthly_savings"], 4453.125);
    }
}
