// src/submitter.rs
use reqwest::Client;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

use crate::models::{RoiSubmissionRequest, SubmissionResponse};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    pub endpoint_url: String,
}

impl SubmitterConfig {
    pub fn new(endpoint_url: String) -> Result<Self> {
        url::Url::parse(&endpoint_url)
            .map_err(|_| format!("Invalid submission endpoint URL: {}", endpoint_url))?;
        Ok(Self { endpoint_url })
    }

    pub fn from_env() -> Result<Self> {
        let endpoint_url = std::env::var("ROI_ENDPOINT_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string());
        Self::new(endpoint_url)
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Accepted {
        message: Option<String>,
    },
    Rejected {
        message: Option<String>,
        field_errors: HashMap<String, String>,
    },
    // A submission is already on the wire; this one was dropped locally
    AlreadyInFlight,
}

pub struct RoiSubmitter {
    config: SubmitterConfig,
    client: Client,
    in_flight: AtomicBool,
}

impl RoiSubmitter {
    pub fn new(config: SubmitterConfig) -> Self {
        // No explicit timeout: one best-effort call on the platform default,
        // no retry, no backoff
        let client = Client::new();
        debug!("Created RoiSubmitter for endpoint: {}", config.endpoint_url);
        Self {
            config,
            client,
            in_flight: AtomicBool::new(false),
        }
    }

    fn begin(&self) -> bool {
        !self.in_flight.swap(true, Ordering::SeqCst)
    }

    fn finish(&self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }

    // One-shot submit. Duplicate calls while a submission is on the wire
    // are refused locally without touching the network; the latch releases
    // whether the call succeeds or not.
    pub async fn submit(&self, request: &RoiSubmissionRequest) -> Result<SubmitOutcome> {
        if !self.begin() {
            debug!("Submit ignored, another submission is in flight");
            return Ok(SubmitOutcome::AlreadyInFlight);
        }

        let result = self.post_once(request).await;
        self.finish();

        match &result {
            Ok(SubmitOutcome::Accepted { .. }) => info!("✅ ROI submission accepted"),
            Ok(SubmitOutcome::Rejected { message, .. }) => {
                info!("⚠️ ROI submission rejected: {}", message.as_deref().unwrap_or("no message"))
            }
            Err(e) => error!("❌ ROI submission failed: {}", e),
            _ => {}
        }

        result
    }

    async fn post_once(&self, request: &RoiSubmissionRequest) -> Result<SubmitOutcome> {
        let url = format!("{}/roi", self.config.endpoint_url.trim_end_matches('/'));
        debug!("Sending POST request to: {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        debug!("Submission response status: {}", response.status());

        if response.status().is_success() {
            let body: SubmissionResponse = response.json().await?;
            if body.ok {
                Ok(SubmitOutcome::Accepted {
                    message: body.message,
                })
            } else {
                Ok(SubmitOutcome::Rejected {
                    message: body.message,
                    field_errors: body.field_errors.unwrap_or_default(),
                })
            }
        } else {
            let status = response.status();
            let error_text = response.text().await?;
            error!("Submission endpoint error {}: {}", status, error_text);
            Err(format!("Submission endpoint returned {}", status).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_refuses_a_second_concurrent_submit() {
        let submitter = RoiSubmitter::new(
            SubmitterConfig::new("http://127.0.0.1:8000/api".to_string()).unwrap(),
        );

        assert!(submitter.begin());
        assert!(!submitter.begin(), "second submit must be refused");

        submitter.finish();
        assert!(submitter.begin(), "latch must release after completion");
        submitter.finish();
    }

    #[test]
    fn endpoint_url_is_checked_up_front() {
        assert!(SubmitterConfig::new("http://127.0.0.1:8000/api".to_string()).is_ok());
        assert!(SubmitterConfig::new("not a url".to_string()).is_err());
    }

    #[test]
    fn from_env_falls_back_to_the_local_server() {
        // ROI_ENDPOINT_URL is unset in the test environment
        let config = SubmitterConfig::from_env().unwrap();
        assert!(config.endpoint_url.starts_with("http://127.0.0.1:8000"));
    }
}
