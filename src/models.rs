use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    config::Config,
    database::DbPool,
    roi::{RoiInput, RoiResult},
    submitter::RoiSubmitter,
};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

// Wire shape of POST /api/roi: the calculator input flattened to the top
// level, with the client's locally computed report attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiSubmissionRequest {
    #[serde(flatten)]
    pub input: RoiInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculations: Option<RoiResult>,
}

// Wire shape of POST /api/leads, shared by the demo-request,
// enterprise-contact and trial-signup forms. Required members default so
// a sparse payload reaches validation instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadSubmissionRequest {
    #[serde(default)]
    pub form_type: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<HashMap<String, String>>,
}

impl SubmissionResponse {
    pub fn accepted(message: String) -> Self {
        Self {
            ok: true,
            message: Some(message),
            field_errors: None,
        }
    }

    pub fn rejected(message: String, field_errors: HashMap<String, String>) -> Self {
        Self {
            ok: false,
            message: Some(message),
            field_errors: Some(field_errors),
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            ok: false,
            message: Some(message),
            field_errors: None,
        }
    }
}

pub struct CliApp {
    pub config: Config,
    pub db_pool: DbPool,
    pub submitter: RoiSubmitter,
}
