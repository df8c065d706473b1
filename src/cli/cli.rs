use tracing::info;

use crate::config::Config;
use crate::database::DbPool;
use crate::models::CliApp;
use crate::submitter::{RoiSubmitter, SubmitterConfig};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone)]
pub enum MenuAction {
    StartServer,
    RoiCalculator,
    ShowStats,
    ExportSubmissions,
    Exit,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuAction::StartServer => write!(f, "🚀 Start the capture API server"),
            MenuAction::RoiCalculator => write!(f, "🧮 Run the ROI calculator"),
            MenuAction::ShowStats => write!(f, "📊 Show submission statistics"),
            MenuAction::ExportSubmissions => write!(f, "📤 Export ROI submissions"),
            MenuAction::Exit => write!(f, "🚪 Exit"),
        }
    }
}

impl CliApp {
    pub async fn new(config: Config, db_pool: DbPool) -> Result<Self> {
        let submitter_config = SubmitterConfig::from_env()?;
        info!(
            "Calculator submissions go to {}",
            submitter_config.endpoint_url
        );
        let submitter = RoiSubmitter::new(submitter_config);

        Ok(Self {
            config,
            db_pool,
            submitter,
        })
    }
}
