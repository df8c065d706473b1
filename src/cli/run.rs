use dialoguer::{theme::ColorfulTheme, Select};

use crate::{
    cli::cli::MenuAction,
    models::{CliApp, Result},
};
use tracing::error;

impl CliApp {
    pub async fn run(&self) -> Result<()> {
        println!("\n🚀 Welcome to ROI Capture!");
        println!("═══════════════════════════════════════");

        // Show initial stats
        self.show_stats().await?;

        loop {
            let actions = vec![
                MenuAction::StartServer,
                MenuAction::RoiCalculator,
                MenuAction::ShowStats,
                MenuAction::ExportSubmissions,
                MenuAction::Exit,
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("\nSelect an action")
                .default(0) // Default to the server
                .items(&actions)
                .interact()?;

            match &actions[selection] {
                MenuAction::StartServer => {
                    if let Err(e) = self.run_server().await {
                        error!("Server failed: {}", e);
                    }
                }
                MenuAction::RoiCalculator => {
                    if let Err(e) = self.run_calculator().await {
                        error!("Calculator failed: {}", e);
                    }
                }
                MenuAction::ShowStats => {
                    if let Err(e) = self.show_stats().await {
                        error!("Failed to show stats: {}", e);
                    }
                }
                MenuAction::ExportSubmissions => {
                    if let Err(e) = self.run_export_submissions().await {
                        error!("Submission export failed: {}", e);
                    }
                }
                MenuAction::Exit => {
                    println!("\n👋 Thanks for using ROI Capture!");
                    break;
                }
            }
        }

        Ok(())
    }
}
