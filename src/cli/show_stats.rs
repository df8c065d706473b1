use crate::{database::get_submission_stats, models::CliApp};
use tracing::{debug, error};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

impl CliApp {
    pub async fn show_stats(&self) -> Result<()> {
        debug!("📊 show_stats() - Starting...");

        println!("\n📊 Submission Statistics");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let stats = match get_submission_stats(&self.db_pool).await {
            Ok(stats) => stats,
            Err(e) => {
                error!("💥 get_submission_stats failed: {}", e);
                return Err(e);
            }
        };

        println!("🧮 ROI submissions: {}", stats.total_roi_submissions);
        println!("🗓️  ROI submissions this week: {}", stats.roi_last_7_days);
        println!("📇 Lead submissions: {}", stats.total_lead_submissions);
        println!("🗓️  Leads this week: {}", stats.leads_last_7_days);

        if stats.total_roi_submissions > 0 {
            println!(
                "\n💰 Average net monthly savings: ${:.2}",
                stats.avg_net_monthly_savings
            );
            println!("📈 Average ROI: {:.1}%", stats.avg_roi_percentage);
            println!(
                "⏱️  Average payback: {:.1} months",
                stats.avg_payback_period_months
            );

            println!("\n🏭 ROI submissions by industry:");
            for row in &stats.roi_by_industry {
                println!("  • {}: {}", row.industry, row.count);
            }
        }

        if !stats.leads_by_form_type.is_empty() {
            println!("\n📋 Leads by form:");
            for row in &stats.leads_by_form_type {
                println!("  • {}: {}", row.form_type, row.count);
            }
        }

        debug!("✅ show_stats() completed");
        Ok(())
    }
}
