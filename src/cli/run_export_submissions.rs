// src/cli/run_export_submissions.rs
use crate::export::{ExportDatabase, ExportJobBuilder, SubmissionExporter};
use crate::{models::CliApp, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Select};

impl CliApp {
    pub async fn run_export_submissions(&self) -> Result<()> {
        println!("\n📤 ROI Submission Export");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        // Initialize components
        let job_builder = ExportJobBuilder::new();
        let database = ExportDatabase::new(self.db_pool.clone());
        let exporter = SubmissionExporter::new(&self.config.output);

        // Select export type
        let selection = job_builder.select_export_type().await?;
        let job = job_builder.build_job(selection).await?;

        println!("\n🔍 Export: {}", job.title);

        // Extract matching submissions
        println!("📊 Extracting submissions from database...");
        let rows = database.extract_rows(&job).await?;

        if rows.is_empty() {
            println!("❌ No submissions match the criteria");
            return Ok(());
        }

        // Show preview
        self.show_export_preview(&rows);

        // Pick a format and confirm
        let formats = ["📄 CSV (spreadsheet ready)", "🧾 JSON (full precision)"];
        let format = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select output format")
            .items(&formats)
            .interact()?;

        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Export {} submissions?", rows.len()))
            .interact()?;

        if !proceed {
            println!("❌ Export cancelled");
            return Ok(());
        }

        let filename = if format == 1 {
            let filename = exporter.generate_filename("json");
            exporter.export_to_json(&rows, &filename).await?;
            filename
        } else {
            let filename = exporter.generate_filename("csv");
            exporter.export_to_csv(&rows, &filename).await?;
            filename
        };

        // Show results
        let stats = exporter.generate_stats(&rows);

        println!("\n✅ Submission export completed!");
        println!("📁 File: {}", filename);
        println!("📊 Total submissions: {}", stats.total_rows);

        exporter.print_stats(&stats);

        Ok(())
    }

    fn show_export_preview(&self, rows: &[crate::export::RoiExportRow]) {
        println!("\n📋 Export Preview:");
        println!("━━━━━━━━━━━━━━━━━━━━━");

        for (i, row) in rows.iter().take(5).enumerate() {
            let company = if row.company_name.is_empty() {
                "Unknown"
            } else {
                row.company_name.as_str()
            };

            println!(
                "{}. {} ({}) - {} - ${:.2}/month",
                i + 1,
                row.email,
                company,
                row.industry,
                row.net_monthly_savings
            );
        }

        if rows.len() > 5 {
            println!("   ... and {} more", rows.len() - 5);
        }
    }
}
