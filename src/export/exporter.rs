// src/export/exporter.rs
use super::types::{ExportStats, RoiExportRow};
use crate::config::OutputConfig;
use chrono::Utc;
use std::collections::HashMap;
use std::io::Write;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

// Company names can carry commas; quote a field only when it needs it
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub struct SubmissionExporter {
    output_directory: String,
    pretty_json: bool,
}

impl SubmissionExporter {
    pub fn new(output: &OutputConfig) -> Self {
        Self {
            output_directory: output.directory.trim_end_matches('/').to_string(),
            pretty_json: output.pretty_json,
        }
    }

    pub async fn export_to_csv(&self, rows: &[RoiExportRow], filename: &str) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = std::path::Path::new(filename).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = std::fs::File::create(filename)?;

        // Write CSV header
        writeln!(
            file,
            "id,submitted_at,company_name,email,phone,industry,monthly_installations,average_technicians,average_travel_time,fuel_cost_per_gallon,average_wage_per_hour,net_monthly_savings,net_annual_savings,roi_percentage,payback_period_months,break_even_point"
        )?;

        // Write data rows
        for row in rows {
            writeln!(
                file,
                "{},{},{},{},{},{},{},{},{},{},{},{:.2},{:.2},{:.1},{:.1},{}",
                row.id,
                row.submitted_at,
                csv_field(&row.company_name),
                row.email,
                row.phone,
                row.industry,
                row.monthly_installations,
                row.average_technicians,
                row.average_travel_time,
                row.fuel_cost_per_gallon,
                row.average_wage_per_hour,
                row.net_monthly_savings,
                row.net_annual_savings,
                row.roi_percentage,
                row.payback_period_months,
                csv_field(&row.break_even_point),
            )?;
        }

        Ok(())
    }

    pub async fn export_to_json(&self, rows: &[RoiExportRow], filename: &str) -> Result<()> {
        if let Some(parent) = std::path::Path::new(filename).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = if self.pretty_json {
            serde_json::to_string_pretty(rows)?
        } else {
            serde_json::to_string(rows)?
        };

        std::fs::write(filename, json)?;
        Ok(())
    }

    pub fn generate_stats(&self, rows: &[RoiExportRow]) -> ExportStats {
        let mut industry_counts: HashMap<String, usize> = HashMap::new();

        for row in rows {
            *industry_counts.entry(row.industry.clone()).or_insert(0) += 1;
        }

        let positive_net = rows.iter().filter(|r| r.net_monthly_savings > 0.0).count();

        let (average_net, average_roi) = if rows.is_empty() {
            (0.0, 0.0)
        } else {
            (
                rows.iter().map(|r| r.net_monthly_savings).sum::<f64>() / rows.len() as f64,
                rows.iter().map(|r| r.roi_percentage).sum::<f64>() / rows.len() as f64,
            )
        };

        ExportStats {
            total_rows: rows.len(),
            by_industry: industry_counts,
            positive_net,
            average_net_monthly_savings: average_net,
            average_roi_percentage: average_roi,
        }
    }

    pub fn print_stats(&self, stats: &ExportStats) {
        println!("\n📊 Export Statistics:");
        println!("━━━━━━━━━━━━━━━━━━━━━");

        println!("🏭 By Industry:");
        for (industry, count) in &stats.by_industry {
            println!(
                "   {} {}: {}",
                match industry.as_str() {
                    "hvac" => "🌡️",
                    "solar" => "☀️",
                    "telecom" => "📡",
                    "security" => "🔒",
                    "appliance" => "🔌",
                    "electrical" => "⚡",
                    "plumbing" => "🔧",
                    "roofing" => "🏠",
                    "internet" => "🌐",
                    _ => "📦",
                },
                industry,
                count
            );
        }

        println!(
            "\n💰 Positive net savings: {} of {}",
            stats.positive_net, stats.total_rows
        );
        println!(
            "⭐ Average net monthly savings: ${:.2}",
            stats.average_net_monthly_savings
        );
        println!("📈 Average ROI: {:.1}%", stats.average_roi_percentage);
    }

    pub fn generate_filename(&self, extension: &str) -> String {
        format!(
            "{}/roi_submissions_{}.{}",
            self.output_directory,
            Utc::now().format("%Y%m%d_%H%M%S"),
            extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn output_config(directory: &str) -> OutputConfig {
        OutputConfig {
            directory: directory.to_string(),
            pretty_json: true,
        }
    }

    fn sample_row(industry: &str, email: &str, net_monthly: f64) -> RoiExportRow {
        RoiExportRow {
            id: "5f2b1c44-0000-0000-0000-000000000000".to_string(),
            submitted_at: "2026-06-01T12:00:00+00:00".to_string(),
            company_name: "Comfort Air, LLC".to_string(),
            email: email.to_string(),
            phone: String::new(),
            industry: industry.to_string(),
            monthly_installations: 100.0,
            average_technicians: 5,
            average_travel_time: 45.0,
            fuel_cost_per_gallon: 4.5,
            average_wage_per_hour: 35.0,
            net_monthly_savings: net_monthly,
            net_annual_savings: net_monthly * 12.0,
            roi_percentage: 899.6,
            payback_period_months: 0.1111,
            break_even_point: "1 months".to_string(),
        }
    }

    #[tokio::test]
    async fn csv_has_a_header_and_quotes_commas() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SubmissionExporter::new(&output_config(dir.path().to_str().unwrap()));

        let rows = vec![
            sample_row("hvac", "a@x.example", 4453.125),
            sample_row("solar", "b@x.example", 1200.5),
        ];
        let filename = dir.path().join("export.csv");
        exporter
            .export_to_csv(&rows, filename.to_str().unwrap())
            .await
            .unwrap();

        let written = std::fs::read_to_string(&filename).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,submitted_at,company_name,email"));
        assert!(lines[1].contains("\"Comfort Air, LLC\""));
        assert!(lines[1].contains("53437.50"));
    }

    #[tokio::test]
    async fn json_layout_follows_the_pretty_flag() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![sample_row("hvac", "a@x.example", 4453.125)];

        let pretty = SubmissionExporter::new(&output_config(dir.path().to_str().unwrap()));
        let pretty_file = dir.path().join("pretty.json");
        pretty
            .export_to_json(&rows, pretty_file.to_str().unwrap())
            .await
            .unwrap();
        let pretty_text = std::fs::read_to_string(&pretty_file).unwrap();
        assert!(pretty_text.contains('\n'));

        let mut compact_config = output_config(dir.path().to_str().unwrap());
        compact_config.pretty_json = false;
        let compact = SubmissionExporter::new(&compact_config);
        let compact_file = dir.path().join("compact.json");
        compact
            .export_to_json(&rows, compact_file.to_str().unwrap())
            .await
            .unwrap();
        let compact_text = std::fs::read_to_string(&compact_file).unwrap();
        assert!(!compact_text.contains('\n'));

        // Full precision survives the JSON path
        assert!(compact_text.contains("4453.125"));
    }

    #[test]
    fn stats_break_down_by_industry_and_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SubmissionExporter::new(&output_config(dir.path().to_str().unwrap()));

        let rows = vec![
            sample_row("hvac", "a@x.example", 4000.0),
            sample_row("hvac", "b@x.example", 2000.0),
            sample_row("solar", "c@x.example", -300.0),
        ];

        let stats = exporter.generate_stats(&rows);
        assert_eq!(stats.total_rows, 3);
        assert_eq!(stats.by_industry.get("hvac"), Some(&2));
        assert_eq!(stats.by_industry.get("solar"), Some(&1));
        assert_eq!(stats.positive_net, 2);
        assert_eq!(stats.average_net_monthly_savings, 1900.0);
    }

    #[test]
    fn empty_export_yields_zeroed_stats() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SubmissionExporter::new(&output_config(dir.path().to_str().unwrap()));

        let stats = exporter.generate_stats(&[]);
        assert_eq!(stats.total_rows, 0);
        assert_eq!(stats.average_net_monthly_savings, 0.0);
        assert!(stats.by_industry.is_empty());
    }

    #[test]
    fn filenames_land_in_the_configured_directory() {
        let exporter = SubmissionExporter::new(&output_config("out/exports/"));
        let filename = exporter.generate_filename("csv");
        assert!(filename.starts_with("out/exports/roi_submissions_"));
        assert!(filename.ends_with(".csv"));
    }
}
