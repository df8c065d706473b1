// src/export/config.rs
use super::types::ExportJob;
use crate::roi::Industry;
use dialoguer::{theme::ColorfulTheme, Select};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub struct ExportJobBuilder;

impl ExportJobBuilder {
    pub fn new() -> Self {
        Self
    }

    pub async fn build_job(&self, selection: usize) -> Result<ExportJob> {
        let job = match selection {
            0 => ExportJob {
                title: "All Submissions".to_string(),
                sql_filter: String::new(),
            },
            1 => ExportJob {
                title: "Positive Net Savings".to_string(),
                sql_filter: "WHERE net_monthly_savings > 0".to_string(),
            },
            2 => ExportJob {
                title: "High-Value Prospects".to_string(),
                sql_filter: "WHERE net_annual_savings > 25000 AND average_technicians >= 5"
                    .to_string(),
            },
            3 => {
                let industries = Industry::all();
                let labels: Vec<&str> = industries.iter().map(|i| i.label()).collect();

                let pick = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt("Select industry")
                    .items(&labels)
                    .interact()?;
                let industry = industries[pick];

                ExportJob {
                    title: format!("{} Submissions", industry.label()),
                    // keys come from the closed catalog, never from free text
                    sql_filter: format!("WHERE industry = '{}'", industry.key()),
                }
            }
            _ => ExportJob {
                title: "All Submissions".to_string(),
                sql_filter: String::new(),
            },
        };

        Ok(job)
    }

    pub fn get_export_type_options(&self) -> Vec<&'static str> {
        vec![
            "📊 All Submissions",
            "💰 Positive Net Savings (winners only)",
            "🎯 High-Value Prospects (large fleets, large savings)",
            "🏭 Single Industry",
        ]
    }

    pub async fn select_export_type(&self) -> Result<usize> {
        let export_types = self.get_export_type_options();

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select export type")
            .items(&export_types)
            .interact()?;

        Ok(selection)
    }
}
