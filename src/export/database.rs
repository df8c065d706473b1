// src/export/database.rs
use super::types::{ExportJob, RoiExportRow};
use crate::database::DbPool;
use crate::roi::RoiResult;
use std::collections::HashSet;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub struct ExportDatabase {
    db_pool: DbPool,
}

impl ExportDatabase {
    pub fn new(db_pool: DbPool) -> Self {
        Self { db_pool }
    }

    pub async fn extract_rows(&self, job: &ExportJob) -> Result<Vec<RoiExportRow>> {
        let conn = self.db_pool.get().await?;

        let sql = format!(
            "SELECT id, submitted_at, company_name, email, phone, industry, \
             monthly_installations, average_technicians, average_travel_time, \
             fuel_cost_per_gallon, average_wage_per_hour, net_monthly_savings, \
             net_annual_savings, roi_percentage, payback_period_months, results_json \
             FROM roi_submissions {} ORDER BY submitted_at DESC",
            job.sql_filter
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            let results_json: String = row.get(15)?;
            let results: RoiResult = serde_json::from_str(&results_json).map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    15,
                    results_json.clone(),
                    rusqlite::types::Type::Text,
                )
            })?;

            Ok(RoiExportRow {
                id: row.get(0)?,
                submitted_at: row.get(1)?,
                company_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                email: row.get(3)?,
                phone: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                industry: row.get(5)?,
                monthly_installations: row.get(6)?,
                average_technicians: row.get(7)?,
                average_travel_time: row.get(8)?,
                fuel_cost_per_gallon: row.get(9)?,
                average_wage_per_hour: row.get(10)?,
                net_monthly_savings: row.get(11)?,
                net_annual_savings: row.get(12)?,
                roi_percentage: row.get(13)?,
                payback_period_months: row.get(14)?,
                break_even_point: results.roi.break_even_point,
            })
        })?;

        let mut exported = Vec::new();
        let mut seen_emails = HashSet::new();

        for row in rows {
            let row = row?;

            // One row per address; rows arrive newest first, so the
            // latest submission wins
            if !seen_emails.insert(row.email.clone()) {
                continue;
            }

            exported.push(row);
        }

        Ok(exported)
    }
}
