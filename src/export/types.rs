// src/export/types.rs
use serde::Serialize;
use std::collections::HashMap;

// One flattened export row. These carry full precision; any rounding
// happens in the CSV writer at render time.
#[derive(Debug, Clone, Serialize)]
pub struct RoiExportRow {
    pub id: String,
    pub submitted_at: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub industry: String,
    pub monthly_installations: f64,
    pub average_technicians: i64,
    pub average_travel_time: f64,
    pub fuel_cost_per_gallon: f64,
    pub average_wage_per_hour: f64,
    pub net_monthly_savings: f64,
    pub net_annual_savings: f64,
    pub roi_percentage: f64,
    pub payback_period_months: f64,
    pub break_even_point: String,
}

#[derive(Debug)]
pub struct ExportJob {
    pub title: String,
    pub sql_filter: String,
}

#[derive(Debug, Clone)]
pub struct ExportStats {
    pub total_rows: usize,
    pub by_industry: HashMap<String, usize>,
    pub positive_net: usize,
    pub average_net_monthly_savings: f64,
    pub average_roi_percentage: f64,
}
