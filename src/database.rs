use chrono::{DateTime, Utc};
use mobc::{Manager, Pool};
use rusqlite::{params, Connection, Result as SqliteResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::roi::{Industry, RoiInput, RoiResult};

fn log_rusqlite_error(context: &str, err: &rusqlite::Error) {
    error!("🔥 SQLite error in {}: {:?}", context, err);

    if let rusqlite::Error::ExecuteReturnedResults = err {
        error!("💥 execute() was called on a statement that returns rows; use query_row/query_map");
    }
}

// One captured ROI report: the form inputs, the resolved industry, and the
// derived numbers. Headline outcomes are duplicated into REAL columns so
// stats and filters stay in SQL; the full report rides along as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRoiSubmission {
    pub id: String,
    pub company_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub industry: Industry,
    pub monthly_installations: f64,
    pub average_technicians: i64,
    pub average_travel_time: f64,
    pub fuel_cost_per_gallon: f64,
    pub average_wage_per_hour: f64,
    pub results: RoiResult,
    pub submitted_at: DateTime<Utc>,
}

impl StoredRoiSubmission {
    // Validation runs before this; a payload that still lacks contact or
    // numbers yields None rather than a panic.
    pub fn from_parts(input: &RoiInput, results: RoiResult) -> Option<Self> {
        let email = input
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())?
            .to_string();

        Some(Self {
            id: Uuid::new_v4().to_string(),
            company_name: input.company_name.clone(),
            email,
            phone: input.phone.clone(),
            industry: Industry::from_key(&input.industry),
            monthly_installations: input.monthly_installations?,
            average_technicians: input.average_technicians? as i64,
            average_travel_time: input.average_travel_time?,
            fuel_cost_per_gallon: input.fuel_cost_per_gallon?,
            average_wage_per_hour: input.average_wage_per_hour?,
            results,
            submitted_at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLeadSubmission {
    pub id: String,
    pub form_type: String,
    pub full_name: String,
    pub email: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub industry: Option<Industry>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct SqliteManager {
    db_path: String,
}

impl SqliteManager {
    pub fn new(db_path: String) -> Self {
        debug!("🔧 Creating SqliteManager for path: {}", db_path);
        Self { db_path }
    }
}

#[async_trait::async_trait]
impl Manager for SqliteManager {
    type Connection = Connection;
    type Error = rusqlite::Error;

    async fn connect(&self) -> Result<Self::Connection, Self::Error> {
        debug!("🔌 SqliteManager::connect() - Opening database: {}", self.db_path);

        let conn = match Connection::open(&self.db_path) {
            Ok(c) => c,
            Err(e) => {
                log_rusqlite_error("Connection::open", &e);
                return Err(e);
            }
        };

        // Some PRAGMA statements return a row, so execute() alone is not enough
        let exec_pragma =
            |conn: &Connection, pragma: &str, name: &str| -> Result<(), rusqlite::Error> {
                match conn.execute(pragma, []) {
                    Ok(_) => Ok(()),
                    Err(rusqlite::Error::ExecuteReturnedResults) => {
                        conn.query_row(pragma, [], |_| Ok(()))
                    }
                    Err(e) => {
                        debug!("❌ {} failed: {}", name, e);
                        Err(e)
                    }
                }
            };

        exec_pragma(&conn, "PRAGMA journal_mode=WAL", "PRAGMA journal_mode")?;
        exec_pragma(&conn, "PRAGMA synchronous=NORMAL", "PRAGMA synchronous")?;
        exec_pragma(&conn, "PRAGMA cache_size=1000000", "PRAGMA cache_size")?;
        exec_pragma(&conn, "PRAGMA temp_store=memory", "PRAGMA temp_store")?;
        exec_pragma(&conn, "PRAGMA mmap_size=268435456", "PRAGMA mmap_size")?;

        if let Err(e) = init_database(&conn) {
            log_rusqlite_error("init_database", &e);
            return Err(e);
        }
        debug!("✅ Database schema initialized");

        Ok(conn)
    }

    async fn check(&self, conn: Self::Connection) -> Result<Self::Connection, Self::Error> {
        match conn.query_row("SELECT 1", [], |_| Ok(())) {
            Ok(_) => Ok(conn),
            Err(e) => {
                log_rusqlite_error("connection check", &e);
                Err(e)
            }
        }
    }
}

fn init_database(conn: &Connection) -> SqliteResult<()> {
    debug!("🏗️ init_database() - Creating tables and indexes...");

    create_roi_submissions_table(conn)?;
    create_lead_submissions_table(conn)?;
    create_indexes(conn)?;

    Ok(())
}

pub type DbPool = Pool<SqliteManager>;

pub async fn create_db_pool(
    db_path: &str,
) -> Result<DbPool, Box<dyn std::error::Error + Send + Sync>> {
    debug!("🏊 create_db_pool() - Creating connection pool for: {}", db_path);

    // Ensure directory exists
    if let Some(parent) = Path::new(db_path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let manager = SqliteManager::new(db_path.to_string());
    let pool = Pool::builder().max_open(10).max_idle(5).build(manager);

    info!("✓ SQLite connection pool created: {}", db_path);
    Ok(pool)
}

fn create_roi_submissions_table(conn: &Connection) -> SqliteResult<()> {
    debug!("🧮 Creating roi_submissions table...");
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS roi_submissions (
            id TEXT PRIMARY KEY,
            company_name TEXT,
            email TEXT NOT NULL,
            phone TEXT,
            industry TEXT NOT NULL,
            monthly_installations REAL NOT NULL,
            average_technicians INTEGER NOT NULL,
            average_travel_time REAL NOT NULL,
            fuel_cost_per_gallon REAL NOT NULL,
            average_wage_per_hour REAL NOT NULL,
            net_monthly_savings REAL NOT NULL,
            net_annual_savings REAL NOT NULL,
            roi_percentage REAL NOT NULL,
            payback_period_months REAL NOT NULL,
            results_json TEXT NOT NULL,
            submitted_at TEXT NOT NULL
        )
        "#,
        [],
    )?;
    Ok(())
}

fn create_lead_submissions_table(conn: &Connection) -> SqliteResult<()> {
    debug!("📇 Creating lead_submissions table...");
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS lead_submissions (
            id TEXT PRIMARY KEY,
            form_type TEXT NOT NULL,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            company_name TEXT,
            phone TEXT,
            industry TEXT,
            message TEXT,
            created_at TEXT NOT NULL
        )
        "#,
        [],
    )?;
    Ok(())
}

fn create_indexes(conn: &Connection) -> SqliteResult<()> {
    debug!("🔗 Creating database indexes...");
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_roi_submissions_email ON roi_submissions(email)",
        "CREATE INDEX IF NOT EXISTS idx_roi_submissions_industry ON roi_submissions(industry)",
        "CREATE INDEX IF NOT EXISTS idx_roi_submissions_submitted_at ON roi_submissions(submitted_at DESC)",
        "CREATE INDEX IF NOT EXISTS idx_roi_submissions_net_savings ON roi_submissions(net_monthly_savings DESC)",
        "CREATE INDEX IF NOT EXISTS idx_lead_submissions_form_type ON lead_submissions(form_type)",
        "CREATE INDEX IF NOT EXISTS idx_lead_submissions_email ON lead_submissions(email)",
        "CREATE INDEX IF NOT EXISTS idx_lead_submissions_created_at ON lead_submissions(created_at DESC)",
    ];

    for (i, index_sql) in indexes.iter().enumerate() {
        if let Err(e) = conn.execute(index_sql, []) {
            log_rusqlite_error(&format!("create index {}", i + 1), &e);
            return Err(e);
        }
    }

    Ok(())
}

pub async fn insert_roi_submission(
    pool: &DbPool,
    submission: &StoredRoiSubmission,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    debug!("💾 insert_roi_submission() - {}", submission.id);

    let conn = pool.get().await?;
    let results_json = serde_json::to_string(&submission.results)?;

    match conn.execute(
        r#"
        INSERT INTO roi_submissions (
            id, company_name, email, phone, industry,
            monthly_installations, average_technicians, average_travel_time,
            fuel_cost_per_gallon, average_wage_per_hour,
            net_monthly_savings, net_annual_savings, roi_percentage,
            payback_period_months, results_json, submitted_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
        "#,
        params![
            submission.id,
            submission.company_name.as_deref().unwrap_or(""),
            submission.email,
            submission.phone.as_deref().unwrap_or(""),
            submission.industry.key(),
            submission.monthly_installations,
            submission.average_technicians,
            submission.average_travel_time,
            submission.fuel_cost_per_gallon,
            submission.average_wage_per_hour,
            submission.results.savings.net_monthly_savings,
            submission.results.savings.net_annual_savings,
            submission.results.roi.roi_percentage,
            submission.results.roi.payback_period_months,
            results_json,
            submission.submitted_at.to_rfc3339(),
        ],
    ) {
        Ok(_) => {
            debug!("✅ ROI submission stored: {}", submission.id);
            Ok(())
        }
        Err(e) => {
            log_rusqlite_error("insert_roi_submission", &e);
            Err(Box::new(e))
        }
    }
}

pub async fn insert_lead_submission(
    pool: &DbPool,
    lead: &StoredLeadSubmission,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    debug!("💾 insert_lead_submission() - {} ({})", lead.id, lead.form_type);

    let conn = pool.get().await?;

    match conn.execute(
        r#"
        INSERT INTO lead_submissions (
            id, form_type, full_name, email, company_name, phone,
            industry, message, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        params![
            lead.id,
            lead.form_type,
            lead.full_name,
            lead.email,
            lead.company_name.as_deref().unwrap_or(""),
            lead.phone.as_deref().unwrap_or(""),
            lead.industry.map(|i| i.key()).unwrap_or(""),
            lead.message.as_deref().unwrap_or(""),
            lead.created_at.to_rfc3339(),
        ],
    ) {
        Ok(_) => {
            debug!("✅ Lead stored: {}", lead.id);
            Ok(())
        }
        Err(e) => {
            log_rusqlite_error("insert_lead_submission", &e);
            Err(Box::new(e))
        }
    }
}

const ROI_SUBMISSION_COLUMNS: &str = "id, company_name, email, phone, industry, \
     monthly_installations, average_technicians, average_travel_time, \
     fuel_cost_per_gallon, average_wage_per_hour, results_json, submitted_at";

fn roi_submission_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredRoiSubmission> {
    let get_optional_string = |idx: usize| -> Option<String> {
        match row.get::<_, Option<String>>(idx) {
            Ok(Some(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    };

    let industry_key: String = row.get(4)?;

    let results_json: String = row.get(10)?;
    let results: RoiResult = serde_json::from_str(&results_json).map_err(|_| {
        rusqlite::Error::InvalidColumnType(10, results_json.clone(), rusqlite::types::Type::Text)
    })?;

    let submitted_at_str: String = row.get(11)?;
    let submitted_at = DateTime::parse_from_rfc3339(&submitted_at_str)
        .map_err(|_| {
            rusqlite::Error::InvalidColumnType(
                11,
                submitted_at_str.clone(),
                rusqlite::types::Type::Text,
            )
        })?
        .with_timezone(&Utc);

    Ok(StoredRoiSubmission {
        id: row.get(0)?,
        company_name: get_optional_string(1),
        email: row.get(2)?,
        phone: get_optional_string(3),
        industry: Industry::from_key(&industry_key),
        monthly_installations: row.get(5)?,
        average_technicians: row.get(6)?,
        average_travel_time: row.get(7)?,
        fuel_cost_per_gallon: row.get(8)?,
        average_wage_per_hour: row.get(9)?,
        results,
        submitted_at,
    })
}

pub async fn get_roi_submission(
    pool: &DbPool,
    id: &str,
) -> Result<Option<StoredRoiSubmission>, Box<dyn std::error::Error + Send + Sync>> {
    debug!("🔍 get_roi_submission() - {}", id);

    let conn = pool.get().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM roi_submissions WHERE id = ?",
        ROI_SUBMISSION_COLUMNS
    ))?;

    let mut rows = stmt.query_map([id], |row| roi_submission_from_row(row))?;

    if let Some(submission) = rows.next() {
        let submission = submission?;
        debug!("✅ Found ROI submission: {}", submission.id);
        return Ok(Some(submission));
    }

    debug!("❌ ROI submission not found: {}", id);
    Ok(None)
}

pub async fn list_roi_submissions(
    pool: &DbPool,
    page: usize,
    per_page: usize,
    industry: Option<Industry>,
    min_net_savings: Option<f64>,
) -> Result<Vec<StoredRoiSubmission>, Box<dyn std::error::Error + Send + Sync>> {
    let offset = (page.max(1) - 1) * per_page;

    let conn = pool.get().await?;

    let mut where_conditions: Vec<&str> = Vec::new();
    let mut params: Vec<String> = Vec::new();

    if let Some(industry) = industry {
        where_conditions.push("industry = ?");
        params.push(industry.key().to_string());
    }
    if let Some(min) = min_net_savings {
        where_conditions.push("net_monthly_savings >= ?");
        params.push(min.to_string());
    }

    let where_clause = if where_conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", where_conditions.join(" AND "))
    };

    let query = format!(
        "SELECT {} FROM roi_submissions {} ORDER BY submitted_at DESC LIMIT {} OFFSET {}",
        ROI_SUBMISSION_COLUMNS, where_clause, per_page, offset
    );

    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
        roi_submission_from_row(row)
    })?;

    let mut submissions = Vec::new();
    for row in rows {
        submissions.push(row?);
    }

    debug!("✅ Listed {} ROI submissions", submissions.len());
    Ok(submissions)
}

pub async fn list_lead_submissions(
    pool: &DbPool,
    page: usize,
    per_page: usize,
    form_type: Option<&str>,
) -> Result<Vec<StoredLeadSubmission>, Box<dyn std::error::Error + Send + Sync>> {
    let offset = (page.max(1) - 1) * per_page;

    let conn = pool.get().await?;

    let (where_clause, params) = match form_type {
        Some(kind) => ("WHERE form_type = ?", vec![kind.to_string()]),
        None => ("", Vec::new()),
    };

    let query = format!(
        "SELECT id, form_type, full_name, email, company_name, phone, industry, message, created_at \
         FROM lead_submissions {} ORDER BY created_at DESC LIMIT {} OFFSET {}",
        where_clause, per_page, offset
    );

    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
        let get_optional_string = |idx: usize| -> Option<String> {
            match row.get::<_, Option<String>>(idx) {
                Ok(Some(s)) if !s.is_empty() => Some(s),
                _ => None,
            }
        };

        let created_at_str: String = row.get(8)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    8,
                    created_at_str.clone(),
                    rusqlite::types::Type::Text,
                )
            })?
            .with_timezone(&Utc);

        Ok(StoredLeadSubmission {
            id: row.get(0)?,
            form_type: row.get(1)?,
            full_name: row.get(2)?,
            email: row.get(3)?,
            company_name: get_optional_string(4),
            phone: get_optional_string(5),
            industry: get_optional_string(6).map(|k| Industry::from_key(&k)),
            message: get_optional_string(7),
            created_at,
        })
    })?;

    let mut leads = Vec::new();
    for row in rows {
        leads.push(row?);
    }

    debug!("✅ Listed {} lead submissions", leads.len());
    Ok(leads)
}

#[derive(Debug, Serialize)]
pub struct IndustryCount {
    pub industry: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct FormTypeCount {
    pub form_type: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct SubmissionStats {
    pub total_roi_submissions: i64,
    pub roi_last_7_days: i64,
    pub avg_net_monthly_savings: f64,
    pub avg_roi_percentage: f64,
    pub avg_payback_period_months: f64,
    pub roi_by_industry: Vec<IndustryCount>,
    pub total_lead_submissions: i64,
    pub leads_last_7_days: i64,
    pub leads_by_form_type: Vec<FormTypeCount>,
}

pub async fn get_submission_stats(
    pool: &DbPool,
) -> Result<SubmissionStats, Box<dyn std::error::Error + Send + Sync>> {
    debug!("📊 get_submission_stats() - Collecting submission statistics...");

    let conn = match pool.get().await {
        Ok(c) => c,
        Err(e) => {
            error!("💥 Failed to get connection from pool: {}", e);
            return Err(Box::new(e));
        }
    };

    let week_ago = (Utc::now() - chrono::Duration::days(7)).to_rfc3339();

    let total_roi_submissions: i64 =
        conn.query_row("SELECT COUNT(*) FROM roi_submissions", [], |row| row.get(0))?;

    let roi_last_7_days: i64 = conn.query_row(
        "SELECT COUNT(*) FROM roi_submissions WHERE submitted_at > ?",
        [&week_ago],
        |row| row.get(0),
    )?;

    // Averages are NULL on an empty table
    let avg_net_monthly_savings: f64 = conn
        .query_row(
            "SELECT AVG(net_monthly_savings) FROM roi_submissions",
            [],
            |row| row.get::<_, Option<f64>>(0),
        )?
        .unwrap_or(0.0);

    let avg_roi_percentage: f64 = conn
        .query_row("SELECT AVG(roi_percentage) FROM roi_submissions", [], |row| {
            row.get::<_, Option<f64>>(0)
        })?
        .unwrap_or(0.0);

    let avg_payback_period_months: f64 = conn
        .query_row(
            "SELECT AVG(payback_period_months) FROM roi_submissions",
            [],
            |row| row.get::<_, Option<f64>>(0),
        )?
        .unwrap_or(0.0);

    let mut roi_by_industry = Vec::new();
    {
        let mut stmt = conn.prepare(
            "SELECT industry, COUNT(*) FROM roi_submissions GROUP BY industry ORDER BY COUNT(*) DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(IndustryCount {
                industry: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        for row in rows {
            roi_by_industry.push(row?);
        }
    }

    let total_lead_submissions: i64 =
        conn.query_row("SELECT COUNT(*) FROM lead_submissions", [], |row| row.get(0))?;

    let leads_last_7_days: i64 = conn.query_row(
        "SELECT COUNT(*) FROM lead_submissions WHERE created_at > ?",
        [&week_ago],
        |row| row.get(0),
    )?;

    let mut leads_by_form_type = Vec::new();
    {
        let mut stmt = conn.prepare(
            "SELECT form_type, COUNT(*) FROM lead_submissions GROUP BY form_type ORDER BY COUNT(*) DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(FormTypeCount {
                form_type: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        for row in rows {
            leads_by_form_type.push(row?);
        }
    }

    debug!("✅ get_submission_stats() completed");
    Ok(SubmissionStats {
        total_roi_submissions,
        roi_last_7_days,
        avg_net_monthly_savings,
        avg_roi_percentage,
        avg_payback_period_months,
        roi_by_industry,
        total_lead_submissions,
        leads_last_7_days,
        leads_by_form_type,
    })
}
