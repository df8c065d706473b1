// src/export/mod.rs
pub mod config;
pub mod database;
pub mod exporter;
pub mod types;

// Re-export main types for convenience
pub use config::ExportJobBuilder;
pub use database::ExportDatabase;
pub use exporter::SubmissionExporter;
pub use types::{ExportJob, ExportStats, RoiExportRow};
