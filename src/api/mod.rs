// src/api/mod.rs
pub mod experiments;
pub mod industries;
pub mod leads;
pub mod roi;
pub mod stats;

// Re-export all route functions
pub use experiments::*;
pub use industries::*;
pub use leads::*;
pub use roi::*;
pub use stats::*;
