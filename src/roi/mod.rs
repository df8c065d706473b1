// src/roi/mod.rs
pub mod calculator;
pub mod factors;

// Re-export the calculator surface for convenience
pub use calculator::{compute_roi, RoiInput, RoiResult};
pub use factors::{Industry, IndustryFactor};
