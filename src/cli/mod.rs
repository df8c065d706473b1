pub mod cli;
pub mod run;
pub mod run_calculator;
pub mod run_export_submissions;
pub mod run_server;
pub mod show_stats;
