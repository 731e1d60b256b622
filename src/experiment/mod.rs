//! Multi-seed experiments comparing the search strategies.
//!
//! Every configured [`Algorithm`](crate::search::Algorithm) runs once per
//! seed on the market generated from that seed. Results land in one
//! [`Sheet`] per algorithm with one [`SheetRow`] per seed, ready for any
//! [`ReportSink`].

mod config;
mod report;
mod runner;

pub use config::ExperimentConfig;
pub use report::{DelimitedSink, ExperimentReport, ReportSink, Sheet, SheetRow};
pub use runner::ExperimentRunner;
