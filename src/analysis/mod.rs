//! Steady-state throughput analysis for per-client traffic traces.
//!
//! This module provides the full analysis pipeline: trace loading,
//! contiguous-chunk aggregation, interval estimation, per-client goodput,
//! and report generation.

pub mod types;
pub mod loader;
pub mod aggregate;
pub mod stats;
pub mod clients;
pub mod report;

pub use types::*;
pub use loader::load_trace;
pub use aggregate::{batch_means, independent_replicates};
pub use stats::{series_intervals, t_interval};
pub use clients::{analyze_clients, filter_clients};
pub use report::{generate_json_report, generate_text_report};
