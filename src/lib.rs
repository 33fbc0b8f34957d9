//! # Tracestat - Steady-state throughput analysis for traffic traces
//!
//! This library analyzes per-client network traffic traces (one row per
//! transmitted data unit: timestamp, client label, byte count) to estimate
//! steady-state throughput and per-client goodput.
//!
//! ## Overview
//!
//! Traces come from packet probes of simulated networks, written as a
//! headerless CSV with `Client-<id>` labels. The pipeline aggregates the
//! trace with two variance-reduction methods (batch means and independent
//! replicates), brackets each aggregated series with Student-t confidence
//! intervals, computes per-client goodput and mean transmission time for a
//! configurable client subset, and renders the results as self-contained
//! HTML charts alongside JSON and text reports.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: analysis parameters, YAML loading, and validation
//! - `analysis::loader`: trace file parsing and client label normalization
//! - `analysis::aggregate`: contiguous-chunk aggregation (both methods)
//! - `analysis::stats`: sample moments and Student-t interval estimates
//! - `analysis::clients`: per-client goodput and transmission-time analysis
//! - `analysis::report`: JSON/text report generation
//! - `plotting`: chart construction and HTML rendering
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tracestat::analysis;
//!
//! let records = analysis::load_trace(std::path::Path::new("output.csv"))?;
//! let batches = analysis::batch_means(&records, 300)?;
//! if let Some(intervals) = analysis::series_intervals(&batches, 0.95) {
//!     println!("[{:.1}, {:.1}]", intervals.bytes.lower, intervals.bytes.upper);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return typed errors (`thiserror` enums) at the module
//! level; the application layer wraps them with `color_eyre` context.

pub mod config;
pub mod analysis;
pub mod plotting;
