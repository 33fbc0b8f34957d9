//! Trace throughput analysis CLI.
//!
//! Estimates steady-state throughput from a per-client traffic trace and
//! renders goodput and transmission-time figures for a client subset.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Context, Result};

use tracestat::analysis::{
    self, stats,
    types::{
        AggregatedSeries, AnalysisMetadata, ClientReport, FullAnalysisReport, SeriesIntervals,
        SteadyStateEstimate, SteadyStateReport, TraceRecord,
    },
};
use tracestat::config::{self, AnalysisConfig};
use tracestat::plotting;

#[derive(Parser)]
#[command(name = "tracestat")]
#[command(about = "Steady-state throughput analysis for per-client traffic traces")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the trace file (time, client label, byte count per row)
    #[arg(short, long, default_value = "output.csv")]
    input: PathBuf,

    /// Output directory for reports and charts
    #[arg(short, long, default_value = "analysis_output")]
    output: PathBuf,

    /// Optional YAML file with analysis parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run full analysis (steady state + per-client figures)
    Full,

    /// Estimate steady-state throughput via batch means and replicates
    SteadyState {
        /// Records per batch-means chunk
        #[arg(long)]
        batch_size: Option<usize>,

        /// Records per replicate window
        #[arg(long)]
        replicate_size: Option<usize>,

        /// Confidence level for interval estimates
        #[arg(long)]
        confidence: Option<f64>,
    },

    /// Per-client goodput and transmission-time analysis
    Clients {
        /// Comma-separated client IDs to include
        #[arg(long, value_delimiter = ',')]
        clients: Option<Vec<u32>>,
    },

    /// Show summary statistics for the trace
    Summary,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    // Resolve analysis parameters
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    // Load the trace
    log::info!("Loading trace from {}...", cli.input.display());
    let records = analysis::load_trace(&cli.input)
        .with_context(|| format!("Failed to load trace from {}", cli.input.display()))?;

    let distinct_clients: BTreeSet<u32> = records.iter().map(|r| r.client_id).collect();
    log::info!(
        "Loaded {} records covering {} clients",
        records.len(),
        distinct_clients.len()
    );

    // Create output directory
    fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create output directory: {}", cli.output.display()))?;

    // Run requested analysis
    match cli.command {
        Commands::Full => {
            config.validate()?;

            let steady = run_steady_state(&records, &config, &cli.output)?;
            let clients = run_clients(&records, &config, &cli.output)?;

            let report = FullAnalysisReport {
                metadata: create_metadata(&cli.input, &records, distinct_clients.len()),
                steady_state: Some(steady),
                client_analysis: Some(clients),
            };

            analysis::generate_json_report(&report, &cli.output.join("report.json"))?;
            analysis::generate_text_report(&report, &cli.output.join("report.txt"))?;
            analysis::report::print_summary(&report);

            log::info!(
                "Analysis complete. Reports written to {}",
                cli.output.display()
            );
        }
        Commands::SteadyState {
            batch_size,
            replicate_size,
            confidence,
        } => {
            if let Some(batch_size) = batch_size {
                config.batch_size = batch_size;
            }
            if let Some(replicate_size) = replicate_size {
                config.replicate_size = replicate_size;
            }
            if let Some(confidence) = confidence {
                config.confidence = confidence;
            }
            config.validate()?;

            let steady = run_steady_state(&records, &config, &cli.output)?;

            let report = FullAnalysisReport {
                metadata: create_metadata(&cli.input, &records, distinct_clients.len()),
                steady_state: Some(steady),
                client_analysis: None,
            };

            analysis::generate_json_report(&report, &cli.output.join("steady_state_report.json"))?;
            analysis::generate_text_report(&report, &cli.output.join("steady_state_report.txt"))?;
            analysis::report::print_summary(&report);
        }
        Commands::Clients { clients } => {
            if let Some(clients) = clients {
                config.clients = clients;
            }
            config.validate()?;

            let client_report = run_clients(&records, &config, &cli.output)?;

            let report = FullAnalysisReport {
                metadata: create_metadata(&cli.input, &records, distinct_clients.len()),
                steady_state: None,
                client_analysis: Some(client_report),
            };

            analysis::generate_json_report(&report, &cli.output.join("client_report.json"))?;
            analysis::generate_text_report(&report, &cli.output.join("client_report.txt"))?;
            analysis::report::print_summary(&report);
        }
        Commands::Summary => {
            // Quick summary without full analysis
            let total_bytes: u64 = records.iter().map(|r| r.bytes).sum();
            let first = records
                .iter()
                .map(|r| r.timestamp)
                .fold(f64::MAX, f64::min);
            let last = records
                .iter()
                .map(|r| r.timestamp)
                .fold(f64::MIN, f64::max);

            println!("\n=== TRACE SUMMARY ===\n");
            println!("Trace file: {}", cli.input.display());
            println!("Records: {}", records.len());
            println!(
                "Clients: {} ({:?})",
                distinct_clients.len(),
                distinct_clients
            );
            println!("Time range: {:.3}s - {:.3}s", first, last);
            println!("Total bytes: {}", total_bytes);
            if last > first {
                println!(
                    "Overall rate: {:.3} Mbit/s-equivalent",
                    total_bytes as f64 / (last - first) / 1e6
                );
            }
            println!();
        }
    }

    Ok(())
}

/// Aggregate with both methods, bracket each series with interval estimates,
/// and render the steady-state chart.
fn run_steady_state(
    records: &[TraceRecord],
    config: &AnalysisConfig,
    output_dir: &Path,
) -> Result<SteadyStateReport> {
    log::info!(
        "Aggregating {} records (batch size {}, replicate size {})",
        records.len(),
        config.batch_size,
        config.replicate_size
    );

    let batch = analysis::batch_means(records, config.batch_size)?;
    let replicates = analysis::independent_replicates(records, config.replicate_size)?;

    let batch_intervals = analysis::series_intervals(&batch, config.confidence)
        .ok_or_else(|| eyre!("batch-means aggregation produced no chunks"))?;
    let replicate_intervals = analysis::series_intervals(&replicates, config.confidence)
        .ok_or_else(|| eyre!("replicate aggregation produced no chunks"))?;

    plotting::render_steady_state_chart(
        &batch,
        &batch_intervals,
        &replicates,
        &replicate_intervals,
        output_dir,
    )?;

    Ok(SteadyStateReport {
        batch_means: estimate_from(&batch, batch_intervals),
        independent_replicates: estimate_from(&replicates, replicate_intervals),
    })
}

fn estimate_from(series: &AggregatedSeries, intervals: SeriesIntervals) -> SteadyStateEstimate {
    SteadyStateEstimate {
        method: series.method,
        chunk_size: series.chunk_size,
        chunks: series.len(),
        mean_bytes: stats::mean(&series.bytes_column()).unwrap_or_default(),
        intervals,
    }
}

/// Filter to the configured client subset and render the per-client figures.
fn run_clients(
    records: &[TraceRecord],
    config: &AnalysisConfig,
    output_dir: &Path,
) -> Result<ClientReport> {
    log::info!("Analyzing clients {:?}", config.clients);

    let report = analysis::analyze_clients(records, &config.clients);
    if report.clients.is_empty() {
        log::warn!("No samples for clients {:?} in the trace", config.clients);
    }

    plotting::render_goodput_chart(&report, output_dir)?;
    plotting::render_transmission_time_chart(&report, output_dir)?;

    Ok(report)
}

fn create_metadata(
    trace_file: &Path,
    records: &[TraceRecord],
    distinct_clients: usize,
) -> AnalysisMetadata {
    AnalysisMetadata {
        analysis_timestamp: chrono::Utc::now().to_rfc3339(),
        trace_file: trace_file.display().to_string(),
        total_records: records.len(),
        distinct_clients,
    }
}
