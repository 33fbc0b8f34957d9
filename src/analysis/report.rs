//! Report generation for trace throughput analysis.
//!
//! Generates both JSON and human-readable text reports.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use super::types::*;

/// Generate JSON report
pub fn generate_json_report(report: &FullAnalysisReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Generate human-readable text report
pub fn generate_text_report(report: &FullAnalysisReport, output_path: &Path) -> Result<()> {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(80));
    lines.push("                 TRACESTAT STEADY-STATE THROUGHPUT ANALYSIS".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    // Metadata
    lines.push(format!("Analysis Date: {}", report.metadata.analysis_timestamp));
    lines.push(format!("Trace File: {}", report.metadata.trace_file));
    lines.push(format!("Records: {}", report.metadata.total_records));
    lines.push(format!("Distinct Clients: {}", report.metadata.distinct_clients));
    lines.push(String::new());

    // Steady-state estimates
    if let Some(ref steady) = report.steady_state {
        lines.push("=".repeat(80));
        lines.push("                        STEADY-STATE THROUGHPUT".to_string());
        lines.push("=".repeat(80));
        lines.push(String::new());

        for estimate in [&steady.batch_means, &steady.independent_replicates] {
            push_estimate_lines(&mut lines, estimate);
        }

        let batch = &steady.batch_means;
        let replicates = &steady.independent_replicates;
        if batch.intervals.bytes.width() <= replicates.intervals.bytes.width() {
            lines.push(
                "ASSESSMENT: Batch means give the tighter interval for this trace.".to_string(),
            );
        } else {
            lines.push(
                "ASSESSMENT: Independent replicates give the tighter interval for this trace."
                    .to_string(),
            );
        }
        lines.push(String::new());
    }

    // Per-client analysis
    if let Some(ref clients) = report.client_analysis {
        lines.push("=".repeat(80));
        lines.push("                          PER-CLIENT ANALYSIS".to_string());
        lines.push("=".repeat(80));
        lines.push(String::new());

        lines.push(format!(
            "Filtered Samples: {} (time span {:.3}s)",
            clients.filtered_samples, clients.time_span_sec
        ));
        lines.push(String::new());

        if clients.clients.is_empty() {
            lines.push("No samples for the requested client subset.".to_string());
        } else {
            lines.push("Goodput (Mbit/s) and mean transmission time:".to_string());
            for stats in &clients.clients {
                let transmission = match stats.mean_interarrival_sec {
                    Some(t) => format!("{:.4}s", t),
                    None => "n/a (single sample)".to_string(),
                };
                lines.push(format!(
                    "  Client-{}: {:.3} Mbit/s, {} bytes over {} samples, mean transmission time {}",
                    stats.client_id, stats.goodput_mbps, stats.total_bytes, stats.samples,
                    transmission
                ));
            }
        }
        lines.push(String::new());
    }

    // Footer
    lines.push("=".repeat(80));

    let content = lines.join("\n");
    fs::write(output_path, content)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

fn push_estimate_lines(lines: &mut Vec<String>, estimate: &SteadyStateEstimate) {
    lines.push(format!(
        "{} (chunk size {}, {} chunks):",
        capitalize(&estimate.method.to_string()),
        estimate.chunk_size,
        estimate.chunks
    ));
    lines.push(format!(
        "  Mean bytes per sample: {:.1}",
        estimate.mean_bytes
    ));
    lines.push(format!(
        "  {:.0}% interval: [{:.1}, {:.1}] (width {:.1})",
        estimate.intervals.confidence * 100.0,
        estimate.intervals.bytes.lower,
        estimate.intervals.bytes.upper,
        estimate.intervals.bytes.width()
    ));
    lines.push(String::new());
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Print a summary to stdout
pub fn print_summary(report: &FullAnalysisReport) {
    println!("\n=== TRACE THROUGHPUT ANALYSIS SUMMARY ===\n");
    println!("Trace: {}", report.metadata.trace_file);
    println!("Records: {}", report.metadata.total_records);
    println!("Clients: {}", report.metadata.distinct_clients);

    if let Some(ref steady) = report.steady_state {
        println!("\nSteady-State Throughput:");
        for estimate in [&steady.batch_means, &steady.independent_replicates] {
            println!(
                "  {}: {:.1} bytes/sample, {:.0}% interval [{:.1}, {:.1}]",
                estimate.method,
                estimate.mean_bytes,
                estimate.intervals.confidence * 100.0,
                estimate.intervals.bytes.lower,
                estimate.intervals.bytes.upper
            );
        }
    }

    if let Some(ref clients) = report.client_analysis {
        println!("\nPer-Client Goodput:");
        for stats in &clients.clients {
            println!(
                "  Client-{}: {:.3} Mbit/s ({} samples)",
                stats.client_id, stats.goodput_mbps, stats.samples
            );
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{
        AggregationMethod, ConfidenceInterval, SeriesIntervals, SteadyStateEstimate,
    };

    fn sample_report() -> FullAnalysisReport {
        let intervals = SeriesIntervals {
            confidence: 0.95,
            timestamp: ConfidenceInterval::collapsed(1.0),
            client_id: ConfidenceInterval::collapsed(3.0),
            bytes: ConfidenceInterval {
                lower: 90.0,
                upper: 110.0,
            },
        };
        FullAnalysisReport {
            metadata: AnalysisMetadata {
                analysis_timestamp: "2026-01-01T00:00:00+00:00".to_string(),
                trace_file: "output.csv".to_string(),
                total_records: 600,
                distinct_clients: 6,
            },
            steady_state: Some(SteadyStateReport {
                batch_means: SteadyStateEstimate {
                    method: AggregationMethod::BatchMeans,
                    chunk_size: 300,
                    chunks: 2,
                    mean_bytes: 100.0,
                    intervals: intervals.clone(),
                },
                independent_replicates: SteadyStateEstimate {
                    method: AggregationMethod::IndependentReplicates,
                    chunk_size: 20,
                    chunks: 30,
                    mean_bytes: 100.0,
                    intervals,
                },
            }),
            client_analysis: Some(ClientReport {
                clients: vec![ClientStats {
                    client_id: 3,
                    samples: 200,
                    total_bytes: 3_000_000,
                    goodput_mbps: 3.0,
                    mean_interarrival_sec: Some(0.05),
                }],
                time_span_sec: 1.0,
                filtered_samples: 200,
            }),
        }
    }

    #[test]
    fn test_json_report_round_trips() {
        let report = sample_report();
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("report.json");

        generate_json_report(&report, &path).expect("write JSON report");

        let content = fs::read_to_string(&path).expect("read JSON report");
        let parsed: FullAnalysisReport = serde_json::from_str(&content).expect("parse JSON");
        assert_eq!(parsed.metadata.total_records, 600);
        assert_eq!(
            parsed.steady_state.unwrap().batch_means.chunk_size,
            300
        );
    }

    #[test]
    fn test_text_report_sections() {
        let report = sample_report();
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("report.txt");

        generate_text_report(&report, &path).expect("write text report");

        let content = fs::read_to_string(&path).expect("read text report");
        assert!(content.contains("STEADY-STATE THROUGHPUT"));
        assert!(content.contains("PER-CLIENT ANALYSIS"));
        assert!(content.contains("Client-3: 3.000 Mbit/s"));
        assert!(content.contains("95% interval: [90.0, 110.0]"));
    }

    #[test]
    fn test_text_report_without_sections() {
        let mut report = sample_report();
        report.steady_state = None;
        report.client_analysis = None;

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("report.txt");
        generate_text_report(&report, &path).expect("write text report");

        let content = fs::read_to_string(&path).expect("read text report");
        assert!(!content.contains("STEADY-STATE THROUGHPUT"));
        assert!(content.contains("Records: 600"));
    }
}
