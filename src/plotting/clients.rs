//! Per-client bar charts: goodput and mean transmission time.

use std::path::Path;

use color_eyre::eyre::Result;

use crate::analysis::types::ClientReport;

use super::chart::TraceChart;
use super::save_chart;

const GOODPUT_COLOR: &str = "#5470c6";
const TRANSMISSION_COLOR: &str = "#91cc75";

fn client_categories(report: &ClientReport) -> Vec<String> {
    report
        .clients
        .iter()
        .map(|c| format!("Client-{}", c.client_id))
        .collect()
}

/// Render the per-client goodput bars into `output_dir/goodput.html`.
pub fn render_goodput_chart(report: &ClientReport, output_dir: &Path) -> Result<()> {
    let values: Vec<f64> = report.clients.iter().map(|c| c.goodput_mbps).collect();

    let chart = TraceChart::new(
        "Per-Client Goodput",
        &format!("Payload bytes over a shared {:.3}s window", report.time_span_sec),
    )
    .with_category_x_axis("Client", client_categories(report))
    .with_y_axis("Goodput (Mbit/s)")
    .add_bar_series("Goodput", values, GOODPUT_COLOR);

    save_chart(&chart.inner, "goodput", output_dir, 1200, 800)
}

/// Render the mean transmission time bars into
/// `output_dir/transmission_time.html`.
///
/// Clients with a single sample have no inter-arrival gap and are drawn at
/// zero.
pub fn render_transmission_time_chart(report: &ClientReport, output_dir: &Path) -> Result<()> {
    let values: Vec<f64> = report
        .clients
        .iter()
        .map(|c| c.mean_interarrival_sec.unwrap_or(0.0))
        .collect();

    let chart = TraceChart::new(
        "Mean Packet Transmission Time",
        "Average gap between a client's successive samples",
    )
    .with_category_x_axis("Client", client_categories(report))
    .with_y_axis("Time (s)")
    .add_bar_series("Transmission time", values, TRANSMISSION_COLOR);

    save_chart(&chart.inner, "transmission_time", output_dir, 1200, 800)
}
