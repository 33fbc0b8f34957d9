//! Steady-state overlay chart: both aggregated series with confidence bands.

use std::path::Path;

use color_eyre::eyre::Result;

use crate::analysis::types::{AggregatedSeries, ConfidenceInterval, SeriesIntervals};

use super::chart::TraceChart;
use super::save_chart;

const BATCH_COLOR: &str = "#5470c6";
const REPLICATE_COLOR: &str = "#ee6666";

/// Pair each value with its chunk index for a value x-axis.
fn index_points(values: &[f64]) -> Vec<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| vec![i as f64, v])
        .collect()
}

/// Constant bound arrays spanning an x range of `len` points.
///
/// The interval brackets the series mean, so the band is flat; the arrays
/// are still materialized per x value so the renderer receives bounds of
/// exactly the plotted length.
fn band_bounds(len: usize, interval: &ConfidenceInterval) -> (Vec<f64>, Vec<f64>) {
    (vec![interval.lower; len], vec![interval.upper; len])
}

/// Render the steady-state chart into `output_dir/steady_state.html`.
///
/// Both aggregated byte series are plotted over their own chunk index, each
/// with a translucent band for its interval estimate.
pub fn render_steady_state_chart(
    batch: &AggregatedSeries,
    batch_intervals: &SeriesIntervals,
    replicates: &AggregatedSeries,
    replicate_intervals: &SeriesIntervals,
    output_dir: &Path,
) -> Result<()> {
    let confidence_pct = batch_intervals.confidence * 100.0;

    let batch_bytes = batch.bytes_column();
    let replicate_bytes = replicates.bytes_column();

    let batch_xs: Vec<f64> = (0..batch_bytes.len()).map(|i| i as f64).collect();
    let replicate_xs: Vec<f64> = (0..replicate_bytes.len()).map(|i| i as f64).collect();

    let (batch_lower, batch_upper) = band_bounds(batch_xs.len(), &batch_intervals.bytes);
    let (replicate_lower, replicate_upper) =
        band_bounds(replicate_xs.len(), &replicate_intervals.bytes);

    let chart = TraceChart::new(
        "Steady-State Throughput",
        &format!(
            "Aggregated byte counts with {:.0}% confidence bands",
            confidence_pct
        ),
    )
    .with_index_x_axis("Chunk")
    .with_y_axis("Bytes per sample")
    .add_line_series("Batch Means", index_points(&batch_bytes), BATCH_COLOR)
    .add_line_series(
        "Independent Replicates",
        index_points(&replicate_bytes),
        REPLICATE_COLOR,
    )
    .add_confidence_band(
        &format!("Batch Means {:.0}% CI", confidence_pct),
        &batch_xs,
        &batch_lower,
        &batch_upper,
        BATCH_COLOR,
    )?
    .add_confidence_band(
        &format!("Replicates {:.0}% CI", confidence_pct),
        &replicate_xs,
        &replicate_lower,
        &replicate_upper,
        REPLICATE_COLOR,
    )?;

    save_chart(&chart.inner, "steady_state", output_dir, 1600, 900)
}
