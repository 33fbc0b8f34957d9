//! Chart generation for trace analysis (self-contained ECharts HTML).

use std::path::Path;

use charming::theme::Theme;
use charming::{Chart, HtmlRenderer};
use color_eyre::eyre::{eyre, Context, Result};

pub mod chart;
pub mod clients;
pub mod steady_state;

pub use clients::{render_goodput_chart, render_transmission_time_chart};
pub use steady_state::render_steady_state_chart;

/// Render a chart to `<output_directory>/<file_name>.html`.
fn save_chart(
    chart: &Chart,
    file_name: &str,
    output_directory: &Path,
    width: u64,
    height: u64,
) -> Result<()> {
    std::fs::create_dir_all(output_directory).with_context(|| {
        format!(
            "Failed to create chart output directory: {}",
            output_directory.display()
        )
    })?;
    let output_path = output_directory.join(format!("{file_name}.html"));

    let mut renderer = HtmlRenderer::new(file_name, width, height).theme(Theme::Default);
    renderer
        .save(chart, &output_path)
        .map_err(|e| eyre!("Failed to save HTML chart to {}: {e}", output_path.display()))?;

    log::info!("Chart written to {}", output_path.display());
    Ok(())
}
