//! Chart builder wrapping `charming` with shared defaults.

use charming::{
    component::{Axis, Feature, Grid, Legend, SaveAsImage, Title, Toolbox},
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, ItemStyle,
        LineStyle, NameLocation, SplitLine, TextAlign, TextStyle, Tooltip,
    },
    series::{Bar, Line},
    Chart,
};
use color_eyre::eyre::{ensure, Result};

pub struct TraceChart {
    pub inner: Chart,
}

const AXIS_TEXT_SIZE: u32 = 16;

impl TraceChart {
    /// Create a new `TraceChart` with default title, tooltip, legend, grid,
    /// and toolbox.
    pub fn new(title: &str, subtext: &str) -> Self {
        let chart = Chart::new()
            .title(
                Title::new()
                    .text(title)
                    .text_align(TextAlign::Center)
                    .subtext(subtext)
                    .text_style(TextStyle::new().font_size(24).font_weight("bold"))
                    .subtext_style(TextStyle::new().font_size(14).line_height(20))
                    .left("50%")
                    .top("1%"),
            )
            .tooltip(Tooltip::new().axis_pointer(AxisPointer::new().type_(AxisPointerType::Cross)))
            .legend(
                Legend::new()
                    .show(true)
                    .top("9%")
                    .text_style(TextStyle::new().font_size(12)),
            )
            .grid(Grid::new().left("7%").right("5%").top("16%").bottom("8%"))
            .toolbox(Toolbox::new().feature(Feature::new().save_as_image(SaveAsImage::new())));

        Self { inner: chart }
    }

    /// Configure the X axis as a plain value axis (e.g. chunk index).
    pub fn with_index_x_axis(mut self, axis_label: &str) -> Self {
        self.inner = self.inner.x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(axis_label)
                .name_location(NameLocation::End)
                .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
                .name_gap(15)
                .axis_label(AxisLabel::new())
                .split_line(SplitLine::new().show(true)),
        );
        self
    }

    /// Configure the X axis as a category axis.
    pub fn with_category_x_axis(mut self, axis_label: &str, categories: Vec<String>) -> Self {
        self.inner = self.inner.x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name(axis_label)
                .name_location(NameLocation::End)
                .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
                .name_gap(15)
                .data(categories)
                .split_line(SplitLine::new().show(true)),
        );
        self
    }

    /// Configure the Y axis.
    pub fn with_y_axis(mut self, axis_label: &str) -> Self {
        self.inner = self.inner.y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(axis_label)
                .name_location(NameLocation::End)
                .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
                .name_gap(15)
                .position("left")
                .axis_label(AxisLabel::new())
                .split_line(SplitLine::new().show(true)),
        );
        self
    }

    /// Add a line series of `[x, y]` points.
    pub fn add_line_series(mut self, name: &str, points: Vec<Vec<f64>>, color: &str) -> Self {
        let line = Line::new()
            .name(name)
            .data(points)
            .show_symbol(false)
            .emphasis(Emphasis::new())
            .line_style(LineStyle::new().width(2.0))
            .item_style(ItemStyle::new().color(color));

        self.inner = self.inner.series(line);
        self
    }

    /// Add a shaded band between `lower` and `upper` over the given x range.
    ///
    /// Rendered as a stacked area pair: an invisible base line at the lower
    /// bound plus a translucent area of the band height. Bound arrays must
    /// match the x range exactly; mismatched lengths are rejected rather than
    /// silently misdrawn.
    pub fn add_confidence_band(
        mut self,
        name: &str,
        xs: &[f64],
        lower: &[f64],
        upper: &[f64],
        color: &str,
    ) -> Result<Self> {
        ensure!(
            xs.len() == lower.len() && xs.len() == upper.len(),
            "confidence band bounds must match the x range: {} x values, {} lower, {} upper",
            xs.len(),
            lower.len(),
            upper.len()
        );

        let base: Vec<Vec<f64>> = xs.iter().zip(lower).map(|(&x, &lo)| vec![x, lo]).collect();
        let height: Vec<Vec<f64>> = xs
            .iter()
            .zip(lower.iter().zip(upper))
            .map(|(&x, (&lo, &up))| vec![x, up - lo])
            .collect();

        let base_line = Line::new()
            .data(base)
            .stack(name)
            .show_symbol(false)
            .line_style(LineStyle::new().opacity(0.0));

        let band_line = Line::new()
            .name(name)
            .data(height)
            .stack(name)
            .show_symbol(false)
            .line_style(LineStyle::new().opacity(0.0))
            .area_style(AreaStyle::new().color(color).opacity(0.2));

        self.inner = self.inner.series(base_line).series(band_line);
        Ok(self)
    }

    /// Add a bar series over the configured category axis.
    pub fn add_bar_series(mut self, name: &str, values: Vec<f64>, color: &str) -> Self {
        let bar = Bar::new()
            .name(name)
            .data(values)
            .bar_width("40%")
            .item_style(ItemStyle::new().color(color));

        self.inner = self.inner.series(bar);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_band_rejects_mismatched_lengths() {
        let chart = TraceChart::new("t", "s").with_index_x_axis("x").with_y_axis("y");
        let xs = [0.0, 1.0, 2.0];
        let lower = [1.0, 1.0];
        let upper = [2.0, 2.0, 2.0];

        let result = chart.add_confidence_band("band", &xs, &lower, &upper, "#5470c6");
        assert!(result.is_err());
    }

    #[test]
    fn test_confidence_band_accepts_matching_lengths() {
        let chart = TraceChart::new("t", "s").with_index_x_axis("x").with_y_axis("y");
        let xs = [0.0, 1.0, 2.0];
        let lower = [1.0, 1.0, 1.0];
        let upper = [2.0, 2.0, 2.0];

        let result = chart.add_confidence_band("band", &xs, &lower, &upper, "#5470c6");
        assert!(result.is_ok());
    }
}
