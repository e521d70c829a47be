//! Bar charts rendered with `plotters` to SVG.

use std::fmt::Display;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::FontTransform;

use super::{Chart, ChartRenderer};
use crate::error::{ChatstatsError, Result};
use crate::format::ChartFormat;

const MIN_WIDTH: u32 = 800;
const BAR_WIDTH: u32 = 28;
const HEIGHT: u32 = 600;

/// Renders a [`Chart`] as a vertical bar chart, one bar per entry in
/// view order.
///
/// The canvas widens with the number of bars so date charts stay
/// readable.
#[derive(Debug, Clone, Copy)]
pub struct SvgChartRenderer {
    height: u32,
    min_width: u32,
    bar_color: RGBColor,
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self {
            height: HEIGHT,
            min_width: MIN_WIDTH,
            bar_color: BLUE,
        }
    }
}

impl SvgChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the canvas height and minimal width.
    #[must_use]
    pub fn with_size(mut self, min_width: u32, height: u32) -> Self {
        self.min_width = min_width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_bar_color(mut self, color: RGBColor) -> Self {
        self.bar_color = color;
        self
    }

    fn width_for(&self, bars: u32) -> u32 {
        self.min_width.max(120 + bars * BAR_WIDTH)
    }
}

fn chart_error<E: Display>(path: &Path) -> impl Fn(E) -> ChatstatsError + '_ {
    move |e| ChatstatsError::chart(path, e.to_string())
}

impl ChartRenderer for SvgChartRenderer {
    fn name(&self) -> &'static str {
        "SVG"
    }

    fn format(&self) -> ChartFormat {
        ChartFormat::Svg
    }

    fn render(&self, chart: &Chart) -> Result<()> {
        let path = chart.spec.output_path.as_path();
        let labels = chart.view.labels();
        let bars = labels.len().max(1) as u32;
        let max = chart.view.max_count().max(1);
        let y_top = max + max / 10 + 1;

        let root = SVGBackend::new(path, (self.width_for(bars), self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error(path))?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.spec.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(90)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..bars).into_segmented(), 0u64..y_top)
            .map_err(chart_error(path))?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(bars as usize)
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_label_formatter(&|v: &SegmentValue<u32>| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_desc(chart.spec.category_label.as_str())
            .y_desc(chart.spec.value_label.as_str())
            .draw()
            .map_err(chart_error(path))?;

        let color = self.bar_color;
        ctx.draw_series(chart.view.iter().enumerate().map(|(i, (_, count))| {
            let i = i as u32;
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0), (SegmentValue::Exact(i + 1), count)],
                color.filled(),
            );
            bar.set_margin(0, 0, 3, 3);
            bar
        }))
        .map_err(chart_error(path))?;

        root.present().map_err(chart_error(path))?;
        Ok(())
    }
}
