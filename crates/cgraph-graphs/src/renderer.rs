//! Line chart rendering of assembled chart data.

use crate::chart::ChartData;
use crate::date_key::MonthBucket;
use cgraph_common::{parse_hex_color, CGraphError, Result};
use cgraph_config::{ChartConfig, LineStyle};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::{info, instrument};

/// Image settings independent of the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Caption above the plot
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// `#RRGGBB` background
    pub background: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&ChartConfig::default())
    }
}

impl From<&ChartConfig> for RenderOptions {
    fn from(config: &ChartConfig) -> Self {
        Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            background: config.background.clone(),
        }
    }
}

/// Image format, chosen from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raster image
    Png,
    /// Vector image
    Svg,
}

impl OutputFormat {
    /// `.svg` selects SVG, anything else PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Svg,
            _ => Self::Png,
        }
    }
}

/// Something that turns chart data into an image file.
pub trait ChartRenderer: Send + Sync {
    /// Renders `chart` to `path`, creating parent directories.
    fn render_to_file(&self, chart: &ChartData, options: &RenderOptions, path: &Path) -> Result<()>;

    /// Short renderer name for logs.
    fn name(&self) -> &'static str;
}

/// Draws every series as a line over the month axis.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineChartRenderer;

impl LineChartRenderer {
    /// Creates a renderer.
    pub const fn new() -> Self {
        Self
    }

    fn draw<DB>(root: &DrawingArea<DB, Shift>, chart: &ChartData, options: &RenderOptions) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&parse_color(&options.background))?;

        let labels: Vec<String> = chart.axis.buckets().iter().map(|b| month_label(*b)).collect();
        let x_end = i32::try_from(chart.axis.len()).unwrap_or(i32::MAX).max(2) - 1;
        let y_end = y_upper_bound(chart.max_value());

        let mut ctx = ChartBuilder::on(root)
            .caption(&options.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0i32..x_end, 0u64..y_end)?;

        ctx.configure_mesh()
            .x_labels(labels.len().min(12))
            .x_label_formatter(&|x| {
                usize::try_from(*x)
                    .ok()
                    .and_then(|i| labels.get(i))
                    .cloned()
                    .unwrap_or_default()
            })
            .y_desc("Contributions")
            .draw()?;

        for series in &chart.series {
            let color = parse_color(&series.color);
            let points: Vec<(i32, u64)> = series
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| (i32::try_from(i).unwrap_or(i32::MAX), *v))
                .collect();
            let stroke = color.stroke_width(2);

            let drawn = match series.line_style {
                LineStyle::Solid => ctx.draw_series(LineSeries::new(points, stroke))?,
                LineStyle::Dashed => ctx.draw_series(DashedLineSeries::new(points, 8, 4, stroke))?,
                LineStyle::Area => ctx.draw_series(
                    AreaSeries::new(points, 0, color.mix(0.3)).border_style(stroke),
                )?,
            };
            drawn
                .label(series.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        if chart.series.len() > 1 {
            ctx.configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

impl ChartRenderer for LineChartRenderer {
    #[instrument(skip(self, chart, options), fields(series = chart.series.len()))]
    fn render_to_file(&self, chart: &ChartData, options: &RenderOptions, path: &Path) -> Result<()> {
        if chart.series.is_empty() {
            return Err(CGraphError::graph("No series to render"));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let size = (options.width, options.height);
        match OutputFormat::from_path(path) {
            OutputFormat::Png => Self::draw(&BitMapBackend::new(path, size).into_drawing_area(), chart, options)?,
            OutputFormat::Svg => Self::draw(&SVGBackend::new(path, size).into_drawing_area(), chart, options)?,
        }

        info!("Rendered contribution chart to {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "line_chart"
    }
}

/// Parses a `#RRGGBB` color, falling back to black.
pub fn parse_color(color: &str) -> RGBColor {
    parse_hex_color(color).map_or(BLACK, |(r, g, b)| RGBColor(r, g, b))
}

/// Top of the y range: the largest value plus 10%, at least 1.
pub fn y_upper_bound(max_value: u64) -> u64 {
    max_value.saturating_add(max_value.div_ceil(10)).max(1)
}

/// Short axis label such as `Jan 2022`.
pub fn month_label(bucket: MonthBucket) -> String {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let index = usize::try_from(bucket.month().saturating_sub(1)).unwrap_or(0);
    format!("{} {}", MONTHS[index % 12], bucket.year())
}
