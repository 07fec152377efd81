// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use log::info;
use std::error::Error;
use std::ops::Range;
use std::path::Path;

use crate::axis_names::Axis;
use crate::constants::{
    COLOR_MESSAGE, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, LINE_WIDTH_LEGEND, PLOT_HEIGHT,
    PLOT_WIDTH,
};

const FONT_FAMILY: &str = "sans-serif";
const FONT_SIZE_MAIN_TITLE: i32 = 24;
const FONT_SIZE_MESSAGE: i32 = 20;
const FONT_SIZE_LEGEND: i32 = 12;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    axis: Axis,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = format!("{axis} {plot_type} Data Unavailable: {reason}");

    // Rough centering; glyph widths are about 0.6 of the font size.
    let estimated_width = (message.len() as f32 * FONT_SIZE_MESSAGE as f32 * 0.6) as i32;
    let position = (
        (width / 2 - estimated_width / 2).max(0),
        height / 2 - FONT_SIZE_MESSAGE / 2,
    );

    let text_style = (FONT_FAMILY, FONT_SIZE_MESSAGE)
        .into_font()
        .color(&COLOR_MESSAGE);
    area.draw(&Text::new(message, position, text_style))?;
    Ok(())
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

/// A time span shaded behind the series, e.g. an analyzed segment.
#[derive(Clone)]
pub struct ShadedSpan {
    pub start: f64,
    pub end: f64,
    pub color: RGBColor,
    pub opacity: f64, // 0.0 to 1.0
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub shaded_spans: Vec<ShadedSpan>,
    pub x_label: String,
    pub y_label: String,
}

fn draw_single_axis_chart(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, (FONT_FAMILY, FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(20)
        .y_labels(10)
        .y_label_formatter(&|y| {
            if y.abs() >= 1000.0 {
                format!("{:.1}k", y / 1000.0)
            } else {
                format!("{:.0}", y)
            }
        })
        .light_line_style(WHITE.mix(0.7))
        .label_style((FONT_FAMILY, FONT_SIZE_AXIS_LABEL))
        .draw()?;

    // Shading goes first so the data lines stay on top.
    for span in &plot_config.shaded_spans {
        let start = span.start.max(plot_config.x_range.start);
        let end = span.end.min(plot_config.x_range.end);
        if end <= start {
            continue;
        }
        chart.draw_series(std::iter::once(Rectangle::new(
            [
                (start, plot_config.y_range.start),
                (end, plot_config.y_range.end),
            ],
            span.color.mix(span.opacity).filled(),
        )))?;
    }

    let mut legend_series_count = 0;
    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        let series = chart.draw_series(LineSeries::new(
            s.data.iter().cloned(),
            s.color.stroke_width(s.stroke_width),
        ))?;
        if !s.label.is_empty() {
            let color = s.color;
            series.label(&s.label).legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    color.stroke_width(LINE_WIDTH_LEGEND),
                )
            });
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT_FAMILY, FONT_SIZE_LEGEND))
            .draw()?;
    }

    Ok(())
}

/// Draws one chart per axis stacked vertically into a single PNG.
///
/// `get_axis_plot_data` returns `None` when there is nothing to draw for an
/// axis; that panel then carries an "unavailable" message instead.
/// Returns whether any axis was actually plotted.
pub fn draw_stacked_plot<F>(
    output_path: &Path,
    heading: &str,
    plot_type_name: &str,
    mut get_axis_plot_data: F,
) -> Result<bool, Box<dyn Error>>
where
    F: FnMut(Axis) -> Option<PlotConfig>,
{
    let root_area = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        heading,
        (10, 10),
        (FONT_FAMILY, FONT_SIZE_MAIN_TITLE).into_font().color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((Axis::ALL.len(), 1));
    let mut any_axis_plotted = false;

    for (axis, area) in Axis::ALL.into_iter().zip(sub_plot_areas.iter()) {
        match get_axis_plot_data(axis) {
            Some(plot_config) => {
                let has_data = plot_config.series.iter().any(|s| !s.data.is_empty());
                let valid_ranges = plot_config.x_range.end > plot_config.x_range.start
                    && plot_config.y_range.end > plot_config.y_range.start;
                if has_data && valid_ranges {
                    draw_single_axis_chart(area, &plot_config)?;
                    any_axis_plotted = true;
                } else {
                    let reason = if !has_data {
                        "No data points"
                    } else {
                        "Invalid ranges"
                    };
                    draw_unavailable_message(area, axis, plot_type_name, reason)?;
                }
            }
            None => draw_unavailable_message(area, axis, plot_type_name, "No data points")?,
        }
    }

    root_area.present()?;
    if any_axis_plotted {
        info!("Stacked plot saved as '{}'.", output_path.display());
    } else {
        info!(
            "'{}' saved with placeholder messages only: no axis had data to plot.",
            output_path.display()
        );
    }
    Ok(any_axis_plotted)
}


// src/plot_framework.rs
