// src/plot_functions/plot_segments.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::axis_names::Axis;
use crate::constants::{
    COLOR_COMMAND, COLOR_GYRO, COLOR_SEGMENT, LINE_WIDTH_PLOT, SEGMENT_SHADE_OPACITY,
};
use crate::data_analysis::axis_analysis::AxisAnalysis;
use crate::data_input::log_data::LogSeries;
use crate::pid_context::PidContext;
use crate::plot_framework::{calculate_range, draw_stacked_plot, PlotConfig, PlotSeries, ShadedSpan};

/// Output file for the segment plot: `<root_name>_segments_stacked.png` inside `output_dir`.
pub fn segments_plot_path(output_dir: &Path, root_name: &str) -> PathBuf {
    output_dir.join(format!("{}_segments_stacked.png", root_name))
}

/// Chart contents for one axis, or `None` when the log has no samples.
pub fn axis_plot_config(
    axis: Axis,
    samples: &LogSeries,
    analysis: Option<&AxisAnalysis>,
    ctx: &PidContext,
) -> Option<PlotConfig> {
    let time = samples.time();
    let (&time_min, &time_max) = (time.first()?, time.last()?);

    let command = samples.rc_command(axis);
    let gyro = samples.gyro(axis);

    let mut val_min = f64::INFINITY;
    let mut val_max = f64::NEG_INFINITY;
    for &v in command.iter().chain(gyro.iter()) {
        val_min = val_min.min(v);
        val_max = val_max.max(v);
    }
    let (y_min, y_max) = calculate_range(val_min, val_max);

    let series = vec![
        PlotSeries {
            data: time.iter().copied().zip(gyro.iter().copied()).collect(),
            label: "Gyro".to_string(),
            color: COLOR_GYRO,
            stroke_width: LINE_WIDTH_PLOT,
        },
        PlotSeries {
            data: time.iter().copied().zip(command.iter().copied()).collect(),
            label: "RC Command".to_string(),
            color: COLOR_COMMAND,
            stroke_width: LINE_WIDTH_PLOT,
        },
    ];

    let shaded_spans = analysis
        .map(|a| {
            a.analyzed_segments
                .iter()
                .map(|&(start, end)| ShadedSpan {
                    start,
                    end,
                    color: COLOR_SEGMENT,
                    opacity: SEGMENT_SHADE_OPACITY,
                })
                .collect()
        })
        .unwrap_or_default();

    Some(PlotConfig {
        title: format!("{} RC Command vs Gyro", ctx.axis_title_with_pids(axis)),
        x_range: time_min..time_max,
        y_range: y_min..y_max,
        series,
        shaded_spans,
        x_label: "Time (s)".to_string(),
        y_label: "deg/s".to_string(),
    })
}

/// Generates the stacked RC command vs gyro plot, with every analyzed segment shaded.
pub fn plot_segments(
    samples: &LogSeries,
    analyses: &[AxisAnalysis],
    ctx: &PidContext,
    output_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let output_path = segments_plot_path(output_dir, &ctx.root_name);

    draw_stacked_plot(&output_path, &ctx.heading(), "RC Command/Gyro", |axis| {
        let analysis = analyses.iter().find(|a| a.axis == axis);
        axis_plot_config(axis, samples, analysis, ctx)
    })?;

    Ok(output_path)
}


// src/plot_functions/plot_segments.rs
