// src/constants.rs

use plotters::style::RGBColor;

// Marker that separates the configuration preamble from the tabular section.
pub const HEADER_MARKER: &str = "loopIteration";

// --- Sustained input detection ---
pub const INPUT_CHANGE_THRESHOLD: f64 = 20.0; // rcCommand units between consecutive samples
pub const REQUIRED_STEADY_SAMPLES: usize = 5; // Samples within threshold of baseline to call it settled
pub const MIN_SUSTAINED_INPUT_DURATION_S: f64 = 0.2;

// --- Response analysis ---
pub const ANALYSIS_PADDING_SAMPLES: usize = 10; // Added before and after each segment
pub const MIN_OSCILLATION_COUNT: usize = 3; // Crossings of the command mean
pub const OVERSHOOT_THRESHOLD: f64 = 1.2; // Peak / target ratio
pub const UNDERSHOOT_RANGE_FRACTION: f64 = 0.3;

// --- Recommendation rules ---
pub const HIGH_FREQUENCY_OSCILLATION_HZ: f64 = 30.0;
pub const SIGNIFICANT_OVERSHOOT: f64 = 0.5;
pub const P_REDUCTION_THRESHOLD: f64 = 1.0; // P must exceed this before high-frequency rule touches it

pub const HF_OSCILLATION_D_REDUCTION: f64 = 0.15;
pub const HF_OSCILLATION_P_REDUCTION: f64 = 0.10;
pub const LF_OSCILLATION_P_REDUCTION: f64 = 0.15;
pub const OVERSHOOT_P_REDUCTION: f64 = 0.20;
pub const OVERSHOOT_D_INCREASE: f64 = 0.10;
pub const UNDERSHOOT_I_INCREASE: f64 = 0.15;
pub const UNDERSHOOT_FF_INCREASE: f64 = 0.10;

// --- Plot ---
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 12;
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const SEGMENT_SHADE_OPACITY: f64 = 0.2;

pub const COLOR_COMMAND: RGBColor = RGBColor(255, 165, 0); // orange
pub const COLOR_GYRO: RGBColor = RGBColor(100, 149, 237); // light blue
pub const COLOR_SEGMENT: RGBColor = RGBColor(76, 175, 80); // green
pub const COLOR_MESSAGE: RGBColor = RGBColor(200, 0, 0);

// src/constants.rs
