// src/data_analysis/response_analyzer.rs

use ndarray::{s, Array1, ArrayView1};
use ndarray_stats::QuantileExt;
use serde::Serialize;

use crate::axis_names::Axis;
use crate::config::AnalyzerConfig;
use crate::data_analysis::segment_finder::Segment;
use crate::data_input::log_data::LogSeries;
use crate::error::TunerError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Oscillation {
    pub crossings: usize,
    pub frequency_hz: f64,
    pub amplitude: f64,
}

/// What one segment's response shows. Produced per segment, folded per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SegmentFindings {
    pub oscillation: Option<Oscillation>,
    /// Fractional overshoot relative to the target, when above the threshold.
    pub overshoot: Option<f64>,
    pub undershoot: bool,
    pub target_response: f64,
}

/// Gyro, command and time over a segment widened by the padding on both sides.
#[derive(Debug, Clone)]
pub struct ResponseWindow {
    pub time: Array1<f64>,
    pub rc: Array1<f64>,
    pub gyro: Array1<f64>,
}

impl ResponseWindow {
    /// Copies `[start - padding, end + padding]` out of the series, clamped to its bounds.
    pub fn extract(samples: &LogSeries, axis: Axis, segment: Segment, padding: usize) -> Self {
        if samples.is_empty() {
            return Self {
                time: Array1::zeros(0),
                rc: Array1::zeros(0),
                gyro: Array1::zeros(0),
            };
        }
        let last = samples.len() - 1;
        let end = segment.end_idx.saturating_add(padding).min(last);
        let start = segment.start_idx.saturating_sub(padding).min(end);
        let range = start..=end;

        Self {
            time: Array1::from(samples.time()[range.clone()].to_vec()),
            rc: Array1::from(samples.rc_command(axis)[range.clone()].to_vec()),
            gyro: Array1::from(samples.gyro(axis)[range].to_vec()),
        }
    }

    pub fn len(&self) -> usize {
        self.gyro.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gyro.is_empty()
    }
}

/// Counts side changes of `signal` relative to `reference`.
///
/// A sample exactly on the reference keeps the previous side, so negating both
/// the signal and the reference yields the same count.
pub fn count_crossings(signal: ArrayView1<f64>, reference: f64) -> usize {
    let mut crossings = 0;
    let mut was_above: Option<bool> = None;

    for &value in signal.iter() {
        if value == reference {
            continue;
        }
        let is_above = value > reference;
        match was_above {
            Some(prev) if prev != is_above => crossings += 1,
            _ => {}
        }
        was_above = Some(is_above);
    }
    crossings
}

/// Mean command over the window without its padding, i.e. the held part of the segment.
/// Falls back to the whole window when the log edges left nothing between the pads.
fn target_response(rc: &Array1<f64>, padding: usize) -> f64 {
    let len = rc.len();
    let middle = if len > 2 * padding {
        rc.slice(s![padding..len - padding]).mean()
    } else {
        None
    };
    middle.or_else(|| rc.mean()).unwrap_or(0.0)
}

/// Oscillation, overshoot and undershoot for one window.
pub fn analyze_window(
    window: &ResponseWindow,
    config: &AnalyzerConfig,
) -> Result<SegmentFindings, TunerError> {
    if window.is_empty() {
        return Ok(SegmentFindings::default());
    }

    let target = target_response(&window.rc, config.analysis_padding_samples);
    let max_response = *window.gyro.max()?;
    let min_response = *window.gyro.min()?;
    let response_range = max_response - min_response;

    // Crossings are counted around the mean command of the padded window, not the target.
    let rc_mean = window.rc.mean().unwrap_or(0.0);
    let crossings = count_crossings(window.gyro.view(), rc_mean);
    let oscillation = if crossings >= config.min_oscillation_count {
        let duration = window.time[window.len() - 1] - window.time[0];
        let amplitude = window.gyro.mapv(|g| (g - rc_mean).abs()).mean().unwrap_or(0.0);
        Some(Oscillation {
            crossings,
            frequency_hz: crossings as f64 / duration,
            amplitude,
        })
    } else {
        None
    };

    let overshoot = if max_response.abs() > target.abs() * config.overshoot_threshold {
        Some((max_response.abs() - target.abs()) / target.abs())
    } else {
        None
    };

    let undershoot = response_range > 0.0
        && (min_response - target).abs() > response_range * config.undershoot_range_fraction;

    Ok(SegmentFindings {
        oscillation,
        overshoot,
        undershoot,
        target_response: target,
    })
}

/// Analyzes how the gyro followed the command across one segment. Pure, no I/O.
pub fn analyze_segment(
    axis: Axis,
    segment: Segment,
    samples: &LogSeries,
    config: &AnalyzerConfig,
) -> Result<SegmentFindings, TunerError> {
    let window = ResponseWindow::extract(samples, axis, segment, config.analysis_padding_samples);
    analyze_window(&window, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::log_data::LogRowData;
    use ndarray::array;

    const DT: f64 = 0.001;

    fn series(rc_roll: &[f64], gyro_roll: &[f64]) -> LogSeries {
        let mut series = LogSeries::default();
        for (i, (&rc, &gyro)) in rc_roll.iter().zip(gyro_roll).enumerate() {
            series.push_row(&LogRowData {
                time_sec: i as f64 * DT,
                rc_command: [rc, 0.0, 0.0],
                gyro: [gyro, 0.0, 0.0],
                ..Default::default()
            });
        }
        series
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {} to be within 1e-9 of {}",
            actual,
            expected
        );
    }

    #[test]
    fn window_is_padded_and_clamped() {
        let values: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let samples = series(&values, &values);

        let mid = ResponseWindow::extract(&samples, Axis::Roll, Segment::new(20, 25), 10);
        assert_eq!(mid.len(), 26);
        assert_eq!(mid.rc[0], 10.0);
        assert_eq!(mid.rc[mid.len() - 1], 35.0);

        let edge = ResponseWindow::extract(&samples, Axis::Roll, Segment::new(3, 45), 10);
        assert_eq!(edge.rc[0], 0.0);
        assert_eq!(edge.rc[edge.len() - 1], 49.0);
        assert_eq!(edge.len(), 50);
    }

    #[test]
    fn overshoot_of_fifty_percent_is_measured() {
        // Constant 100 command; gyro rises to 150, then settles on 100.
        let n = 60;
        let rc = vec![100.0; n];
        let gyro: Vec<f64> = (0..n)
            .map(|i| match i {
                0..=9 => 100.0,
                10..=14 => 100.0 + 10.0 * (i - 9) as f64,
                15..=19 => 150.0 - 10.0 * (i - 14) as f64,
                _ => 100.0,
            })
            .collect();
        let samples = series(&rc, &gyro);
        let cfg = AnalyzerConfig::default();

        let findings = analyze_segment(Axis::Roll, Segment::new(10, 49), &samples, &cfg).unwrap();
        assert_close(findings.target_response, 100.0);
        let overshoot = findings.overshoot.expect("overshoot should be detected");
        assert_close(overshoot, 0.5);
        // A single excursion above the command mean is not an oscillation.
        assert!(findings.oscillation.is_none());
        assert!(!findings.undershoot);
    }

    #[test]
    fn small_overshoot_below_threshold_is_ignored() {
        let n = 60;
        let rc = vec![100.0; n];
        let mut gyro = vec![100.0; n];
        gyro[15] = 115.0;
        let samples = series(&rc, &gyro);
        let findings =
            analyze_segment(Axis::Roll, Segment::new(10, 49), &samples, &AnalyzerConfig::default())
                .unwrap();
        assert!(findings.overshoot.is_none());
    }

    #[test]
    fn ringing_response_is_an_oscillation() {
        // Gyro alternates around a 200 command every 5 samples.
        let n = 60;
        let rc = vec![200.0; n];
        let gyro: Vec<f64> = (0..n)
            .map(|i| if (i / 5) % 2 == 0 { 230.0 } else { 170.0 })
            .collect();
        let samples = series(&rc, &gyro);
        let cfg = AnalyzerConfig::default();

        let findings = analyze_segment(Axis::Roll, Segment::new(10, 49), &samples, &cfg).unwrap();
        let osc = findings.oscillation.expect("oscillation should be detected");
        // Window is the whole 60-sample series; side changes every 5 samples.
        assert_eq!(osc.crossings, 11);
        assert_close(osc.frequency_hz, 11.0 / (59.0 * DT));
        assert_close(osc.amplitude, 30.0);
    }

    #[test]
    fn response_that_never_reaches_target_is_undershoot() {
        // Command steps to 300 but the gyro only creeps to 120.
        let n = 60;
        let rc: Vec<f64> = (0..n).map(|i| if i < 10 { 0.0 } else { 300.0 }).collect();
        let gyro: Vec<f64> = (0..n).map(|i| (i as f64 * 2.0).min(120.0)).collect();
        let samples = series(&rc, &gyro);
        let findings =
            analyze_segment(Axis::Roll, Segment::new(10, 49), &samples, &AnalyzerConfig::default())
                .unwrap();

        assert!(findings.undershoot);
        assert!(findings.overshoot.is_none());
    }

    #[test]
    fn flat_response_has_no_undershoot() {
        let n = 40;
        let samples = series(&vec![50.0; n], &vec![50.0; n]);
        let findings =
            analyze_segment(Axis::Roll, Segment::new(10, 29), &samples, &AnalyzerConfig::default())
                .unwrap();
        assert!(!findings.undershoot);
        assert!(findings.oscillation.is_none());
        assert!(findings.overshoot.is_none());
    }

    #[test]
    fn target_falls_back_to_whole_window_near_log_edges() {
        let rc = array![10.0, 20.0, 30.0];
        assert_close(target_response(&rc, 10), 20.0);
        let rc = array![0.0, 0.0, 100.0, 100.0, 0.0, 0.0];
        assert_close(target_response(&rc, 2), 100.0);
    }

    #[test]
    fn crossing_count_is_sign_symmetric() {
        let gyro = array![5.0, -3.0, 0.0, 4.0, 4.0, -1.0, 0.0, 0.0, 2.0, -6.0];
        let reference = 0.0;
        let forward = count_crossings(gyro.view(), reference);
        let negated = gyro.mapv(|v| -v);
        assert_eq!(forward, count_crossings(negated.view(), -reference));
        assert_eq!(forward, 5);

        let shifted = array![12.0, 8.0, 10.0, 11.0, 9.0];
        assert_eq!(
            count_crossings(shifted.view(), 10.0),
            count_crossings(shifted.mapv(|v| -v).view(), -10.0)
        );
    }

    #[test]
    fn empty_window_has_no_findings() {
        let window = ResponseWindow::extract(&LogSeries::default(), Axis::Yaw, Segment::new(0, 0), 10);
        assert!(window.is_empty());
        let findings = analyze_window(&window, &AnalyzerConfig::default()).unwrap();
        assert_eq!(findings, SegmentFindings::default());
    }
}

// src/data_analysis/response_analyzer.rs
