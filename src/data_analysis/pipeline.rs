// src/data_analysis/pipeline.rs

use log::{debug, info};

use crate::axis_names::Axis;
use crate::config::AnalyzerConfig;
use crate::data_analysis::axis_analysis::AxisAnalysis;
use crate::data_analysis::recommendation::recommend;
use crate::data_analysis::response_analyzer::{analyze_segment, SegmentFindings};
use crate::data_analysis::segment_finder::{find_segments, Segment};
use crate::data_input::log_data::LogSeries;
use crate::data_input::log_parser::FlightLog;
use crate::data_input::pid_metadata::{PidCoefficients, PidSet};
use crate::error::TunerError;

/// Hooks for watching the analysis as it runs. All methods default to no-ops.
pub trait AnalysisObserver {
    fn on_analysis_start(&mut self, _samples: &LogSeries) {}

    fn on_segments_found(&mut self, _axis: Axis, _segments: &[Segment], _time: &[f64]) {}

    fn on_segment_analyzed(&mut self, _axis: Axis, _segment: Segment, _findings: &SegmentFindings) {}

    fn on_axis_complete(&mut self, _analysis: &AxisAnalysis, _adjusted: &PidCoefficients) {}
}

/// Observer that ignores everything.
pub struct NullObserver;

impl AnalysisObserver for NullObserver {}

/// Observer that reports through the `log` facade.
pub struct LogObserver;

impl AnalysisObserver for LogObserver {
    fn on_analysis_start(&mut self, samples: &LogSeries) {
        let time = samples.time();
        if let (Some(first), Some(last)) = (time.first(), time.last()) {
            info!(
                "Analyzing {} data points, {:.3}s to {:.3}s",
                samples.len(),
                first,
                last
            );
        } else {
            info!("Analyzing empty log");
        }
    }

    fn on_segments_found(&mut self, axis: Axis, segments: &[Segment], time: &[f64]) {
        info!("Found {} sustained inputs for {}", segments.len(), axis);
        for seg in segments {
            debug!(
                "  {} segment: {:.3}s to {:.3}s",
                axis, time[seg.start_idx], time[seg.end_idx]
            );
        }
    }

    fn on_segment_analyzed(&mut self, axis: Axis, segment: Segment, findings: &SegmentFindings) {
        if let Some(osc) = findings.oscillation {
            debug!(
                "  {} [{}..{}] oscillation: {} crossings, {:.1} Hz",
                axis, segment.start_idx, segment.end_idx, osc.crossings, osc.frequency_hz
            );
        }
        if let Some(amount) = findings.overshoot {
            debug!(
                "  {} [{}..{}] overshoot: {:.1}%",
                axis,
                segment.start_idx,
                segment.end_idx,
                amount * 100.0
            );
        }
        if findings.undershoot {
            debug!(
                "  {} [{}..{}] undershoot",
                axis, segment.start_idx, segment.end_idx
            );
        }
    }

    fn on_axis_complete(&mut self, analysis: &AxisAnalysis, _adjusted: &PidCoefficients) {
        debug!(
            "{} done: oscillations={} overshoot={} undershoot={}",
            analysis.axis,
            analysis.has_oscillations,
            analysis.has_overshoot,
            analysis.has_undershoot
        );
    }
}

/// Per-axis analyses in Roll, Pitch, Yaw order plus the recommended coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningResult {
    pub analyses: Vec<AxisAnalysis>,
    pub recommended: PidSet,
}

/// Segment detection, response analysis and recommendation for a single axis.
/// Segments are processed in chronological order; see `AxisAnalysis::absorb`.
pub fn analyze_axis(
    axis: Axis,
    samples: &LogSeries,
    current: &PidCoefficients,
    config: &AnalyzerConfig,
    observer: &mut dyn AnalysisObserver,
) -> Result<(AxisAnalysis, PidCoefficients), TunerError> {
    let time = samples.time();
    let segments = find_segments(time, samples.rc_command(axis), config);
    observer.on_segments_found(axis, &segments, time);

    let mut analysis = AxisAnalysis::new(axis);
    for segment in segments {
        let findings = analyze_segment(axis, segment, samples, config)?;
        observer.on_segment_analyzed(axis, segment, &findings);
        analysis = analysis.absorb((time[segment.start_idx], time[segment.end_idx]), &findings);
    }

    let recommendation = recommend(&analysis, current, config);
    analysis.recommendation = recommendation.text;
    observer.on_axis_complete(&analysis, &recommendation.adjusted);

    Ok((analysis, recommendation.adjusted))
}

/// Runs the whole analysis over a parsed log. Deterministic for a given input.
pub fn analyze_flight_log(
    log: &FlightLog,
    config: &AnalyzerConfig,
    observer: &mut dyn AnalysisObserver,
) -> Result<TuningResult, TunerError> {
    observer.on_analysis_start(&log.samples);

    let mut analyses = Vec::with_capacity(Axis::ALL.len());
    let mut recommended = PidSet::default();

    for axis in Axis::ALL {
        let current = log.config.pids.get(axis);
        let (analysis, adjusted) = analyze_axis(axis, &log.samples, current, config, observer)?;
        recommended.set(axis, adjusted);
        analyses.push(analysis);
    }

    Ok(TuningResult {
        analyses,
        recommended,
    })
}


// src/data_analysis/pipeline.rs
