// src/data_analysis/axis_analysis.rs

use serde::Serialize;

use crate::axis_names::Axis;
use crate::data_analysis::response_analyzer::SegmentFindings;

/// Aggregated response characterization for one axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisAnalysis {
    pub axis: Axis,
    pub has_oscillations: bool,
    pub has_overshoot: bool,
    pub has_undershoot: bool,
    pub oscillation_frequency: f64,
    pub oscillation_amplitude: f64,
    pub overshoot_amount: f64,
    /// (start time, end time) in seconds of each analyzed segment, in order.
    pub analyzed_segments: Vec<(f64, f64)>,
    pub recommendation: String,
}

impl AxisAnalysis {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            has_oscillations: false,
            has_overshoot: false,
            has_undershoot: false,
            oscillation_frequency: 0.0,
            oscillation_amplitude: 0.0,
            overshoot_amount: 0.0,
            analyzed_segments: Vec::new(),
            recommendation: String::new(),
        }
    }

    /// Fold step over an axis's segments, in chronological order.
    ///
    /// A defect stays flagged once any segment has shown it. Its magnitude
    /// (frequency, amplitude, overshoot amount) is taken from the most recent
    /// segment that detected it, replacing earlier values.
    pub fn absorb(mut self, span: (f64, f64), findings: &SegmentFindings) -> Self {
        self.analyzed_segments.push(span);

        if let Some(osc) = findings.oscillation {
            self.has_oscillations = true;
            self.oscillation_frequency = osc.frequency_hz;
            self.oscillation_amplitude = osc.amplitude;
        }
        if let Some(amount) = findings.overshoot {
            self.has_overshoot = true;
            self.overshoot_amount = amount;
        }
        if findings.undershoot {
            self.has_undershoot = true;
        }
        self
    }

    /// Folds every segment's findings into a fresh analysis for `axis`.
    pub fn from_findings<I>(axis: Axis, findings: I) -> Self
    where
        I: IntoIterator<Item = ((f64, f64), SegmentFindings)>,
    {
        findings
            .into_iter()
            .fold(AxisAnalysis::new(axis), |acc, (span, f)| acc.absorb(span, &f))
    }

    pub fn has_defects(&self) -> bool {
        self.has_oscillations || self.has_overshoot || self.has_undershoot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::response_analyzer::Oscillation;

    fn oscillating(freq: f64, amp: f64) -> SegmentFindings {
        SegmentFindings {
            oscillation: Some(Oscillation {
                crossings: 4,
                frequency_hz: freq,
                amplitude: amp,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn empty_fold_is_clean() {
        let analysis = AxisAnalysis::from_findings(Axis::Pitch, Vec::new());
        assert_eq!(analysis, AxisAnalysis::new(Axis::Pitch));
        assert!(!analysis.has_defects());
    }

    #[test]
    fn last_detecting_segment_sets_magnitudes() {
        let analysis = AxisAnalysis::from_findings(
            Axis::Roll,
            vec![
                ((0.1, 0.4), oscillating(45.0, 12.0)),
                ((1.0, 1.3), oscillating(18.0, 7.0)),
            ],
        );
        assert!(analysis.has_oscillations);
        assert_eq!(analysis.oscillation_frequency, 18.0);
        assert_eq!(analysis.oscillation_amplitude, 7.0);
        assert_eq!(analysis.analyzed_segments, vec![(0.1, 0.4), (1.0, 1.3)]);
    }

    #[test]
    fn clean_later_segment_does_not_clear_flags() {
        let overshooting = SegmentFindings {
            overshoot: Some(0.7),
            undershoot: true,
            ..Default::default()
        };
        let analysis = AxisAnalysis::from_findings(
            Axis::Yaw,
            vec![
                ((0.0, 0.3), oscillating(40.0, 5.0)),
                ((0.5, 0.8), overshooting),
                ((1.0, 1.4), SegmentFindings::default()),
            ],
        );
        assert!(analysis.has_oscillations);
        assert_eq!(analysis.oscillation_frequency, 40.0);
        assert!(analysis.has_overshoot);
        assert_eq!(analysis.overshoot_amount, 0.7);
        assert!(analysis.has_undershoot);
        assert_eq!(analysis.analyzed_segments.len(), 3);
    }

    #[test]
    fn fold_order_matters_for_magnitudes() {
        let a = ((0.0, 0.3), SegmentFindings { overshoot: Some(0.3), ..Default::default() });
        let b = ((0.5, 0.8), SegmentFindings { overshoot: Some(0.9), ..Default::default() });
        let forward = AxisAnalysis::from_findings(Axis::Roll, vec![a, b]);
        let reverse = AxisAnalysis::from_findings(Axis::Roll, vec![b, a]);
        assert_eq!(forward.overshoot_amount, 0.9);
        assert_eq!(reverse.overshoot_amount, 0.3);
    }
}

// src/data_analysis/axis_analysis.rs
