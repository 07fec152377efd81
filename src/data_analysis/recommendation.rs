// src/data_analysis/recommendation.rs
//
// Turns an axis's detected response defects into PID adjustments.
//
// Rules run in a fixed order and each writes an absolute value into the
// recommended coefficients, computed from the *current* firmware value. When two
// rules touch the same term the later write replaces the earlier one; the
// adjustments never compound. A recommended term left at zero means "leave as is".

use crate::config::AnalyzerConfig;
use crate::constants::*;
use crate::data_analysis::axis_analysis::AxisAnalysis;
use crate::data_input::pid_metadata::PidCoefficients;

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub adjusted: PidCoefficients,
    pub text: String,
}

fn reduced(value: f64, fraction: f64) -> f64 {
    value - value * fraction
}

fn increased(value: f64, fraction: f64) -> f64 {
    value + value * fraction
}

pub fn recommend(
    analysis: &AxisAnalysis,
    current: &PidCoefficients,
    config: &AnalyzerConfig,
) -> Recommendation {
    let axis = analysis.axis;
    let mut adjusted = PidCoefficients::default();
    let mut lines: Vec<String> = Vec::new();

    if analysis.has_oscillations {
        if analysis.oscillation_frequency > config.high_frequency_oscillation_hz {
            adjusted.d = reduced(current.d, HF_OSCILLATION_D_REDUCTION);
            lines.push(format!(
                "Reduce {} D-term by 15-20% (currently {:.1})",
                axis, current.d
            ));
            if current.p > P_REDUCTION_THRESHOLD {
                adjusted.p = reduced(current.p, HF_OSCILLATION_P_REDUCTION);
                lines.push(format!(
                    "Consider reducing {} P-term by 10% (currently {:.1})",
                    axis, current.p
                ));
            }
        } else {
            adjusted.p = reduced(current.p, LF_OSCILLATION_P_REDUCTION);
            lines.push(format!(
                "Reduce {} P-term by 15-20% (currently {:.1})",
                axis, current.p
            ));
        }
    }

    if analysis.has_overshoot && analysis.overshoot_amount > config.significant_overshoot {
        adjusted.p = reduced(current.p, OVERSHOOT_P_REDUCTION);
        lines.push(format!(
            "Reduce {} P-term by 20% (currently {:.1})",
            axis, current.p
        ));
        adjusted.d = increased(current.d, OVERSHOOT_D_INCREASE);
        lines.push(format!(
            "Consider increasing {} D-term by 10% (currently {:.1})",
            axis, current.d
        ));
    }

    if analysis.has_undershoot {
        adjusted.i = increased(current.i, UNDERSHOOT_I_INCREASE);
        lines.push(format!(
            "Increase {} I-term by 15% (currently {:.1})",
            axis, current.i
        ));
        if current.ff > 0.0 {
            adjusted.ff = increased(current.ff, UNDERSHOOT_FF_INCREASE);
            lines.push(format!(
                "Consider increasing {} FF-term by 10% (currently {:.1})",
                axis, current.ff
            ));
        }
    }

    let text = if lines.is_empty() {
        format!("{} axis response looks good, no changes recommended.", axis)
    } else {
        lines.join("\n")
    };

    Recommendation { adjusted, text }
}


// src/data_analysis/recommendation.rs
