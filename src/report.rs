// src/report.rs

use std::fmt::Write as _;

use serde::Serialize;

use crate::axis_names::Axis;
use crate::data_analysis::axis_analysis::AxisAnalysis;
use crate::data_analysis::pipeline::TuningResult;
use crate::data_input::log_parser::FlightLog;
use crate::data_input::pid_metadata::{PidCoefficients, PidSet};

/// Everything one run produces, ready for text or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuningReport {
    pub tool_version: String,
    pub firmware_revision: Option<String>,
    pub craft_name: Option<String>,
    pub data_points: usize,
    pub skipped_lines: usize,
    pub field_parse_failures: usize,
    pub current: PidSet,
    pub recommended: PidSet,
    pub analyses: Vec<AxisAnalysis>,
    pub commands: Vec<String>,
}

impl TuningReport {
    pub fn new(log: &FlightLog, result: TuningResult) -> Self {
        let diagnostics = log.diagnostics.summary();
        Self {
            tool_version: crate::crate_version().to_string(),
            firmware_revision: log.config.firmware_revision.clone(),
            craft_name: log.config.craft_name.clone(),
            data_points: log.samples.len(),
            skipped_lines: diagnostics.skipped_lines,
            field_parse_failures: diagnostics.field_parse_failures,
            current: log.config.pids,
            commands: configurator_commands(&result.recommended),
            recommended: result.recommended,
            analyses: result.analyses,
        }
    }
}

/// Terms in command order with their CLI prefix. Yaw has no D entry.
fn command_terms(axis: Axis, pids: &PidCoefficients) -> Vec<(&'static str, f64)> {
    let mut terms = vec![("p", pids.p), ("i", pids.i)];
    if axis != Axis::Yaw {
        terms.push(("d", pids.d));
    }
    terms.push(("f", pids.ff));
    terms
}

/// Firmware CLI lines (`set p_roll = 41`) for every recommended term.
///
/// A zero term means "no change" and is left out. Values are rounded to the
/// nearest integer since the firmware only takes integers.
pub fn configurator_commands(recommended: &PidSet) -> Vec<String> {
    let mut commands = Vec::new();
    for (axis, pids) in recommended.iter() {
        for (term, value) in command_terms(axis, pids) {
            if value != 0.0 {
                let rounded = value.round() as i64;
                commands.push(format!("set {}_{} = {}", term, axis.lowercase(), rounded));
            }
        }
    }
    commands
}

fn format_term(value: f64) -> String {
    if value == 0.0 {
        "-".to_string()
    } else {
        format!("{:.0}", value)
    }
}

fn write_pid_table(out: &mut String, pids: &PidSet) {
    let _ = writeln!(out, "  {:<6} {:>6} {:>6} {:>6} {:>6}", "Axis", "P", "I", "D", "FF");
    for (axis, c) in pids.iter() {
        let _ = writeln!(
            out,
            "  {:<6} {:>6} {:>6} {:>6} {:>6}",
            axis.name(),
            format_term(c.p),
            format_term(c.i),
            format_term(c.d),
            format_term(c.ff)
        );
    }
}

/// Human-readable summary of a report.
pub fn render_text(report: &TuningReport) -> String {
    let mut out = String::new();
    let unknown = "N/A";

    let _ = writeln!(out, "Blackbox PID Tuner v{}", report.tool_version);
    let _ = writeln!(
        out,
        "Firmware: {}",
        report.firmware_revision.as_deref().unwrap_or(unknown)
    );
    let _ = writeln!(out, "Craft: {}", report.craft_name.as_deref().unwrap_or(unknown));
    let _ = writeln!(out, "Data points: {}", report.data_points);
    if report.skipped_lines > 0 || report.field_parse_failures > 0 {
        let _ = writeln!(
            out,
            "Skipped lines: {}, unparseable fields: {}",
            report.skipped_lines, report.field_parse_failures
        );
    }

    out.push_str("\nCurrent PIDs:\n");
    write_pid_table(&mut out, &report.current);

    out.push_str("\nAnalysis:\n");
    for analysis in &report.analyses {
        let _ = writeln!(
            out,
            "{} ({} segment(s) analyzed)",
            analysis.axis,
            analysis.analyzed_segments.len()
        );
        if analysis.has_oscillations {
            let _ = writeln!(
                out,
                "  Oscillation: {:.1} Hz, amplitude {:.1}",
                analysis.oscillation_frequency, analysis.oscillation_amplitude
            );
        }
        if analysis.has_overshoot {
            let _ = writeln!(out, "  Overshoot: {:.1}%", analysis.overshoot_amount * 100.0);
        }
        if analysis.has_undershoot {
            out.push_str("  Undershoot: response stays short of the command\n");
        }
        for line in analysis.recommendation.lines() {
            let _ = writeln!(out, "  - {}", line);
        }
    }

    out.push_str("\nRecommended PIDs (- = keep current):\n");
    write_pid_table(&mut out, &report.recommended);

    if report.commands.is_empty() {
        out.push_str("\nNo changes to apply.\n");
    } else {
        out.push_str("\nConfigurator commands:\n");
        for command in &report.commands {
            let _ = writeln!(out, "{}", command);
        }
        out.push_str("save\n");
    }
    out
}


// src/report.rs
