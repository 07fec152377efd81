// src/data_input/pid_metadata.rs

use log::warn;
use serde::Serialize;

use crate::axis_names::{Axis, AXIS_COUNT};
use crate::error::TunerError;

/// PID coefficients for a single axis.
/// In a recommendation set a zero field means "no change recommended".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PidCoefficients {
    pub p: f64,
    pub i: f64,
    pub d: f64,
    pub ff: f64,
}

impl PidCoefficients {
    pub fn is_zero(&self) -> bool {
        self.p == 0.0 && self.i == 0.0 && self.d == 0.0 && self.ff == 0.0
    }

    /// Format PID values for display, e.g. "P:45 I:40 D:35 FF:0".
    pub fn format_for_title(&self) -> String {
        format!(
            "P:{} I:{} D:{} FF:{}",
            self.p, self.i, self.d, self.ff
        )
    }
}

/// PID coefficients for all three axes, indexed by `Axis`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PidSet {
    pub roll: PidCoefficients,
    pub pitch: PidCoefficients,
    pub yaw: PidCoefficients,
}

impl PidSet {
    pub fn get(&self, axis: Axis) -> &PidCoefficients {
        match axis {
            Axis::Roll => &self.roll,
            Axis::Pitch => &self.pitch,
            Axis::Yaw => &self.yaw,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut PidCoefficients {
        match axis {
            Axis::Roll => &mut self.roll,
            Axis::Pitch => &mut self.pitch,
            Axis::Yaw => &mut self.yaw,
        }
    }

    pub fn set(&mut self, axis: Axis, coefficients: PidCoefficients) {
        *self.get_mut(axis) = coefficients;
    }

    /// Lookup by axis name; anything outside Roll/Pitch/Yaw is a contract error.
    pub fn get_by_name(&self, axis_name: &str) -> Result<&PidCoefficients, TunerError> {
        let axis: Axis = axis_name.parse()?;
        Ok(self.get(axis))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, &PidCoefficients)> {
        Axis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }
}

/// Flight controller configuration found in the log preamble.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlightConfig {
    pub firmware_revision: Option<String>,
    pub craft_name: Option<String>,
    pub pids: PidSet,
}

/// Split a preamble line on its first comma into a quote-trimmed key and value.
/// Lines without a comma carry no setting and yield `None`.
pub fn split_preamble_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(',')?;
    Some((trim_quotes(key), trim_quotes(value)))
}

fn trim_quotes(s: &str) -> &str {
    s.trim().trim_matches('"')
}

/// Parse the configuration preamble (every line before the CSV header).
/// Unrecognized keys are ignored so newer firmware headers do not break parsing.
pub fn parse_preamble<'a, I>(lines: I) -> FlightConfig
where
    I: IntoIterator<Item = &'a str>,
{
    let mut config = FlightConfig::default();
    let mut seen = [false; AXIS_COUNT];

    for line in lines {
        let Some((key, value)) = split_preamble_line(line) else {
            continue;
        };
        match key {
            "Firmware revision" => config.firmware_revision = Some(value.to_string()),
            "Craft name" => config.craft_name = Some(value.to_string()),
            "rollPID" | "pitchPID" | "yawPID" => {
                let axis = match key {
                    "rollPID" => Axis::Roll,
                    "pitchPID" => Axis::Pitch,
                    _ => Axis::Yaw,
                };
                config.pids.set(axis, parse_axis_pid(value, axis));
                seen[axis.index()] = true;
            }
            _ => {}
        }
    }

    for axis in Axis::ALL {
        if !seen[axis.index()] {
            warn!(
                "No {}PID entry in log header, treating current {} coefficients as zero",
                axis.lowercase(),
                axis
            );
        }
    }

    config
}

/// Parse PID values from a string like "45,40,35,0,0".
/// Positions are P, I, (unused), D and optionally FF. The yaw D term is not
/// exposed by the firmware and is always zero.
pub fn parse_axis_pid(pid_str: &str, axis: Axis) -> PidCoefficients {
    let values: Vec<f64> = pid_str.split(',').map(parse_number_or_zero).collect();

    if values.len() < 4 {
        warn!(
            "{} PID string '{}' has {} values, expected at least 4; missing terms default to 0",
            axis,
            pid_str,
            values.len()
        );
    }
    let at = |idx: usize| values.get(idx).copied().unwrap_or(0.0);

    PidCoefficients {
        p: at(0),
        i: at(1),
        d: if axis == Axis::Yaw { 0.0 } else { at(3) },
        ff: at(4),
    }
}

/// Numeric parse that substitutes 0.0 for anything unparseable or non-finite.
pub fn parse_number_or_zero(s: &str) -> f64 {
    try_parse_number(s).unwrap_or(0.0)
}

pub(crate) fn try_parse_number(s: &str) -> Option<f64> {
    trim_quotes(s)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
