// src/pid_context.rs

use crate::axis_names::Axis;
use crate::data_input::pid_metadata::{FlightConfig, PidCoefficients};

/// Flight controller identity and current PID values, shared by the report
/// heading and the plot titles.
#[derive(Debug, Clone)]
pub struct PidContext {
    pub config: FlightConfig,

    /// Root filename (without path/extension) for output file naming
    pub root_name: String,
}

impl PidContext {
    pub fn new(config: FlightConfig, root_name: String) -> Self {
        Self { config, root_name }
    }

    pub fn current_pids(&self, axis: Axis) -> &PidCoefficients {
        self.config.pids.get(axis)
    }

    /// "Roll (P:45 I:40 D:35 FF:0)", or just the axis name when the log carried no PIDs for it.
    pub fn axis_title_with_pids(&self, axis: Axis) -> String {
        let pids = self.current_pids(axis);
        if pids.is_zero() {
            axis.to_string()
        } else {
            format!("{} ({})", axis, pids.format_for_title())
        }
    }

    /// One-line description of the log: file name, firmware and craft when known.
    pub fn heading(&self) -> String {
        let mut heading = self.root_name.clone();
        if let Some(firmware) = &self.config.firmware_revision {
            heading.push_str(&format!(" | {}", firmware));
        }
        if let Some(craft) = &self.config.craft_name {
            heading.push_str(&format!(" | {}", craft));
        }
        heading
    }
}


// src/pid_context.rs
