// src/data_input/log_data.rs

use crate::axis_names::{Axis, AXIS_COUNT};

/// Values extracted from a single data row of the CSV log.
/// Unparseable fields have already been replaced by 0.0.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogRowData {
    pub time_sec: f64,                     // Timestamp (in seconds).
    pub p_term: [f64; AXIS_COUNT],         // Proportional term [Roll, Pitch, Yaw].
    pub i_term: [f64; AXIS_COUNT],         // Integral term [Roll, Pitch, Yaw].
    pub d_term: [f64; AXIS_COUNT],         // Derivative term [Roll, Pitch, 0].
    pub f_term: [f64; AXIS_COUNT],         // Feed-Forward [Roll, Pitch, Yaw].
    pub rc_command: [f64; AXIS_COUNT],     // Pilot command [Roll, Pitch, Yaw].
    pub gyro: [f64; AXIS_COUNT],           // Gyroscope readings (gyroADC) [Roll, Pitch, Yaw].
}

/// Time series built from all parsed rows, stored column-wise.
/// Every sequence has the same length and index `i` is the same instant in all of them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogSeries {
    time: Vec<f64>,
    p_term: [Vec<f64>; AXIS_COUNT],
    i_term: [Vec<f64>; AXIS_COUNT],
    d_term: [Vec<f64>; AXIS_COUNT],
    f_term: [Vec<f64>; AXIS_COUNT],
    rc_command: [Vec<f64>; AXIS_COUNT],
    gyro: [Vec<f64>; AXIS_COUNT],
}

impl LogSeries {
    pub fn push_row(&mut self, row: &LogRowData) {
        self.time.push(row.time_sec);
        for axis in 0..AXIS_COUNT {
            self.p_term[axis].push(row.p_term[axis]);
            self.i_term[axis].push(row.i_term[axis]);
            self.d_term[axis].push(row.d_term[axis]);
            self.f_term[axis].push(row.f_term[axis]);
            self.rc_command[axis].push(row.rc_command[axis]);
            self.gyro[axis].push(row.gyro[axis]);
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn rc_command(&self, axis: Axis) -> &[f64] {
        &self.rc_command[axis.index()]
    }

    pub fn gyro(&self, axis: Axis) -> &[f64] {
        &self.gyro[axis.index()]
    }

    /// Per-sample P/I/D/F echo from the firmware. Kept for reference only;
    /// the analysis works from the static header coefficients.
    pub fn p_term(&self, axis: Axis) -> &[f64] {
        &self.p_term[axis.index()]
    }

    pub fn i_term(&self, axis: Axis) -> &[f64] {
        &self.i_term[axis.index()]
    }

    pub fn d_term(&self, axis: Axis) -> &[f64] {
        &self.d_term[axis.index()]
    }

    pub fn f_term(&self, axis: Axis) -> &[f64] {
        &self.f_term[axis.index()]
    }

    /// Average sample rate in Hz, from positive time deltas only.
    pub fn estimated_sample_rate(&self) -> Option<f64> {
        let (total_delta, count) = self
            .time
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|&delta| delta > 1e-9)
            .fold((0.0, 0usize), |(sum, n), delta| (sum + delta, n + 1));
        if count == 0 {
            return None;
        }
        Some(count as f64 / total_delta)
    }
}


// src/data_input/log_data.rs
