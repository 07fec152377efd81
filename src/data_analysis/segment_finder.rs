// src/data_analysis/segment_finder.rs

use serde::Serialize;

use crate::config::AnalyzerConfig;

/// Closed index range `[start_idx, end_idx]` of one sustained-input window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub start_idx: usize,
    pub end_idx: usize,
}

impl Segment {
    pub fn new(start_idx: usize, end_idx: usize) -> Self {
        Self { start_idx, end_idx }
    }
}

/// Finds windows where the pilot moved the stick sharply and then held it.
///
/// A window opens on the first sample whose change from the previous sample
/// exceeds the input threshold. It closes once the command has stayed within
/// the threshold of its baseline for `required_steady_samples` samples, and is
/// kept only if it lasted at least `min_sustained_input_duration_s`. A window
/// still open at the end of the log is closed on the last sample.
///
/// `time` and `command` must be index-aligned.
pub fn find_segments(time: &[f64], command: &[f64], config: &AnalyzerConfig) -> Vec<Segment> {
    let n = time.len().min(command.len());
    let mut segments = Vec::new();
    if n < 2 {
        return segments;
    }

    let threshold = config.input_change_threshold;
    let min_duration = config.min_sustained_input_duration_s;

    let mut segment_start: Option<usize> = None;
    let mut baseline = 0.0;
    let mut steady_count = 0usize;

    for i in 1..n {
        let current = command[i];
        let delta = (current - command[i - 1]).abs();

        if delta > threshold {
            if segment_start.is_none() {
                segment_start = Some(i);
                baseline = current;
                steady_count = 0;
            }
        } else if let Some(start) = segment_start {
            if (current - baseline).abs() < threshold {
                steady_count += 1;
            } else {
                steady_count = 0;
                baseline = current;
            }

            if steady_count >= config.required_steady_samples {
                if time[i] - time[start] >= min_duration {
                    segments.push(Segment::new(start, i));
                }
                segment_start = None;
                steady_count = 0;
            }
        }
    }

    if let Some(start) = segment_start {
        let last = n - 1;
        if time[last] - time[start] >= min_duration {
            segments.push(Segment::new(start, last));
        }
    }

    segments
}


// src/data_analysis/segment_finder.rs
