// src/config.rs

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::TunerError;

/// Thresholds used by segment detection, response analysis and the recommendation rules.
/// A TOML file may override any subset of the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub input_change_threshold: f64,
    pub required_steady_samples: usize,
    pub min_sustained_input_duration_s: f64,
    pub analysis_padding_samples: usize,
    pub min_oscillation_count: usize,
    pub overshoot_threshold: f64,
    pub undershoot_range_fraction: f64,
    pub high_frequency_oscillation_hz: f64,
    pub significant_overshoot: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            input_change_threshold: INPUT_CHANGE_THRESHOLD,
            required_steady_samples: REQUIRED_STEADY_SAMPLES,
            min_sustained_input_duration_s: MIN_SUSTAINED_INPUT_DURATION_S,
            analysis_padding_samples: ANALYSIS_PADDING_SAMPLES,
            min_oscillation_count: MIN_OSCILLATION_COUNT,
            overshoot_threshold: OVERSHOOT_THRESHOLD,
            undershoot_range_fraction: UNDERSHOOT_RANGE_FRACTION,
            high_frequency_oscillation_hz: HIGH_FREQUENCY_OSCILLATION_HZ,
            significant_overshoot: SIGNIFICANT_OVERSHOOT,
        }
    }
}

impl AnalyzerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TunerError> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|source| TunerError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, TunerError> {
        let config: AnalyzerConfig =
            toml::from_str(contents).map_err(|e| TunerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TunerError> {
        let positive = [
            ("input_change_threshold", self.input_change_threshold),
            ("min_sustained_input_duration_s", self.min_sustained_input_duration_s),
            ("overshoot_threshold", self.overshoot_threshold),
            ("undershoot_range_fraction", self.undershoot_range_fraction),
            ("high_frequency_oscillation_hz", self.high_frequency_oscillation_hz),
            ("significant_overshoot", self.significant_overshoot),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TunerError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.required_steady_samples == 0 {
            return Err(TunerError::Config(
                "required_steady_samples must be at least 1".to_string(),
            ));
        }
        if self.min_oscillation_count == 0 {
            return Err(TunerError::Config(
                "min_oscillation_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
