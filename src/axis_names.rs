// src/axis_names.rs

/// Centralized axis naming utilities
///
/// The tuner only ever deals with the three rotational axes. Everything that
/// is kept per axis is stored in a `[T; AXIS_COUNT]` array indexed by `Axis`,
/// so an out-of-range axis can only enter through `Axis::from_str`.
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TunerError;

pub const AXIS_COUNT: usize = 3;

/// Get all axis names as a static array
pub const AXIS_NAMES: [&str; AXIS_COUNT] = ["Roll", "Pitch", "Yaw"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    Roll,
    Pitch,
    Yaw,
}

impl Axis {
    /// Processing order for every per-axis pass.
    pub const ALL: [Axis; AXIS_COUNT] = [Axis::Roll, Axis::Pitch, Axis::Yaw];

    pub fn index(self) -> usize {
        match self {
            Axis::Roll => 0,
            Axis::Pitch => 1,
            Axis::Yaw => 2,
        }
    }

    pub fn name(self) -> &'static str {
        AXIS_NAMES[self.index()]
    }

    /// Lowercase form used by the firmware CLI (`p_roll`, `i_yaw`, ...).
    pub fn lowercase(self) -> &'static str {
        match self {
            Axis::Roll => "roll",
            Axis::Pitch => "pitch",
            Axis::Yaw => "yaw",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = TunerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Roll" => Ok(Axis::Roll),
            "Pitch" => Ok(Axis::Pitch),
            "Yaw" => Ok(Axis::Yaw),
            other => Err(TunerError::UnknownAxis(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_order_is_roll_pitch_yaw() {
        let names: Vec<&str> = Axis::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names, AXIS_NAMES.to_vec());
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }

    #[test]
    fn test_from_str_accepts_known_axes() {
        assert_eq!("Roll".parse::<Axis>().unwrap(), Axis::Roll);
        assert_eq!("Pitch".parse::<Axis>().unwrap(), Axis::Pitch);
        assert_eq!("Yaw".parse::<Axis>().unwrap(), Axis::Yaw);
    }

    #[test]
    fn test_from_str_rejects_unknown_axis() {
        match "Throttle".parse::<Axis>() {
            Err(TunerError::UnknownAxis(name)) => assert_eq!(name, "Throttle"),
            other => panic!("expected UnknownAxis, got {:?}", other),
        }
        // Names are case sensitive, matching the firmware header keys.
        assert!("roll".parse::<Axis>().is_err());
    }

    #[test]
    fn test_lowercase_names() {
        assert_eq!(Axis::Roll.lowercase(), "roll");
        assert_eq!(Axis::Pitch.lowercase(), "pitch");
        assert_eq!(Axis::Yaw.lowercase(), "yaw");
        assert_eq!(Axis::Yaw.to_string(), "Yaw");
    }
}
