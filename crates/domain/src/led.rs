//! LED output levels — validated RGBW values.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One RGBW output value, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedLevel {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub white: f32,
}

impl LedLevel {
    /// All channels off.
    pub const OFF: Self = Self {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        white: 0.0,
    };

    /// Build a level, validating every channel.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LevelOutOfRange`] for the first channel
    /// outside `0.0..=1.0`.
    pub fn new(red: f32, green: f32, blue: f32, white: f32) -> Result<Self, ValidationError> {
        let level = Self {
            red,
            green,
            blue,
            white,
        };
        level.validate()?;
        Ok(level)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LevelOutOfRange`] for the first channel
    /// outside `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("white", self.white),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::LevelOutOfRange { channel, value });
            }
        }
        Ok(())
    }

    /// `true` when every channel is zero.
    #[must_use]
    pub fn is_off(&self) -> bool {
        *self == Self::OFF
    }
}

/// The pair of configured outputs a backlight sequencer steps through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedLevels {
    /// Applied on entering the ON stage.
    pub full: LedLevel,
    /// Applied on entering the DIM stage.
    pub dim: LedLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_levels_within_range() {
        let level = LedLevel::new(1.0, 0.5, 0.0, 0.25).unwrap();
        assert_eq!(level.red, 1.0);
        assert_eq!(level.white, 0.25);
    }

    #[test]
    fn should_reject_level_above_one() {
        let result = LedLevel::new(0.0, 1.5, 0.0, 0.0);
        assert!(matches!(
            result,
            Err(ValidationError::LevelOutOfRange {
                channel: "green",
                ..
            })
        ));
    }

    #[test]
    fn should_reject_negative_level() {
        let result = LedLevel::new(0.0, 0.0, 0.0, -0.1);
        assert!(matches!(
            result,
            Err(ValidationError::LevelOutOfRange {
                channel: "white",
                ..
            })
        ));
    }

    #[test]
    fn should_report_off_for_all_zero() {
        assert!(LedLevel::OFF.is_off());
        assert!(!LedLevel::new(0.1, 0.0, 0.0, 0.0).unwrap().is_off());
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let levels = LedLevels {
            full: LedLevel::new(1.0, 0.9, 0.8, 0.0).unwrap(),
            dim: LedLevel::new(0.2, 0.2, 0.2, 0.0).unwrap(),
        };
        let json = serde_json::to_string(&levels).unwrap();
        let parsed: LedLevels = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, levels);
    }
}
