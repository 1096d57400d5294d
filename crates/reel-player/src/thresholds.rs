// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Progress fractions at which choices are revealed and enabled.

use reel_app_core::prefs::PlaybackPrefs;
use thiserror::Error;

/// Invalid threshold pair.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ThresholdError {
    /// A threshold is NaN or outside `[0, 1]`.
    #[error("{name} threshold {value} outside [0, 1]")]
    OutOfRange {
        /// `"reveal"` or `"enable"`.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
    /// Choices would become selectable before they are shown.
    #[error("reveal threshold {reveal} is after enable threshold {enable}")]
    Inverted {
        /// Reveal fraction.
        reveal: f32,
        /// Enable fraction.
        enable: f32,
    },
}

/// Validated reveal/enable pair, `0 <= reveal <= enable <= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    reveal: f32,
    enable: f32,
}

impl Thresholds {
    /// Default reveal fraction.
    pub const DEFAULT_REVEAL: f32 = 0.8;
    /// Default enable fraction.
    pub const DEFAULT_ENABLE: f32 = 0.95;

    /// Validate and build a threshold pair.
    pub fn new(reveal: f32, enable: f32) -> Result<Self, ThresholdError> {
        check("reveal", reveal)?;
        check("enable", enable)?;
        if reveal > enable {
            return Err(ThresholdError::Inverted { reveal, enable });
        }
        Ok(Self { reveal, enable })
    }

    /// Thresholds stored in the user's playback preferences.
    pub fn from_prefs(prefs: &PlaybackPrefs) -> Result<Self, ThresholdError> {
        Self::new(prefs.reveal_threshold, prefs.enable_threshold)
    }

    /// Fraction at which choices appear.
    pub fn reveal(&self) -> f32 {
        self.reveal
    }

    /// Fraction at which choices become selectable.
    pub fn enable(&self) -> f32 {
        self.enable
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            reveal: Self::DEFAULT_REVEAL,
            enable: Self::DEFAULT_ENABLE,
        }
    }
}

fn check(name: &'static str, value: f32) -> Result<(), ThresholdError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ThresholdError::OutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_prefs_defaults() {
        let from_prefs = Thresholds::from_prefs(&PlaybackPrefs::default()).unwrap();
        assert_eq!(from_prefs, Thresholds::default());
        assert_eq!(from_prefs.reveal(), 0.8);
        assert_eq!(from_prefs.enable(), 0.95);
    }

    #[test]
    fn strict_enable_variant_is_accepted() {
        let t = Thresholds::new(0.8, 0.99).unwrap();
        assert_eq!(t.enable(), 0.99);
        assert!(Thresholds::new(0.5, 0.5).is_ok());
    }

    #[test]
    fn rejects_out_of_range_and_inverted() {
        assert_eq!(
            Thresholds::new(-0.1, 0.9),
            Err(ThresholdError::OutOfRange {
                name: "reveal",
                value: -0.1
            })
        );
        assert!(matches!(
            Thresholds::new(0.8, f32::NAN),
            Err(ThresholdError::OutOfRange { name: "enable", .. })
        ));
        assert_eq!(
            Thresholds::new(0.9, 0.8),
            Err(ThresholdError::Inverted {
                reveal: 0.9,
                enable: 0.8
            })
        );
    }
}
