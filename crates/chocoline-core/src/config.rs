//! # Line Configuration
//!
//! The recognized configuration surface of the inspection engine:
//! - `seed`: makes sensor draws reproducible
//! - `detection`: per-defect-kind detection probability (per-mille)
//! - `tolerances`: per-stage tolerance thresholds
//!
//! Loading (files, flags) is the caller's job. This module only defines the
//! shape, the defaults and validation. Every field has a default so partial
//! documents deserialize.

use crate::primitives::{
    DEFAULT_BREAKAGE_PER_MILLE, DEFAULT_BUBBLE_TOLERANCE, DEFAULT_BUBBLES_PER_MILLE,
    DEFAULT_DAMAGED_PACKAGING_PER_MILLE, DEFAULT_MISSING_PIECE_PER_MILLE,
    DEFAULT_STAIN_TOLERANCE, DEFAULT_STAINS_PER_MILLE, DEFAULT_WRONG_SHAPE_PER_MILLE, PER_MILLE,
};
use crate::{DefectKind, InspectionError};
use serde::{Deserialize, Serialize};

// =============================================================================
// LINE CONFIG
// =============================================================================

/// Complete configuration of one inspection run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Seed for sensor randomness. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Detection probabilities used by visual sensors.
    pub detection: DetectionProfile,
    /// Stage evaluation tolerances.
    pub tolerances: Tolerances,
}

impl LineConfig {
    /// Check every value is within range.
    pub fn validate(&self) -> Result<(), InspectionError> {
        self.detection.validate()
    }
}

// =============================================================================
// DETECTION PROFILE
// =============================================================================

/// Per-kind detection probability in per-mille (`0..=1000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionProfile {
    pub bubbles: u16,
    pub breakage: u16,
    pub wrong_shape: u16,
    pub stains: u16,
    pub missing_piece: u16,
    pub damaged_packaging: u16,
}

impl Default for DetectionProfile {
    fn default() -> Self {
        Self {
            bubbles: DEFAULT_BUBBLES_PER_MILLE,
            breakage: DEFAULT_BREAKAGE_PER_MILLE,
            wrong_shape: DEFAULT_WRONG_SHAPE_PER_MILLE,
            stains: DEFAULT_STAINS_PER_MILLE,
            missing_piece: DEFAULT_MISSING_PIECE_PER_MILLE,
            damaged_packaging: DEFAULT_DAMAGED_PACKAGING_PER_MILLE,
        }
    }
}

impl DetectionProfile {
    /// A profile where every kind has the same probability.
    #[must_use]
    pub fn uniform(per_mille: u16) -> Self {
        Self {
            bubbles: per_mille,
            breakage: per_mille,
            wrong_shape: per_mille,
            stains: per_mille,
            missing_piece: per_mille,
            damaged_packaging: per_mille,
        }
    }

    /// Detection probability of `kind`.
    #[must_use]
    pub fn probability(&self, kind: DefectKind) -> u16 {
        match kind {
            DefectKind::Bubbles => self.bubbles,
            DefectKind::Breakage => self.breakage,
            DefectKind::WrongShape => self.wrong_shape,
            DefectKind::Stains => self.stains,
            DefectKind::MissingPiece => self.missing_piece,
            DefectKind::DamagedPackaging => self.damaged_packaging,
        }
    }

    /// Override the probability of one kind.
    #[must_use]
    pub fn with(mut self, kind: DefectKind, per_mille: u16) -> Self {
        let slot = match kind {
            DefectKind::Bubbles => &mut self.bubbles,
            DefectKind::Breakage => &mut self.breakage,
            DefectKind::WrongShape => &mut self.wrong_shape,
            DefectKind::Stains => &mut self.stains,
            DefectKind::MissingPiece => &mut self.missing_piece,
            DefectKind::DamagedPackaging => &mut self.damaged_packaging,
        };
        *slot = per_mille;
        self
    }

    /// Fail if any probability exceeds certainty.
    pub fn validate(&self) -> Result<(), InspectionError> {
        for kind in DefectKind::ALL {
            let p = self.probability(kind);
            if p > PER_MILLE {
                return Err(InspectionError::InvalidConfig(format!(
                    "detection probability for '{}' is {} per-mille, maximum is {}",
                    kind, p, PER_MILLE
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// TOLERANCES
// =============================================================================

/// Per-stage tolerance thresholds.
///
/// Observations are binary per kind, so a count is `0` or `1`. A tolerance of
/// `0` means any observation of that kind crosses the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Molding: bubble observations allowed before rejection.
    pub bubble_tolerance: u32,
    /// Molding: stain observations allowed before the cosmetic flag is set.
    pub stain_tolerance: u32,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            bubble_tolerance: DEFAULT_BUBBLE_TOLERANCE,
            stain_tolerance: DEFAULT_STAIN_TOLERANCE,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(LineConfig::default().validate().is_ok());
    }

    #[test]
    fn override_single_kind() {
        let profile = DetectionProfile::uniform(0).with(DefectKind::Bubbles, 1000);
        assert_eq!(profile.probability(DefectKind::Bubbles), 1000);
        assert_eq!(profile.probability(DefectKind::Stains), 0);
    }

    #[test]
    fn probability_above_certainty_rejected() {
        let config = LineConfig {
            detection: DetectionProfile::default().with(DefectKind::Stains, 1001),
            ..LineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(InspectionError::InvalidConfig(msg)) if msg.contains("stains")
        ));
    }

    #[test]
    fn default_tolerances_are_strict() {
        let tolerances = Tolerances::default();
        assert_eq!(tolerances.bubble_tolerance, 0);
        assert_eq!(tolerances.stain_tolerance, 0);
    }
}
