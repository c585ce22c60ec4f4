//! # Stage Evaluator
//!
//! Maps one stage-scoped observation to a verdict.
//!
//! ## Policy
//!
//! - **Molding**: breakage or wrong shape rejects. Bubbles reject once their
//!   count exceeds the bubble tolerance. Anything else approves; stains above
//!   the stain tolerance (or tolerated bubbles) set the cosmetic flag.
//! - **Packaging**: breakage, missing piece or damaged packaging rejects.
//! - An empty observation approves at every stage.
//!
//! Evaluation is a pure function of `(defects, stage, tolerances)`. The
//! evaluator is the only component that turns `Pending` into a terminal
//! verdict.

use crate::catalog;
use crate::config::Tolerances;
use crate::{DefectKind, DefectSet, InspectionError, QualityState, Stage};
use serde::{Deserialize, Serialize};

/// Verdict plus the cosmetic flag for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// The stage verdict. Never `Pending`.
    pub state: QualityState,
    /// Approved, but with cosmetic defects retained for reporting.
    pub cosmetic: bool,
}

impl Assessment {
    fn approved(cosmetic: bool) -> Self {
        Self {
            state: QualityState::Approved,
            cosmetic,
        }
    }

    fn rejected() -> Self {
        Self {
            state: QualityState::Rejected,
            cosmetic: false,
        }
    }
}

/// Stage-specific evaluation policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageEvaluator {
    tolerances: Tolerances,
}

impl StageEvaluator {
    /// Create an evaluator with default (strict) tolerances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with custom tolerances.
    #[must_use]
    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    /// Get the tolerances in effect.
    #[must_use]
    pub fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    /// Evaluate an observation, returning only the verdict.
    pub fn evaluate(
        &self,
        defects: &DefectSet,
        stage: Stage,
    ) -> Result<QualityState, InspectionError> {
        self.assess(defects, stage).map(|a| a.state)
    }

    /// Evaluate an observation, returning the verdict and cosmetic flag.
    ///
    /// Fails with `InvalidDefect` if the observation carries a kind that
    /// cannot occur at `stage`.
    pub fn assess(
        &self,
        defects: &DefectSet,
        stage: Stage,
    ) -> Result<Assessment, InspectionError> {
        catalog::validate_set(defects, stage)?;

        let assessment = match stage {
            Stage::Molding => self.assess_molding(defects),
            Stage::Packaging => Self::assess_packaging(defects),
        };
        Ok(assessment)
    }

    fn assess_molding(&self, defects: &DefectSet) -> Assessment {
        if defects.contains(&DefectKind::Breakage) || defects.contains(&DefectKind::WrongShape) {
            return Assessment::rejected();
        }

        let bubbles = count(defects, DefectKind::Bubbles);
        if bubbles > self.tolerances.bubble_tolerance {
            return Assessment::rejected();
        }

        let stains = count(defects, DefectKind::Stains);
        let cosmetic = bubbles > 0 || stains > self.tolerances.stain_tolerance;
        Assessment::approved(cosmetic)
    }

    fn assess_packaging(defects: &DefectSet) -> Assessment {
        let rejecting = [
            DefectKind::Breakage,
            DefectKind::MissingPiece,
            DefectKind::DamagedPackaging,
        ];
        if rejecting.iter().any(|kind| defects.contains(kind)) {
            Assessment::rejected()
        } else {
            Assessment::approved(false)
        }
    }
}

// Observations carry no magnitude: a kind is seen once or not at all.
fn count(defects: &DefectSet, kind: DefectKind) -> u32 {
    u32::from(defects.contains(&kind))
}

// =============================================================================
// TESTS
// =============================================================================
