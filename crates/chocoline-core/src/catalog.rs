//! # Defect Catalog
//!
//! Static lookups over the defect vocabulary:
//! - which defect kinds can occur at which stage
//! - the severity weight of each kind (higher = more severe)
//!
//! | Kind | Molding | Packaging | Weight |
//! |------|---------|-----------|--------|
//! | bubbles | yes | | 3 |
//! | breakage | yes | yes | 5 |
//! | wrong_shape | yes | | 4 |
//! | stains | yes | | 1 |
//! | missing_piece | | yes | 6 |
//! | damaged_packaging | | yes | 5 |

use crate::{DefectKind, DefectSet, InspectionError, Stage};

const MOLDING_DEFECTS: &[DefectKind] = &[
    DefectKind::Bubbles,
    DefectKind::Breakage,
    DefectKind::WrongShape,
    DefectKind::Stains,
];

const PACKAGING_DEFECTS: &[DefectKind] = &[
    DefectKind::Breakage,
    DefectKind::MissingPiece,
    DefectKind::DamagedPackaging,
];

/// Defect kinds observable at `stage`, in declaration order.
#[must_use]
pub fn valid_kinds(stage: Stage) -> &'static [DefectKind] {
    match stage {
        Stage::Molding => MOLDING_DEFECTS,
        Stage::Packaging => PACKAGING_DEFECTS,
    }
}

/// Check whether `kind` can occur at `stage`.
#[must_use]
pub fn is_valid(kind: DefectKind, stage: Stage) -> bool {
    valid_kinds(stage).contains(&kind)
}

/// Fail with `InvalidDefect` if `kind` cannot occur at `stage`.
pub fn validate(kind: DefectKind, stage: Stage) -> Result<(), InspectionError> {
    if is_valid(kind, stage) {
        Ok(())
    } else {
        Err(InspectionError::InvalidDefect { kind, stage })
    }
}

/// Validate every kind of an observation against `stage`.
///
/// Reports the first offending kind in set order.
pub fn validate_set(defects: &DefectSet, stage: Stage) -> Result<(), InspectionError> {
    defects.iter().try_for_each(|kind| validate(*kind, stage))
}

/// Default severity weight of a defect kind.
#[must_use]
pub fn severity(kind: DefectKind) -> u32 {
    match kind {
        DefectKind::Stains => 1,
        DefectKind::Bubbles => 3,
        DefectKind::WrongShape => 4,
        DefectKind::Breakage | DefectKind::DamagedPackaging => 5,
        DefectKind::MissingPiece => 6,
    }
}

/// Total severity of an observation (saturating sum of weights).
#[must_use]
pub fn severity_of(defects: &DefectSet) -> u32 {
    defects
        .iter()
        .fold(0u32, |acc, kind| acc.saturating_add(severity(*kind)))
}

/// Stages at which `kind` can occur, in line order.
#[must_use]
pub fn stages_for(kind: DefectKind) -> Vec<Stage> {
    Stage::ALL
        .into_iter()
        .filter(|stage| is_valid(kind, *stage))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
