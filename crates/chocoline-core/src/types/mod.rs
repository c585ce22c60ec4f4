//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the inspection engine:
//! - Unit identifiers (`UnitId`)
//! - Defect kinds and observation sets (`DefectKind`, `DefectSet`)
//! - Quality verdicts (`QualityState`)
//! - Error types (`InspectionError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Carry no floating-point state

use crate::system::Stage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

// =============================================================================
// UNIT IDENTIFIER
// =============================================================================

/// Identifier of a chocolate unit, unique within one inspection run.
///
/// Identifiers are supplied by the unit feed (e.g. a batch code such as
/// `LOTE-M-12`); the core never generates them on its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub String);

impl UnitId {
    /// Create a new unit identifier.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// DEFECT KIND
// =============================================================================

/// A named nonconformity a sensor can observe.
///
/// The set is closed. Which kinds are meaningful at which stage is decided by
/// the [`catalog`](crate::catalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectKind {
    /// Air bubbles trapped in the chocolate.
    Bubbles,
    /// The piece is cracked or broken.
    Breakage,
    /// The piece did not take the mold shape.
    WrongShape,
    /// Surface stains or bloom.
    Stains,
    /// A piece is missing from the package.
    MissingPiece,
    /// The wrapper or box is damaged.
    DamagedPackaging,
}

impl DefectKind {
    /// Every defect kind, in declaration order.
    pub const ALL: [DefectKind; 6] = [
        DefectKind::Bubbles,
        DefectKind::Breakage,
        DefectKind::WrongShape,
        DefectKind::Stains,
        DefectKind::MissingPiece,
        DefectKind::DamagedPackaging,
    ];

    /// Get the defect identifier used in reports and configuration.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            DefectKind::Bubbles => "bubbles",
            DefectKind::Breakage => "breakage",
            DefectKind::WrongShape => "wrong_shape",
            DefectKind::Stains => "stains",
            DefectKind::MissingPiece => "missing_piece",
            DefectKind::DamagedPackaging => "damaged_packaging",
        }
    }

    /// Cosmetic defects never reject a unit on their own.
    #[must_use]
    pub fn is_cosmetic(&self) -> bool {
        matches!(self, DefectKind::Stains)
    }
}

impl std::fmt::Display for DefectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// The defects observed for one unit. Duplicates collapse; order is the
/// `DefectKind` declaration order.
pub type DefectSet = BTreeSet<DefectKind>;

// =============================================================================
// QUALITY STATE
// =============================================================================

/// Quality verdict for a unit, either at one stage or overall.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum QualityState {
    /// No verdict yet.
    #[default]
    Pending,
    /// Passed evaluation.
    Approved,
    /// Failed evaluation.
    Rejected,
}

impl QualityState {
    /// Get the state identifier used in reports.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            QualityState::Pending => "pending",
            QualityState::Approved => "approved",
            QualityState::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for QualityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the inspection engine.
///
/// All errors are local validation failures. None are transient, so none are
/// retried; they are returned to the caller as-is and never logged here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectionError {
    /// A defect kind was used at a stage where it cannot occur.
    #[error("Defect '{kind}' is not valid at stage '{stage}'")]
    InvalidDefect { kind: DefectKind, stage: Stage },

    /// `process` was called for a stage with no sensor registered.
    #[error("No sensor registered for stage '{0}'")]
    NoSensorRegistered(Stage),

    /// A stage identifier did not name a known stage.
    #[error("Unknown stage: {0}")]
    InvalidStage(String),

    /// A line configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// TESTS
// =============================================================================
