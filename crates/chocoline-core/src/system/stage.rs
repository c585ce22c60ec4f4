//! # Process Stages
//!
//! The discrete points of the production process at which inspection occurs.
//!
//! ## Stage Definitions
//!
//! | Stage | Identifier | Inspected For |
//! |-------|------------|---------------|
//! | Molding | `molding` | Bubbles, breakage, wrong shape, stains |
//! | Packaging | `packaging` | Breakage, missing piece, damaged packaging |
//!
//! Stages are totally ordered in line order: a unit is molded before it is
//! packaged. The order is used for default routes and for deterministic
//! iteration in reports.

use crate::InspectionError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// STAGE ENUM
// =============================================================================

/// A process stage of the chocolate line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Chocolate is poured into molds and cooled.
    Molding,
    /// Finished pieces are wrapped and boxed.
    Packaging,
}

impl Stage {
    /// Every stage, in line order.
    pub const ALL: [Stage; 2] = [Stage::Molding, Stage::Packaging];

    /// Get the stage identifier used in configuration and feed files.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Stage::Molding => "molding",
            Stage::Packaging => "packaging",
        }
    }

    /// Get the human-readable stage name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Molding => "Molding",
            Stage::Packaging => "Packaging",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Stage {
    type Err = InspectionError;

    /// Parse a stage identifier. Matching is case-insensitive and accepts the
    /// line operators' Spanish names as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "molding" | "moldeado" => Ok(Stage::Molding),
            "packaging" | "empaque" => Ok(Stage::Packaging),
            _ => Err(InspectionError::InvalidStage(s.to_string())),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
