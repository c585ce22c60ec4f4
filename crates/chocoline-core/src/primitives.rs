//! # Line Primitives
//!
//! Hardcoded constants for the Chocoline inspection engine.
//!
//! The engine uses integer arithmetic only. Probabilities are expressed in
//! per-mille (parts per thousand) and rates in basis points (parts per ten
//! thousand).

/// Scale of a detection probability: `1000` per-mille is certainty.
pub const PER_MILLE: u16 = 1000;

/// Scale of a rate in the report: `10_000` basis points is 100%.
pub const BASIS_POINTS: u64 = 10_000;

// =============================================================================
// DEFAULT DETECTION PROBABILITIES (per-mille)
// =============================================================================

/// Default chance a visual sensor reports air bubbles.
pub const DEFAULT_BUBBLES_PER_MILLE: u16 = 150;

/// Default chance a visual sensor reports breakage.
pub const DEFAULT_BREAKAGE_PER_MILLE: u16 = 50;

/// Default chance a visual sensor reports a wrong shape.
pub const DEFAULT_WRONG_SHAPE_PER_MILLE: u16 = 80;

/// Default chance a visual sensor reports stains.
pub const DEFAULT_STAINS_PER_MILLE: u16 = 200;

/// Default chance a visual sensor reports a missing piece.
pub const DEFAULT_MISSING_PIECE_PER_MILLE: u16 = 40;

/// Default chance a visual sensor reports damaged packaging.
pub const DEFAULT_DAMAGED_PACKAGING_PER_MILLE: u16 = 60;

// =============================================================================
// DEFAULT TOLERANCES
// =============================================================================

/// Bubble observations tolerated at molding before rejection.
///
/// Bubbles are binary (present or absent), so with `0` any bubble rejects.
pub const DEFAULT_BUBBLE_TOLERANCE: u32 = 0;

/// Stain observations tolerated before a unit is flagged as cosmetic.
pub const DEFAULT_STAIN_TOLERANCE: u32 = 0;

// =============================================================================
// INPUT LIMITS
// =============================================================================

/// Maximum number of kinds a sampling sensor may draw per inspection.
pub const MAX_SAMPLED_DEFECTS: usize = 8;

/// Maximum number of units in a single simulated batch.
pub const MAX_BATCH_SIZE: usize = 100_000;
