//! # chocoline-core
//!
//! The inspection engine for Chocoline - THE LOGIC.
//!
//! This crate simulates automated quality inspection on a chocolate
//! production line: sensors observe units at the molding and packaging
//! stages, a stage evaluator turns observations into verdicts, and the
//! inspection system records every evaluation and aggregates the record log
//! into a report.
//!
//! ## Data Flow
//!
//! ```text
//! InspectableUnit ──► InspectionSystem ──► QualitySensor (per stage)
//!                          │                     │ defects
//!                          │◄────────────────────┘
//!                          ├──► StageEvaluator ──► verdict
//!                          ├──► InspectionRecord log
//!                          └──► Report (pure aggregation)
//! ```
//!
//! ## Architectural Constraints
//!
//! - No I/O, no logging, no clocks: callers supply units and consume reports
//! - Integer arithmetic only (per-mille probabilities, basis-point rates)
//! - Deterministic given a seed
//! - Single-threaded: no internal locking

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod config;
pub mod evaluator;
pub mod inspection;
pub mod line;
pub mod primitives;
pub mod record;
pub mod report;
pub mod sensor;
pub mod system;
pub mod types;
pub mod unit;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use system::Stage;
pub use types::{DefectKind, DefectSet, InspectionError, QualityState, UnitId};

// =============================================================================
// RE-EXPORTS: Inspection Engine
// =============================================================================

pub use config::{DetectionProfile, LineConfig, Tolerances};
pub use evaluator::{Assessment, StageEvaluator};
pub use inspection::InspectionSystem;
pub use line::{BatchSpec, BatchSummary, run_unit, simulate_batch};
pub use record::InspectionRecord;
pub use report::{Report, StageTally};
pub use sensor::{QualitySensor, SamplingSensor, ScriptedSensor, VisualSensor};
pub use unit::{InspectableUnit, StageVerdict};
