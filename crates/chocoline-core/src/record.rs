//! # Inspection Records
//!
//! Immutable snapshot of one (unit, stage) evaluation. Records are created
//! once by the inspection system, appended to its log and never mutated.

use crate::{DefectSet, QualityState, Stage, UnitId};
use serde::{Deserialize, Serialize};

/// One evaluation of one unit at one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionRecord {
    /// Position in the run's record log, starting at 1.
    pub seq: u64,
    pub unit: UnitId,
    pub stage: Stage,
    /// Name of the sensor that produced the observation.
    pub sensor: String,
    /// Defects observed at this stage.
    pub defects: DefectSet,
    /// Stage verdict. Never `Pending`.
    pub verdict: QualityState,
    /// Sum of the catalog severity weights of `defects`.
    pub severity: u32,
    /// Approved with cosmetic defects.
    pub cosmetic: bool,
}

impl InspectionRecord {
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.verdict == QualityState::Approved
    }

    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.verdict == QualityState::Rejected
    }
}
