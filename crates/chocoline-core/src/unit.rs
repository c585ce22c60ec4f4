//! # Inspectable Unit
//!
//! One chocolate item moving through the line.
//!
//! A unit is constructed by the caller with its identifier, optional
//! descriptors and route. After construction it is read-only to everything
//! except the [`InspectionSystem`](crate::InspectionSystem), which records
//! observations and verdicts on it while processing.

use crate::{DefectSet, QualityState, Stage, UnitId};
use serde::{Deserialize, Serialize};

/// Outcome of one stage for one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageVerdict {
    pub stage: Stage,
    /// Defects observed at this stage only.
    pub defects: DefectSet,
    pub state: QualityState,
}

/// A chocolate unit with its accumulated inspection state.
///
/// Serializes for output only; state is built by processing, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectableUnit {
    id: UnitId,
    mold: Option<String>,
    packaging: Option<String>,
    route: Vec<Stage>,
    defects: DefectSet,
    state: QualityState,
    verdicts: Vec<StageVerdict>,
}

impl InspectableUnit {
    /// Create a pending unit routed through every stage of the line.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: UnitId::new(id),
            mold: None,
            packaging: None,
            route: Stage::ALL.to_vec(),
            defects: DefectSet::new(),
            state: QualityState::Pending,
            verdicts: Vec::new(),
        }
    }

    /// Set the mold shape the unit was cast in.
    #[must_use]
    pub fn with_mold(mut self, mold: impl Into<String>) -> Self {
        self.mold = Some(mold.into());
        self
    }

    /// Set the packaging the unit is wrapped in.
    #[must_use]
    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Self {
        self.packaging = Some(packaging.into());
        self
    }

    /// Restrict the stages the unit must pass. Stages are deduplicated and
    /// kept in line order.
    #[must_use]
    pub fn with_route(mut self, stages: &[Stage]) -> Self {
        let mut route = stages.to_vec();
        route.sort();
        route.dedup();
        self.route = route;
        self
    }

    #[must_use]
    pub fn id(&self) -> &UnitId {
        &self.id
    }

    #[must_use]
    pub fn mold(&self) -> Option<&str> {
        self.mold.as_deref()
    }

    #[must_use]
    pub fn packaging(&self) -> Option<&str> {
        self.packaging.as_deref()
    }

    /// Stages the unit must pass, in line order.
    #[must_use]
    pub fn route(&self) -> &[Stage] {
        &self.route
    }

    /// Every defect observed so far, across all stages.
    #[must_use]
    pub fn defects(&self) -> &DefectSet {
        &self.defects
    }

    /// Overall state: the worst verdict seen, or pending while route stages
    /// remain unprocessed.
    #[must_use]
    pub fn state(&self) -> QualityState {
        self.state
    }

    /// Per-stage verdicts, in the order stages were first processed.
    #[must_use]
    pub fn verdicts(&self) -> &[StageVerdict] {
        &self.verdicts
    }

    /// Verdict recorded for `stage`, if processed.
    #[must_use]
    pub fn verdict_at(&self, stage: Stage) -> Option<&StageVerdict> {
        self.verdicts.iter().find(|v| v.stage == stage)
    }

    /// First stage, in processing order, whose verdict rejected the unit.
    #[must_use]
    pub fn rejected_at(&self) -> Option<Stage> {
        self.verdicts
            .iter()
            .find(|v| v.state == QualityState::Rejected)
            .map(|v| v.stage)
    }

    /// Next route stage without a verdict, if any.
    #[must_use]
    pub fn next_stage(&self) -> Option<Stage> {
        self.route
            .iter()
            .copied()
            .find(|stage| self.verdict_at(*stage).is_none())
    }

    /// Record a stage outcome. Re-processing a stage overwrites its entry.
    pub(crate) fn record(&mut self, stage: Stage, observed: DefectSet, state: QualityState) {
        self.defects.extend(observed.iter().copied());

        let verdict = StageVerdict {
            stage,
            defects: observed,
            state,
        };
        match self.verdicts.iter_mut().find(|v| v.stage == stage) {
            Some(existing) => *existing = verdict,
            None => self.verdicts.push(verdict),
        }

        self.state = self.overall_state();
    }

    fn overall_state(&self) -> QualityState {
        if self
            .verdicts
            .iter()
            .any(|v| v.state == QualityState::Rejected)
        {
            return QualityState::Rejected;
        }

        let route_complete = self.route.iter().all(|stage| {
            self.verdict_at(*stage)
                .is_some_and(|v| v.state == QualityState::Approved)
        });
        if route_complete {
            QualityState::Approved
        } else {
            QualityState::Pending
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
