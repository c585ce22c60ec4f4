//! # Production Line Driver
//!
//! Feeds units through an [`InspectionSystem`] along their routes.
//!
//! A unit moves stage by stage and leaves the line at its first rejection;
//! later stages are never inspected for it.

use crate::primitives::MAX_BATCH_SIZE;
use crate::{InspectableUnit, InspectionError, InspectionSystem, QualityState, Stage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Run `unit` along its remaining route. Returns the unit's overall state.
///
/// A unit that is already rejected is returned untouched.
pub fn run_unit(
    system: &mut InspectionSystem,
    unit: &mut InspectableUnit,
) -> Result<QualityState, InspectionError> {
    while unit.state() != QualityState::Rejected {
        let Some(stage) = unit.next_stage() else {
            break;
        };
        system.process(unit, stage)?;
    }
    Ok(unit.state())
}

/// Description of a batch of identical units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSpec {
    /// Units are named `<prefix>-<n>`, `n` starting at 1.
    pub prefix: String,
    pub count: usize,
    pub mold: Option<String>,
    pub packaging: Option<String>,
    pub route: Vec<Stage>,
}

impl BatchSpec {
    /// A batch of `count` units routed through every stage.
    #[must_use]
    pub fn new(prefix: impl Into<String>, count: usize) -> Self {
        Self {
            prefix: prefix.into(),
            count,
            mold: None,
            packaging: None,
            route: Stage::ALL.to_vec(),
        }
    }

    #[must_use]
    pub fn with_mold(mut self, mold: impl Into<String>) -> Self {
        self.mold = Some(mold.into());
        self
    }

    #[must_use]
    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Self {
        self.packaging = Some(packaging.into());
        self
    }

    #[must_use]
    pub fn with_route(mut self, route: &[Stage]) -> Self {
        self.route = route.to_vec();
        self
    }

    fn unit(&self, n: usize) -> InspectableUnit {
        let mut unit =
            InspectableUnit::new(format!("{}-{}", self.prefix, n)).with_route(&self.route);
        if let Some(mold) = &self.mold {
            unit = unit.with_mold(mold.clone());
        }
        if let Some(packaging) = &self.packaging {
            unit = unit.with_packaging(packaging.clone());
        }
        unit
    }
}

/// Create and run every unit of `spec`, in order.
pub fn simulate_batch(
    system: &mut InspectionSystem,
    spec: &BatchSpec,
) -> Result<Vec<InspectableUnit>, InspectionError> {
    if spec.count > MAX_BATCH_SIZE {
        return Err(InspectionError::InvalidConfig(format!(
            "batch size {} exceeds maximum allowed {}",
            spec.count, MAX_BATCH_SIZE
        )));
    }
    if spec.route.is_empty() {
        return Err(InspectionError::InvalidConfig(
            "batch route has no stages".to_string(),
        ));
    }

    let mut units = Vec::with_capacity(spec.count);
    for n in 1..=spec.count {
        let mut unit = spec.unit(n);
        run_unit(system, &mut unit)?;
        units.push(unit);
    }
    Ok(units)
}

/// Unit-level outcome of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub units: usize,
    pub approved: usize,
    pub rejected: usize,
    pub pending: usize,
    /// Stage at which each rejected unit left the line.
    pub rejected_at: BTreeMap<Stage, usize>,
}

impl BatchSummary {
    #[must_use]
    pub fn from_units(units: &[InspectableUnit]) -> Self {
        let mut summary = Self {
            units: units.len(),
            ..Self::default()
        };

        for unit in units {
            match unit.state() {
                QualityState::Approved => summary.approved = summary.approved.saturating_add(1),
                QualityState::Pending => summary.pending = summary.pending.saturating_add(1),
                QualityState::Rejected => {
                    summary.rejected = summary.rejected.saturating_add(1);
                    if let Some(stage) = unit.rejected_at() {
                        let count = summary.rejected_at.entry(stage).or_insert(0);
                        *count = count.saturating_add(1);
                    }
                }
            }
        }
        summary
    }
}

// =============================================================================
// TESTS
// =============================================================================
