//! Scripted sensor: reports a fixed observation per stage.

use super::QualitySensor;
use crate::catalog;
use crate::{DefectKind, DefectSet, InspectableUnit, InspectionError, Stage};
use std::collections::BTreeMap;

/// Reports the same observation every time a stage is inspected. Stages
/// without a script report nothing.
///
/// Scripts are validated when inspected, not when configured, so a script
/// carrying a kind invalid for its stage surfaces as `InvalidDefect` from
/// `inspect`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSensor {
    scripts: BTreeMap<Stage, DefectSet>,
}

impl ScriptedSensor {
    /// Create a sensor that reports nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Always report `kinds` at `stage`.
    #[must_use]
    pub fn always(mut self, stage: Stage, kinds: &[DefectKind]) -> Self {
        self.scripts.insert(stage, kinds.iter().copied().collect());
        self
    }
}

impl QualitySensor for ScriptedSensor {
    fn name(&self) -> &str {
        "scripted"
    }

    fn inspect(
        &mut self,
        _unit: &InspectableUnit,
        stage: Stage,
    ) -> Result<DefectSet, InspectionError> {
        let observed = self.scripts.get(&stage).cloned().unwrap_or_default();
        catalog::validate_set(&observed, stage)?;
        Ok(observed)
    }
}
