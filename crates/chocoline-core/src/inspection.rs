//! # Inspection System
//!
//! Orchestrates one inspection run:
//! - a registry of at most one sensor per stage
//! - the stage evaluator
//! - the ordered, append-only log of inspection records
//!
//! ## Processing
//!
//! `process(unit, stage)` looks up the stage's sensor, observes the unit,
//! evaluates the stage-scoped observation (not the unit's cumulative
//! defects), appends a record and updates the unit. Nothing is mutated when
//! any step fails.
//!
//! Re-processing a stage for the same unit is allowed: the unit's verdict
//! for that stage is overwritten and a new record is appended.
//!
//! ## Concurrency
//!
//! The system holds no locks. Callers sharing one across threads must wrap
//! it in their own mutex.

use crate::catalog;
use crate::config::LineConfig;
use crate::evaluator::StageEvaluator;
use crate::sensor::{QualitySensor, VisualSensor};
use crate::{
    InspectableUnit, InspectionError, InspectionRecord, QualityState, Report, Stage, UnitId,
};
use std::collections::BTreeMap;

/// The inspection run: sensors, evaluator and record log.
#[derive(Default)]
pub struct InspectionSystem {
    sensors: BTreeMap<Stage, Box<dyn QualitySensor>>,
    evaluator: StageEvaluator,
    records: Vec<InspectionRecord>,
}

impl std::fmt::Debug for InspectionSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sensors: BTreeMap<Stage, &str> = self
            .sensors
            .iter()
            .map(|(stage, sensor)| (*stage, sensor.name()))
            .collect();
        f.debug_struct("InspectionSystem")
            .field("sensors", &sensors)
            .field("evaluator", &self.evaluator)
            .field("records", &self.records.len())
            .finish()
    }
}

impl InspectionSystem {
    /// Create a system with no sensors and default tolerances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a system with no sensors and the given evaluator.
    #[must_use]
    pub fn with_evaluator(evaluator: StageEvaluator) -> Self {
        Self {
            evaluator,
            ..Self::default()
        }
    }

    /// Create a system with a visual sensor registered for every stage.
    ///
    /// With a seed, each stage's sensor is seeded with `seed + stage index`,
    /// so the whole run is reproducible.
    pub fn from_config(config: &LineConfig) -> Result<Self, InspectionError> {
        config.validate()?;

        let mut system = Self::with_evaluator(StageEvaluator::with_tolerances(config.tolerances));
        for (index, stage) in Stage::ALL.into_iter().enumerate() {
            let sensor = match config.seed {
                Some(seed) => {
                    VisualSensor::seeded(seed.wrapping_add(index as u64), config.detection)
                }
                None => VisualSensor::new(config.detection),
            };
            system.register_sensor(stage, sensor);
        }
        Ok(system)
    }

    // =========================================================================
    // SENSOR REGISTRY
    // =========================================================================

    /// Register `sensor` for `stage`, returning the sensor it replaces.
    pub fn register_sensor(
        &mut self,
        stage: Stage,
        sensor: impl QualitySensor + 'static,
    ) -> Option<Box<dyn QualitySensor>> {
        self.sensors.insert(stage, Box::new(sensor))
    }

    /// Remove the sensor registered for `stage`.
    pub fn unregister_sensor(&mut self, stage: Stage) -> Option<Box<dyn QualitySensor>> {
        self.sensors.remove(&stage)
    }

    /// Name of the sensor registered for `stage`.
    #[must_use]
    pub fn sensor_name(&self, stage: Stage) -> Option<&str> {
        self.sensors.get(&stage).map(|s| s.name())
    }

    /// Stages with a registered sensor, in line order.
    #[must_use]
    pub fn registered_stages(&self) -> Vec<Stage> {
        self.sensors.keys().copied().collect()
    }

    #[must_use]
    pub fn evaluator(&self) -> &StageEvaluator {
        &self.evaluator
    }

    // =========================================================================
    // PROCESSING
    // =========================================================================

    /// Inspect `unit` at `stage` and return the stage verdict.
    pub fn process(
        &mut self,
        unit: &mut InspectableUnit,
        stage: Stage,
    ) -> Result<QualityState, InspectionError> {
        let sensor = self
            .sensors
            .get_mut(&stage)
            .ok_or(InspectionError::NoSensorRegistered(stage))?;

        let observed = sensor.inspect(unit, stage)?;
        let sensor_name = sensor.name().to_string();
        let assessment = self.evaluator.assess(&observed, stage)?;

        let record = InspectionRecord {
            seq: (self.records.len() as u64).saturating_add(1),
            unit: unit.id().clone(),
            stage,
            sensor: sensor_name,
            severity: catalog::severity_of(&observed),
            defects: observed.clone(),
            verdict: assessment.state,
            cosmetic: assessment.cosmetic,
        };
        self.records.push(record);
        unit.record(stage, observed, assessment.state);

        Ok(assessment.state)
    }

    // =========================================================================
    // RECORDS & REPORTING
    // =========================================================================

    /// The record log, in processing order.
    #[must_use]
    pub fn records(&self) -> &[InspectionRecord] {
        &self.records
    }

    /// Records for one unit, in processing order.
    pub fn records_for<'a>(
        &'a self,
        unit: &'a UnitId,
    ) -> impl Iterator<Item = &'a InspectionRecord> + 'a {
        self.records.iter().filter(move |r| &r.unit == unit)
    }

    /// Aggregate the record log. Pure: repeated calls without intervening
    /// `process` calls return equal reports.
    #[must_use]
    pub fn generate_report(&self) -> Report {
        Report::from_records(&self.records)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DetectionProfile, Tolerances};
    use crate::sensor::ScriptedSensor;
    use crate::DefectKind;

    #[test]
    fn unregistered_stage_fails_without_side_effects() {
        let mut system = InspectionSystem::new();
        let mut unit = InspectableUnit::new("U1");

        let result = system.process(&mut unit, Stage::Molding);
        assert_eq!(result, Err(InspectionError::NoSensorRegistered(Stage::Molding)));
        assert!(system.records().is_empty());
        assert!(unit.verdicts().is_empty());
    }

    #[test]
    fn evaluation_uses_stage_scoped_observation() {
        let mut system = InspectionSystem::new();
        system.register_sensor(
            Stage::Molding,
            ScriptedSensor::new().always(Stage::Molding, &[DefectKind::Breakage]),
        );
        system.register_sensor(Stage::Packaging, ScriptedSensor::new());
        let mut unit = InspectableUnit::new("U1");

        assert_eq!(system.process(&mut unit, Stage::Molding), Ok(QualityState::Rejected));
        // Breakage from molding stays in the cumulative set but does not
        // reject packaging.
        assert_eq!(system.process(&mut unit, Stage::Packaging), Ok(QualityState::Approved));
        assert!(unit.defects().contains(&DefectKind::Breakage));
        assert_eq!(unit.state(), QualityState::Rejected);
    }

    #[test]
    fn registering_replaces_previous_sensor() {
        let mut system = InspectionSystem::new();
        assert!(system.register_sensor(Stage::Molding, ScriptedSensor::new()).is_none());

        let replaced = system.register_sensor(
            Stage::Molding,
            VisualSensor::seeded(1, DetectionProfile::default()),
        );
        assert_eq!(replaced.map(|s| s.name().to_string()), Some("scripted".to_string()));
        assert_eq!(system.sensor_name(Stage::Molding), Some("visual"));
    }

    #[test]
    fn unregistering_leaves_stage_uncovered() {
        let mut system = InspectionSystem::new();
        system.register_sensor(Stage::Molding, ScriptedSensor::new());
        system.register_sensor(Stage::Packaging, ScriptedSensor::new());

        assert!(system.unregister_sensor(Stage::Packaging).is_some());
        assert!(system.unregister_sensor(Stage::Packaging).is_none());
        assert_eq!(system.registered_stages(), vec![Stage::Molding]);

        let mut unit = InspectableUnit::new("U1");
        assert_eq!(
            system.process(&mut unit, Stage::Packaging),
            Err(InspectionError::NoSensorRegistered(Stage::Packaging))
        );
    }

    #[test]
    fn records_are_sequenced() {
        let mut system = InspectionSystem::new();
        system.register_sensor(Stage::Molding, ScriptedSensor::new());
        let mut unit = InspectableUnit::new("U1");

        system.process(&mut unit, Stage::Molding).expect("process");
        system.process(&mut unit, Stage::Molding).expect("process");

        let seqs: Vec<u64> = system.records().iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
        assert_eq!(system.records_for(unit.id()).count(), 2);
        assert_eq!(unit.verdicts().len(), 1);
    }

    #[test]
    fn from_config_registers_every_stage() {
        let config = LineConfig {
            seed: Some(42),
            tolerances: Tolerances {
                bubble_tolerance: 1,
                ..Tolerances::default()
            },
            ..LineConfig::default()
        };
        let system = InspectionSystem::from_config(&config).expect("config");

        assert_eq!(system.registered_stages(), Stage::ALL.to_vec());
        assert_eq!(system.evaluator().tolerances().bubble_tolerance, 1);
    }

    fn seeded_batch(seed: u64) -> Vec<InspectionRecord> {
        let config = LineConfig {
            seed: Some(seed),
            detection: DetectionProfile::uniform(400),
            ..LineConfig::default()
        };
        let mut system = InspectionSystem::from_config(&config).expect("config");
        crate::simulate_batch(&mut system, &crate::BatchSpec::new("LOT", 50)).expect("batch");
        system.records().to_vec()
    }

    #[test]
    fn from_config_with_seed_is_reproducible() {
        let first = seeded_batch(42);
        assert!(!first.is_empty());
        assert!(first.iter().any(|r| !r.defects.is_empty()));
        assert_eq!(first, seeded_batch(42));
        assert_ne!(first, seeded_batch(43));
    }

    #[test]
    fn from_config_rejects_invalid_probability() {
        let config = LineConfig {
            detection: DetectionProfile::uniform(2000),
            ..LineConfig::default()
        };
        assert!(matches!(
            InspectionSystem::from_config(&config),
            Err(InspectionError::InvalidConfig(_))
        ));
    }
}
