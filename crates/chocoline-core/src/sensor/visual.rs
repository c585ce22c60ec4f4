//! Visual sensor with an independent detection draw per defect kind.

use super::QualitySensor;
use crate::catalog;
use crate::config::DetectionProfile;
use crate::primitives::PER_MILLE;
use crate::{DefectSet, InspectableUnit, InspectionError, Stage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Simulated camera inspection.
///
/// For every kind valid at the stage, the sensor draws once and reports the
/// kind with the profile's per-mille probability. Exactly one draw is made per
/// valid kind, so two sensors with the same seed and profile produce the same
/// observation sequence.
#[derive(Debug, Clone)]
pub struct VisualSensor {
    profile: DetectionProfile,
    rng: StdRng,
}

impl VisualSensor {
    /// Create a sensor seeded from OS entropy.
    #[must_use]
    pub fn new(profile: DetectionProfile) -> Self {
        Self {
            profile,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible sensor.
    #[must_use]
    pub fn seeded(seed: u64, profile: DetectionProfile) -> Self {
        Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl QualitySensor for VisualSensor {
    fn name(&self) -> &str {
        "visual"
    }

    fn inspect(
        &mut self,
        _unit: &InspectableUnit,
        stage: Stage,
    ) -> Result<DefectSet, InspectionError> {
        let mut observed = DefectSet::new();
        for kind in catalog::valid_kinds(stage) {
            let roll: u16 = self.rng.random_range(0..PER_MILLE);
            if roll < self.profile.probability(*kind) {
                observed.insert(*kind);
            }
        }
        Ok(observed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observations(sensor: &mut VisualSensor, stage: Stage, n: usize) -> Vec<DefectSet> {
        let unit = InspectableUnit::new("U1");
        (0..n)
            .map(|_| sensor.inspect(&unit, stage).expect("inspect"))
            .collect()
    }

    #[test]
    fn same_seed_same_observations() {
        let mut a = VisualSensor::seeded(42, DetectionProfile::default());
        let mut b = VisualSensor::seeded(42, DetectionProfile::default());
        assert_eq!(
            observations(&mut a, Stage::Molding, 50),
            observations(&mut b, Stage::Molding, 50)
        );
    }

    #[test]
    fn certain_detection_reports_every_valid_kind() {
        let mut sensor = VisualSensor::seeded(7, DetectionProfile::uniform(PER_MILLE));
        for stage in Stage::ALL {
            let observed = observations(&mut sensor, stage, 1).remove(0);
            let expected: DefectSet = catalog::valid_kinds(stage).iter().copied().collect();
            assert_eq!(observed, expected);
        }
    }

    #[test]
    fn zero_probability_reports_nothing() {
        let mut sensor = VisualSensor::seeded(7, DetectionProfile::uniform(0));
        for observed in observations(&mut sensor, Stage::Packaging, 20) {
            assert!(observed.is_empty());
        }
    }
}
