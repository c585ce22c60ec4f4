//! Sampling sensor: picks a random number of defects from the stage
//! vocabulary.

use super::QualitySensor;
use crate::catalog;
use crate::primitives::MAX_SAMPLED_DEFECTS;
use crate::{DefectSet, InspectableUnit, InspectionError, Stage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws `k` kinds uniformly with replacement, where `k` is itself uniform in
/// `0..=max_picks(stage)`. Repeated picks collapse, so fewer than `k` kinds
/// may be reported.
///
/// Default maxima: two picks at molding, one at packaging.
#[derive(Debug, Clone)]
pub struct SamplingSensor {
    molding_picks: usize,
    packaging_picks: usize,
    rng: StdRng,
}

impl SamplingSensor {
    /// Create a sensor seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Create a reproducible sensor.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            molding_picks: 2,
            packaging_picks: 1,
            rng,
        }
    }

    /// Override the maximum number of picks for `stage`, capped at
    /// `MAX_SAMPLED_DEFECTS`.
    #[must_use]
    pub fn with_max_picks(mut self, stage: Stage, picks: usize) -> Self {
        let picks = picks.min(MAX_SAMPLED_DEFECTS);
        match stage {
            Stage::Molding => self.molding_picks = picks,
            Stage::Packaging => self.packaging_picks = picks,
        }
        self
    }

    /// Maximum number of picks at `stage`.
    #[must_use]
    pub fn max_picks(&self, stage: Stage) -> usize {
        match stage {
            Stage::Molding => self.molding_picks,
            Stage::Packaging => self.packaging_picks,
        }
    }
}

impl Default for SamplingSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl QualitySensor for SamplingSensor {
    fn name(&self) -> &str {
        "sampling"
    }

    fn inspect(
        &mut self,
        _unit: &InspectableUnit,
        stage: Stage,
    ) -> Result<DefectSet, InspectionError> {
        let vocabulary = catalog::valid_kinds(stage);
        let max_picks = self.max_picks(stage);
        let picks = self.rng.random_range(0..=max_picks);

        let mut observed = DefectSet::new();
        for _ in 0..picks {
            let index = self.rng.random_range(0..vocabulary.len());
            if let Some(kind) = vocabulary.get(index) {
                observed.insert(*kind);
            }
        }
        Ok(observed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_max_picks() {
        let mut sensor = SamplingSensor::seeded(3);
        let unit = InspectableUnit::new("U1");
        for _ in 0..200 {
            let molding = sensor.inspect(&unit, Stage::Molding).expect("inspect");
            assert!(molding.len() <= 2);
            let packaging = sensor.inspect(&unit, Stage::Packaging).expect("inspect");
            assert!(packaging.len() <= 1);
        }
    }

    #[test]
    fn same_seed_same_observations() {
        let unit = InspectableUnit::new("U1");
        let mut first = SamplingSensor::seeded(11);
        let mut second = SamplingSensor::seeded(11);
        for stage in Stage::ALL.into_iter().cycle().take(50) {
            assert_eq!(
                first.inspect(&unit, stage).expect("inspect"),
                second.inspect(&unit, stage).expect("inspect")
            );
        }
    }

    #[test]
    fn zero_picks_reports_nothing() {
        let mut sensor = SamplingSensor::seeded(3).with_max_picks(Stage::Molding, 0);
        let unit = InspectableUnit::new("U1");
        for _ in 0..20 {
            assert!(sensor.inspect(&unit, Stage::Molding).expect("inspect").is_empty());
        }
    }

    #[test]
    fn picks_are_capped() {
        let sensor = SamplingSensor::seeded(3).with_max_picks(Stage::Packaging, 1000);
        assert_eq!(sensor.max_picks(Stage::Packaging), MAX_SAMPLED_DEFECTS);
    }
}
