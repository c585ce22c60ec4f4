//! # Quality Sensors
//!
//! Sensors observe a unit at a stage and report the defects they see.
//!
//! ## Variants
//!
//! - [`VisualSensor`]: one independent draw per defect kind valid at the
//!   stage, each with its own per-mille probability.
//! - [`SamplingSensor`]: draws between zero and N kinds uniformly, with
//!   replacement, from the stage vocabulary.
//! - [`ScriptedSensor`]: reports fixed observations per stage.
//!
//! Randomized sensors are deterministic when constructed from a seed.

mod sampling;
mod scripted;
mod visual;

pub use sampling::SamplingSensor;
pub use scripted::ScriptedSensor;
pub use visual::VisualSensor;

use crate::{DefectSet, InspectableUnit, InspectionError, Stage};

/// The sensor capability.
///
/// # Contract
///
/// - `inspect` only observes: it never mutates the unit. Recording the
///   observation is the caller's job.
/// - The returned set only carries kinds valid at `stage` (see
///   [`catalog::valid_kinds`](crate::catalog::valid_kinds)). A sensor that
///   cannot honor this fails with `InspectionError::InvalidDefect`.
///
/// Sensors take `&mut self` so randomized variants can advance their
/// generator.
pub trait QualitySensor: Send {
    /// Short name recorded alongside each observation.
    fn name(&self) -> &str;

    /// Observe `unit` at `stage`.
    fn inspect(
        &mut self,
        unit: &InspectableUnit,
        stage: Stage,
    ) -> Result<DefectSet, InspectionError>;
}

impl<S: QualitySensor + ?Sized> QualitySensor for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn inspect(
        &mut self,
        unit: &InspectableUnit,
        stage: Stage,
    ) -> Result<DefectSet, InspectionError> {
        (**self).inspect(unit, stage)
    }
}
