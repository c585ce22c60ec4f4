//! # System Module
//!
//! Process stages of the production line.
//!
//! Stages are the axis every other component is keyed on: the catalog maps
//! stages to valid defects, the inspection system maps stages to sensors and
//! the report tallies verdicts per stage.

mod stage;

pub use stage::*;
