//! # Line Configuration Loading
//!
//! Reads a [`LineConfig`] from a TOML file and layers command-line overrides
//! on top of it.
//!
//! ```toml
//! seed = 42
//!
//! [detection]        # per-mille, 0..=1000
//! bubbles = 300
//! missing_piece = 10
//!
//! [tolerances]
//! bubble_tolerance = 1
//! ```
//!
//! Omitted keys keep their defaults. With no file, the defaults are used.

use crate::error::CliError;
use crate::files::{MAX_CONFIG_FILE_SIZE, read_validated};
use chocoline_core::LineConfig;
use std::path::Path;

/// Values given on the command line. `None` keeps the file's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub seed: Option<u64>,
    pub bubble_tolerance: Option<u32>,
    pub stain_tolerance: Option<u32>,
}

impl ConfigOverrides {
    /// Apply the overrides to `config`.
    pub fn apply(&self, config: &mut LineConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(tolerance) = self.bubble_tolerance {
            config.tolerances.bubble_tolerance = tolerance;
        }
        if let Some(tolerance) = self.stain_tolerance {
            config.tolerances.stain_tolerance = tolerance;
        }
    }
}

/// Parse a configuration document.
pub fn parse_config(text: &str) -> Result<LineConfig, CliError> {
    let config: LineConfig = toml::from_str(text).map_err(|e| CliError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Load the configuration from `path` (or defaults) and apply `overrides`.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<LineConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            tracing::debug!("Loading line config from {:?}", path);
            parse_config(&read_validated(path, MAX_CONFIG_FILE_SIZE)?)?
        }
        None => LineConfig::default(),
    };

    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}
