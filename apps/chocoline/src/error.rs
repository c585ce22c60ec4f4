//! # Application Errors
//!
//! Errors raised by the binary: everything the core reports, plus the I/O
//! and parsing failures of configuration and feed files.

use chocoline_core::InspectionError;
use thiserror::Error;

/// Errors that can occur while running a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The inspection engine rejected an operation.
    #[error(transparent)]
    Inspection(#[from] InspectionError),

    /// A file could not be read or validated.
    #[error("I/O error: {0}")]
    Io(String),

    /// The line configuration file is malformed.
    #[error("Config error: {0}")]
    Config(String),

    /// The unit feed file is malformed.
    #[error("Feed error: {0}")]
    Feed(String),
}
