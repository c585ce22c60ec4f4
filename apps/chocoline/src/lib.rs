//! # Chocoline
//!
//! The command-line collaborator of `chocoline-core`: it loads the line
//! configuration, feeds units into an inspection run and renders the report.

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod files;
pub mod render;

pub use error::CliError;
