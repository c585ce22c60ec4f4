//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::error::CliError;
use crate::feed::{parse_feed, run_feed};
use crate::files::{MAX_FEED_FILE_SIZE, read_validated};
use crate::render;
use chocoline_core::{
    BatchSpec, BatchSummary, InspectableUnit, InspectionError, InspectionRecord, InspectionSystem,
    LineConfig, QualityState, Stage, run_unit, simulate_batch,
};
use std::path::Path;

/// Parse stage identifiers; an empty list means every stage.
pub fn parse_stages(stages: &[String]) -> Result<Vec<Stage>, CliError> {
    if stages.is_empty() {
        return Ok(Stage::ALL.to_vec());
    }
    stages
        .iter()
        .map(|s| s.parse::<Stage>().map_err(CliError::from))
        .collect()
}

/// Log one event per record: rejections at warn, cosmetic approvals at info,
/// clean approvals at debug.
fn log_records(records: &[InspectionRecord]) {
    for record in records {
        if record.is_rejected() {
            tracing::warn!(
                unit = %record.unit,
                stage = %record.stage,
                defects = ?record.defects,
                severity = record.severity,
                "Rejected"
            );
        } else if record.cosmetic {
            tracing::info!(
                unit = %record.unit,
                stage = %record.stage,
                defects = ?record.defects,
                "Approved with cosmetic defects"
            );
        } else {
            tracing::debug!(unit = %record.unit, stage = %record.stage, "Approved");
        }
    }
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// INSPECT COMMAND
// =============================================================================

/// Inspect one unit along its route.
pub fn cmd_inspect(
    config: &LineConfig,
    json_mode: bool,
    id: &str,
    stages: &[String],
    mold: &str,
    packaging: &str,
) -> Result<(), CliError> {
    let route = parse_stages(stages)?;
    let mut system = InspectionSystem::from_config(config)?;
    let mut unit = InspectableUnit::new(id)
        .with_mold(mold)
        .with_packaging(packaging)
        .with_route(&route);

    let state = run_unit(&mut system, &mut unit)?;
    log_records(system.records());

    if json_mode {
        print_json(&render::unit_json(&unit));
        return Ok(());
    }

    print!("{}", render::render_unit(&unit));
    match state {
        QualityState::Approved => println!("Final product APPROVED"),
        QualityState::Rejected => match unit.rejected_at() {
            Some(stage) => println!("Product rejected at {}", stage),
            None => println!("Product rejected"),
        },
        QualityState::Pending => println!("Product pending"),
    }
    Ok(())
}

// =============================================================================
// SIMULATE COMMAND
// =============================================================================

/// Produce and inspect a batch of units.
pub fn cmd_simulate(
    config: &LineConfig,
    json_mode: bool,
    count: usize,
    prefix: &str,
    stages: &[String],
    history: bool,
) -> Result<(), CliError> {
    if count == 0 {
        return Err(
            InspectionError::InvalidConfig("batch size must be greater than 0".to_string()).into(),
        );
    }

    let route = parse_stages(stages)?;
    let spec = BatchSpec::new(prefix, count)
        .with_mold("heart")
        .with_packaging("gift_box")
        .with_route(&route);

    tracing::info!(count, prefix, seed = ?config.seed, "Simulating batch");

    let mut system = InspectionSystem::from_config(config)?;
    let units = simulate_batch(&mut system, &spec)?;
    log_records(system.records());

    let summary = BatchSummary::from_units(&units);
    let report = system.generate_report();

    if json_mode {
        let mut output = render::report_json(&report, Some(&summary));
        if history {
            output["history"] = serde_json::to_value(system.records())
                .map_err(|e| CliError::Io(e.to_string()))?;
        }
        print_json(&output);
        return Ok(());
    }

    print!("{}", render::render_batch(&summary));
    println!();
    print!("{}", render::render_report(&report));
    if history {
        println!();
        print!("{}", render::render_history(system.records()));
    }
    Ok(())
}

// =============================================================================
// FEED COMMAND
// =============================================================================

/// Process a JSON feed of (unit, stage) pairs.
pub fn cmd_feed(
    config: &LineConfig,
    json_mode: bool,
    file: &Path,
    history: bool,
) -> Result<(), CliError> {
    tracing::info!("Processing feed {:?}", file);

    let feed = parse_feed(&read_validated(file, MAX_FEED_FILE_SIZE)?)?;
    let step_count = feed.steps.len();

    let mut system = InspectionSystem::from_config(config)?;
    let units = run_feed(&mut system, feed)?;
    log_records(system.records());

    tracing::info!(units = units.len(), steps = step_count, "Feed processed");

    let summary = BatchSummary::from_units(&units);
    let report = system.generate_report();

    if json_mode {
        let mut output = render::report_json(&report, Some(&summary));
        output["units"] = serde_json::Value::Array(units.iter().map(render::unit_json).collect());
        if history {
            output["history"] = serde_json::to_value(system.records())
                .map_err(|e| CliError::Io(e.to_string()))?;
        }
        print_json(&output);
        return Ok(());
    }

    for unit in &units {
        print!("{}", render::render_unit(unit));
    }
    println!();
    print!("{}", render::render_report(&report));
    if history {
        println!();
        print!("{}", render::render_history(system.records()));
    }
    Ok(())
}

// =============================================================================
// CATALOG COMMAND
// =============================================================================

/// Show the defect catalog and detection settings.
pub fn cmd_catalog(config: &LineConfig, json_mode: bool) -> Result<(), CliError> {
    if json_mode {
        print_json(&render::catalog_json(config));
    } else {
        print!("{}", render::render_catalog(config));
    }
    Ok(())
}
