//! Tests for line configuration loading and feed files.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use chocoline::CliError;
use chocoline::config::{ConfigOverrides, load_config, parse_config};
use chocoline::feed::{FeedEntry, build_feed, parse_feed, run_feed};
use chocoline_core::{
    DefectKind, InspectionError, InspectionSystem, LineConfig, QualityState, ScriptedSensor, Stage,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// =============================================================================
// CONFIG TESTS
// =============================================================================

#[test]
fn test_partial_config_keeps_defaults() {
    let config = parse_config(
        r#"
seed = 42

[detection]
bubbles = 300

[tolerances]
bubble_tolerance = 1
"#,
    )
    .unwrap();

    assert_eq!(config.seed, Some(42));
    assert_eq!(config.detection.probability(DefectKind::Bubbles), 300);
    assert_eq!(
        config.detection.probability(DefectKind::Stains),
        LineConfig::default().detection.stains
    );
    assert_eq!(config.tolerances.bubble_tolerance, 1);
    assert_eq!(config.tolerances.stain_tolerance, 0);
}

#[test]
fn test_empty_config_is_default() {
    assert_eq!(parse_config("").unwrap(), LineConfig::default());
}

#[test]
fn test_out_of_range_probability_rejected() {
    let result = parse_config("[detection]\nstains = 1500\n");
    assert!(matches!(
        result,
        Err(CliError::Inspection(InspectionError::InvalidConfig(_)))
    ));
}

#[test]
fn test_malformed_config_rejected() {
    let result = parse_config("seed = \"forty-two\"");
    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn test_load_config_from_file_with_overrides() {
    let file = write_temp("seed = 1\n[tolerances]\nstain_tolerance = 2\n");
    let overrides = ConfigOverrides {
        seed: Some(99),
        bubble_tolerance: Some(3),
        stain_tolerance: None,
    };

    let config = load_config(Some(file.path()), &overrides).unwrap();
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.tolerances.bubble_tolerance, 3);
    assert_eq!(config.tolerances.stain_tolerance, 2);
}

#[test]
fn test_load_config_without_file() {
    let config = load_config(None, &ConfigOverrides::default()).unwrap();
    assert_eq!(config, LineConfig::default());
}

#[test]
fn test_load_missing_config_file_fails() {
    let result = load_config(
        Some(std::path::Path::new("/nonexistent/line.toml")),
        &ConfigOverrides::default(),
    );
    assert!(matches!(result, Err(CliError::Io(_))));
}

// =============================================================================
// FEED TESTS
// =============================================================================

fn entry(unit: &str, stage: &str) -> FeedEntry {
    FeedEntry {
        unit: unit.to_string(),
        stage: stage.to_string(),
        mold: None,
        packaging: None,
    }
}

#[test]
fn test_feed_derives_routes_in_first_seen_order() {
    let feed = parse_feed(
        r#"[
            {"unit": "B", "stage": "molding", "mold": "bar"},
            {"unit": "A", "stage": "molding"},
            {"unit": "B", "stage": "packaging", "packaging": "box"}
        ]"#,
    )
    .unwrap();

    let ids: Vec<&str> = feed.units.iter().map(|u| u.id().as_str()).collect();
    assert_eq!(ids, vec!["B", "A"]);
    assert_eq!(feed.units[0].route(), &[Stage::Molding, Stage::Packaging]);
    assert_eq!(feed.units[0].mold(), Some("bar"));
    assert_eq!(feed.units[0].packaging(), Some("box"));
    assert_eq!(feed.units[1].route(), &[Stage::Molding]);
    assert_eq!(feed.steps.len(), 3);
}

#[test]
fn test_feed_unknown_stage_fails() {
    let result = build_feed(vec![entry("A", "tempering")]);
    assert!(matches!(
        result,
        Err(CliError::Inspection(InspectionError::InvalidStage(s))) if s == "tempering"
    ));
}

#[test]
fn test_feed_empty_unit_fails() {
    let result = build_feed(vec![entry("  ", "molding")]);
    assert!(matches!(result, Err(CliError::Feed(_))));
}

#[test]
fn test_feed_malformed_json_fails() {
    assert!(matches!(parse_feed("{not json"), Err(CliError::Feed(_))));
}

#[test]
fn test_run_feed_processes_steps_in_order() {
    let mut system = InspectionSystem::new();
    system.register_sensor(
        Stage::Molding,
        ScriptedSensor::new().always(Stage::Molding, &[DefectKind::Breakage]),
    );
    system.register_sensor(Stage::Packaging, ScriptedSensor::new());

    let feed = build_feed(vec![entry("A", "packaging"), entry("A", "molding")]).unwrap();
    let units = run_feed(&mut system, feed).unwrap();

    let stages: Vec<Stage> = system.records().iter().map(|r| r.stage).collect();
    assert_eq!(stages, vec![Stage::Packaging, Stage::Molding]);
    assert_eq!(units[0].state(), QualityState::Rejected);
}

#[test]
fn test_run_feed_without_sensor_fails() {
    let mut system = InspectionSystem::new();
    let feed = build_feed(vec![entry("A", "molding")]).unwrap();

    let result = run_feed(&mut system, feed);
    assert!(matches!(
        result,
        Err(CliError::Inspection(InspectionError::NoSensorRegistered(Stage::Molding)))
    ));
}
