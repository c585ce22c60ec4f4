//! Tests for report rendering and JSON output shapes.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use chocoline::render::{
    catalog_json, format_rate, render_catalog, render_history, render_report, render_unit,
    report_json, unit_json,
};
use chocoline_core::{
    BatchSummary, DefectKind, InspectableUnit, InspectionSystem, LineConfig, ScriptedSensor,
    Stage, run_unit,
};

/// A run with one clean unit and one unit rejected at packaging.
fn sample_run() -> (InspectionSystem, Vec<InspectableUnit>) {
    let mut system = InspectionSystem::new();
    system.register_sensor(
        Stage::Molding,
        ScriptedSensor::new().always(Stage::Molding, &[DefectKind::Stains]),
    );
    system.register_sensor(Stage::Packaging, ScriptedSensor::new());

    let mut good = InspectableUnit::new("LOTE-1").with_mold("heart");
    run_unit(&mut system, &mut good).unwrap();

    system.register_sensor(
        Stage::Packaging,
        ScriptedSensor::new().always(Stage::Packaging, &[DefectKind::DamagedPackaging]),
    );
    let mut bad = InspectableUnit::new("LOTE-2");
    run_unit(&mut system, &mut bad).unwrap();

    (system, vec![good, bad])
}

// =============================================================================
// TEXT REPORT TESTS
// =============================================================================

#[test]
fn test_report_text_lists_totals_and_defects() {
    let (system, _) = sample_run();
    let text = render_report(&system.generate_report());

    assert!(text.contains("Total inspections: 4"));
    assert!(text.contains("Approved:          3"));
    assert!(text.contains("Rejected:          1"));
    assert!(text.contains("Approval rate:     75.00%"));
    assert!(text.contains("  - stains: 2 occurrences"));
    assert!(text.contains("  - damaged_packaging: 1 occurrences"));
}

#[test]
fn test_history_lists_every_record() {
    let (system, _) = sample_run();
    let text = render_history(system.records());

    assert!(text.starts_with("INSPECTION HISTORY"));
    assert!(text.contains("1. Unit: LOTE-1 | Stage: molding | Result: approved (cosmetic)"));
    assert!(text.contains("4. Unit: LOTE-2 | Stage: packaging | Result: rejected"));
    assert!(text.contains("Defects: damaged_packaging (severity 5)"));
}

#[test]
fn test_history_empty() {
    assert_eq!(render_history(&[]), "No inspections recorded.\n");
}

#[test]
fn test_unit_rendering_shows_route() {
    let (_, units) = sample_run();
    let text = render_unit(&units[0]);

    assert!(text.starts_with("Unit LOTE-1 - overall: approved"));
    assert!(text.contains("Mold:      heart"));
    assert!(text.contains("molding    approved (defects: stains)"));
    assert!(text.contains("packaging  approved (defects: none)"));
}

#[test]
fn test_rate_formatting() {
    assert_eq!(format_rate(3333), "33.33%");
}

// =============================================================================
// JSON OUTPUT TESTS
// =============================================================================

#[test]
fn test_report_json_shape() {
    let (system, units) = sample_run();
    let summary = BatchSummary::from_units(&units);
    let json = report_json(&system.generate_report(), Some(&summary));

    assert_eq!(json["report"]["total_inspections"], 4);
    assert_eq!(json["report"]["per_stage"]["packaging"]["rejected"], 1);
    assert_eq!(json["report"]["defect_frequency"]["stains"], 2);
    assert_eq!(json["statistics"]["molding.approved"], 2);
    assert_eq!(json["statistics"]["approval_rate_bp"], 7500);
    assert_eq!(json["batch"]["rejected_at"]["packaging"], 1);
}

#[test]
fn test_report_json_without_batch() {
    let (system, _) = sample_run();
    let json = report_json(&system.generate_report(), None);
    assert!(json["batch"].is_null());
}

#[test]
fn test_unit_json_shape() {
    let (_, units) = sample_run();
    let json = unit_json(&units[1]);

    assert_eq!(json["id"], "LOTE-2");
    assert_eq!(json["state"], "rejected");
    assert_eq!(json["verdicts"][1]["stage"], "packaging");
    assert_eq!(json["verdicts"][1]["defects"][0], "damaged_packaging");
}

// =============================================================================
// CATALOG TESTS
// =============================================================================

#[test]
fn test_catalog_lists_stage_vocabularies() {
    let config = LineConfig::default();
    let text = render_catalog(&config);

    assert!(text.contains("Molding:"));
    assert!(text.contains("bubbles"));
    assert!(text.contains("detection 150/1000"));
    assert!(text.contains("detection 200/1000 | cosmetic"));

    let json = catalog_json(&config);
    assert_eq!(json["stages"][0]["stage"], "molding");
    assert_eq!(json["stages"][1]["defects"][1]["kind"], "missing_piece");
    assert_eq!(json["stages"][1]["defects"][1]["severity"], 6);
    assert_eq!(json["stages"][0]["defects"][3]["kind"], "stains");
    assert_eq!(json["stages"][0]["defects"][3]["cosmetic"], true);
    assert_eq!(json["stages"][1]["defects"][1]["cosmetic"], false);
    assert_eq!(json["tolerances"]["bubble_tolerance"], 0);
}
