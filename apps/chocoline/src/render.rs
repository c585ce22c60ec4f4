//! # Report Rendering
//!
//! Text and JSON presentation of reports, inspection history, units and the
//! defect catalog. Rendering never touches the inspection engine's state.

use chocoline_core::{
    BatchSummary, DefectSet, InspectableUnit, InspectionRecord, LineConfig, Report, Stage,
    catalog, primitives::BASIS_POINTS,
};
use serde_json::json;

const RULE_WIDTH: usize = 50;

/// Format a basis-point rate as a percentage with two decimals.
pub fn format_rate(bp: u64) -> String {
    let whole = bp / (BASIS_POINTS / 100);
    let fraction = bp % (BASIS_POINTS / 100);
    format!("{}.{:02}%", whole, fraction)
}

fn format_defects(defects: &DefectSet) -> String {
    if defects.is_empty() {
        return "none".to_string();
    }
    defects
        .iter()
        .map(|k| k.id())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// REPORT
// =============================================================================

/// Render the quality report as text.
pub fn render_report(report: &Report) -> String {
    if report.is_empty() {
        return "No inspection data to report.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("QUALITY CONTROL REPORT\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("Total inspections: {}\n", report.total_inspections));
    out.push_str(&format!("Units inspected:   {}\n", report.units_inspected));
    out.push_str(&format!("Approved:          {}\n", report.overall.approved));
    out.push_str(&format!("Rejected:          {}\n", report.overall.rejected));
    out.push_str(&format!("Cosmetic flags:    {}\n", report.overall.cosmetic));
    out.push_str(&format!(
        "Approval rate:     {}\n",
        format_rate(report.approval_rate_bp)
    ));
    out.push_str(&format!("Total severity:    {}\n", report.total_severity));

    out.push_str("\nBy stage:\n");
    for (stage, tally) in &report.per_stage {
        out.push_str(&format!(
            "  - {:<10} approved {:>5} | rejected {:>5} | pending {:>5}\n",
            stage.id(),
            tally.approved,
            tally.rejected,
            tally.pending
        ));
    }

    out.push_str("\nDefects:\n");
    if report.defect_frequency.is_empty() {
        out.push_str("  No defects detected\n");
    } else {
        for (kind, count) in &report.defect_frequency {
            out.push_str(&format!("  - {}: {} occurrences\n", kind, count));
        }
    }
    out
}

/// Render the report as JSON, with the batch summary when one exists.
pub fn report_json(report: &Report, summary: Option<&BatchSummary>) -> serde_json::Value {
    json!({
        "report": report,
        "statistics": report.statistics(),
        "batch": summary,
    })
}

// =============================================================================
// HISTORY
// =============================================================================

/// Render the inspection history, one block per record.
pub fn render_history(records: &[InspectionRecord]) -> String {
    if records.is_empty() {
        return "No inspections recorded.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("INSPECTION HISTORY\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');

    for record in records {
        out.push_str(&format!(
            "{}. Unit: {} | Stage: {} | Result: {}{}\n",
            record.seq,
            record.unit,
            record.stage,
            record.verdict,
            if record.cosmetic { " (cosmetic)" } else { "" }
        ));
        if !record.defects.is_empty() {
            out.push_str(&format!(
                "   Defects: {} (severity {})\n",
                format_defects(&record.defects),
                record.severity
            ));
        }
        out.push_str(&format!("   Sensor: {}\n", record.sensor));
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');
    }
    out
}

// =============================================================================
// UNIT
// =============================================================================

/// Render one unit's verdicts.
pub fn render_unit(unit: &InspectableUnit) -> String {
    let mut out = format!("Unit {} - overall: {}\n", unit.id(), unit.state());
    if let Some(mold) = unit.mold() {
        out.push_str(&format!("  Mold:      {}\n", mold));
    }
    if let Some(packaging) = unit.packaging() {
        out.push_str(&format!("  Packaging: {}\n", packaging));
    }
    for stage in unit.route() {
        match unit.verdict_at(*stage) {
            Some(verdict) => out.push_str(&format!(
                "  {:<10} {} (defects: {})\n",
                stage.id(),
                verdict.state,
                format_defects(&verdict.defects)
            )),
            None => out.push_str(&format!("  {:<10} not inspected\n", stage.id())),
        }
    }
    out
}

/// JSON view of a unit.
pub fn unit_json(unit: &InspectableUnit) -> serde_json::Value {
    json!({
        "id": unit.id(),
        "state": unit.state(),
        "mold": unit.mold(),
        "packaging": unit.packaging(),
        "defects": unit.defects(),
        "verdicts": unit.verdicts(),
    })
}

/// Render the batch summary.
pub fn render_batch(summary: &BatchSummary) -> String {
    let mut out = format!(
        "Batch: {} units | approved {} | rejected {} | pending {}\n",
        summary.units, summary.approved, summary.rejected, summary.pending
    );
    for (stage, count) in &summary.rejected_at {
        out.push_str(&format!("  Rejected at {}: {}\n", stage, count));
    }
    out
}

// =============================================================================
// CATALOG
// =============================================================================

/// Render the defect catalog with severities and configured detection rates.
pub fn render_catalog(config: &LineConfig) -> String {
    let mut out = String::new();
    out.push_str("DEFECT CATALOG\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    for stage in Stage::ALL {
        out.push_str(&format!("{}:\n", stage.name()));
        for kind in catalog::valid_kinds(stage) {
            out.push_str(&format!(
                "  - {:<18} severity {} | detection {}/1000{}\n",
                kind.id(),
                catalog::severity(*kind),
                config.detection.probability(*kind),
                if kind.is_cosmetic() { " | cosmetic" } else { "" }
            ));
        }
    }
    out.push_str(&format!(
        "\nTolerances: bubbles {} | stains {}\n",
        config.tolerances.bubble_tolerance, config.tolerances.stain_tolerance
    ));
    out
}

/// JSON view of the catalog.
pub fn catalog_json(config: &LineConfig) -> serde_json::Value {
    let stages: Vec<serde_json::Value> = Stage::ALL
        .into_iter()
        .map(|stage| {
            let defects: Vec<serde_json::Value> = catalog::valid_kinds(stage)
                .iter()
                .map(|kind| {
                    json!({
                        "kind": kind,
                        "severity": catalog::severity(*kind),
                        "detection_per_mille": config.detection.probability(*kind),
                        "cosmetic": kind.is_cosmetic(),
                    })
                })
                .collect();
            json!({ "stage": stage, "defects": defects })
        })
        .collect();
    json!({ "stages": stages, "tolerances": config.tolerances })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_formatting() {
        assert_eq!(format_rate(0), "0.00%");
        assert_eq!(format_rate(8750), "87.50%");
        assert_eq!(format_rate(10_000), "100.00%");
        assert_eq!(format_rate(5), "0.05%");
    }

    #[test]
    fn empty_report_message() {
        assert_eq!(
            render_report(&Report::default()),
            "No inspection data to report.\n"
        );
    }
}
