//! # Report Aggregation
//!
//! A [`Report`] is a pure function of the inspection record log. It is never
//! stored or updated incrementally; every call recomputes it from the records
//! it is given, so it is always consistent with the log.
//!
//! Rates use integer basis points (`10_000` = 100%).

use crate::primitives::BASIS_POINTS;
use crate::{DefectKind, InspectionRecord, Stage, UnitId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Verdict counts for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StageTally {
    pub approved: usize,
    pub rejected: usize,
    pub pending: usize,
    /// Approved records carrying the cosmetic flag.
    pub cosmetic: usize,
}

impl StageTally {
    /// Number of records tallied.
    #[must_use]
    pub fn total(&self) -> usize {
        self.approved
            .saturating_add(self.rejected)
            .saturating_add(self.pending)
    }

    fn add(&mut self, record: &InspectionRecord) {
        if record.is_approved() {
            self.approved = self.approved.saturating_add(1);
        } else if record.is_rejected() {
            self.rejected = self.rejected.saturating_add(1);
        } else {
            self.pending = self.pending.saturating_add(1);
        }
        if record.cosmetic {
            self.cosmetic = self.cosmetic.saturating_add(1);
        }
    }
}

/// Aggregated statistics over a record log.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Report {
    /// Number of records aggregated.
    pub total_inspections: usize,
    /// Distinct units among the records.
    pub units_inspected: usize,
    /// Verdict counts across all stages.
    pub overall: StageTally,
    /// Verdict counts per stage. Every stage is present, even with no records.
    pub per_stage: BTreeMap<Stage, StageTally>,
    /// How many records observed each defect kind. Only observed kinds appear.
    pub defect_frequency: BTreeMap<DefectKind, usize>,
    /// Approved records over all records, in basis points.
    pub approval_rate_bp: u64,
    /// Sum of record severities.
    pub total_severity: u64,
}

impl Report {
    /// Aggregate a record log.
    #[must_use]
    pub fn from_records(records: &[InspectionRecord]) -> Self {
        let mut overall = StageTally::default();
        let mut per_stage: BTreeMap<Stage, StageTally> = Stage::ALL
            .into_iter()
            .map(|stage| (stage, StageTally::default()))
            .collect();
        let mut defect_frequency: BTreeMap<DefectKind, usize> = BTreeMap::new();
        let mut units: BTreeSet<&UnitId> = BTreeSet::new();
        let mut total_severity: u64 = 0;

        for record in records {
            overall.add(record);
            per_stage.entry(record.stage).or_default().add(record);
            for kind in &record.defects {
                let count = defect_frequency.entry(*kind).or_insert(0);
                *count = count.saturating_add(1);
            }
            units.insert(&record.unit);
            total_severity = total_severity.saturating_add(u64::from(record.severity));
        }

        Self {
            total_inspections: records.len(),
            units_inspected: units.len(),
            overall,
            per_stage,
            defect_frequency,
            approval_rate_bp: rate_bp(overall.approved, records.len()),
            total_severity,
        }
    }

    /// Verdict counts for `stage`.
    #[must_use]
    pub fn stage(&self, stage: Stage) -> StageTally {
        self.per_stage.get(&stage).copied().unwrap_or_default()
    }

    /// How many records observed `kind`.
    #[must_use]
    pub fn frequency(&self, kind: DefectKind) -> usize {
        self.defect_frequency.get(&kind).copied().unwrap_or(0)
    }

    /// Check if no inspections were aggregated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_inspections == 0
    }

    /// Flatten the report into named statistics.
    ///
    /// Keys: `total_inspections`, `units_inspected`, `approved`, `rejected`,
    /// `pending`, `cosmetic`, `approval_rate_bp`, `total_severity`,
    /// `<stage>.<state>` for every stage, and `defect.<kind>` for every
    /// observed kind.
    #[must_use]
    pub fn statistics(&self) -> BTreeMap<String, u64> {
        let mut stats = BTreeMap::new();
        stats.insert("total_inspections".to_string(), self.total_inspections as u64);
        stats.insert("units_inspected".to_string(), self.units_inspected as u64);
        insert_tally(&mut stats, None, &self.overall);
        stats.insert("approval_rate_bp".to_string(), self.approval_rate_bp);
        stats.insert("total_severity".to_string(), self.total_severity);

        for (stage, tally) in &self.per_stage {
            insert_tally(&mut stats, Some(stage.id()), tally);
        }
        for (kind, count) in &self.defect_frequency {
            stats.insert(format!("defect.{}", kind.id()), *count as u64);
        }
        stats
    }
}

fn insert_tally(stats: &mut BTreeMap<String, u64>, prefix: Option<&str>, tally: &StageTally) {
    let key = |name: &str| match prefix {
        Some(p) => format!("{}.{}", p, name),
        None => name.to_string(),
    };
    stats.insert(key("approved"), tally.approved as u64);
    stats.insert(key("rejected"), tally.rejected as u64);
    stats.insert(key("pending"), tally.pending as u64);
    stats.insert(key("cosmetic"), tally.cosmetic as u64);
}

/// `part / whole` in basis points, `0` when `whole` is zero.
fn rate_bp(part: usize, whole: usize) -> u64 {
    if whole == 0 {
        return 0;
    }
    (part as u64).saturating_mul(BASIS_POINTS) / (whole as u64)
}

// =============================================================================
// TESTS
// =============================================================================
