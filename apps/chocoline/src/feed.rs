//! # Unit Feed
//!
//! A feed is a JSON array of `(unit, stage)` pairs processed in order:
//!
//! ```json
//! [
//!   { "unit": "LOTE-1", "stage": "molding", "mold": "heart" },
//!   { "unit": "LOTE-1", "stage": "packaging", "packaging": "gift_box" },
//!   { "unit": "LOTE-2", "stage": "molding" }
//! ]
//! ```
//!
//! Each unit's route is the set of stages the feed lists for it, so a unit
//! fed only to molding is complete once molded. Descriptors are taken from
//! the first entry that names them.

use crate::error::CliError;
use chocoline_core::{InspectableUnit, InspectionSystem, Stage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of entries in a single feed.
///
/// Feeds longer than this are rejected.
pub const MAX_FEED_ENTRIES: usize = 100_000;

/// One `(unit, stage)` pair of the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub unit: String,
    pub stage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mold: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
}

/// A validated feed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedStep {
    pub unit: String,
    pub stage: Stage,
}

/// A parsed feed: units in first-seen order and the steps to run.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub units: Vec<InspectableUnit>,
    pub steps: Vec<FeedStep>,
}

/// Parse a JSON feed document.
pub fn parse_feed(text: &str) -> Result<Feed, CliError> {
    let entries: Vec<FeedEntry> =
        serde_json::from_str(text).map_err(|e| CliError::Feed(e.to_string()))?;

    if entries.len() > MAX_FEED_ENTRIES {
        return Err(CliError::Feed(format!(
            "Feed entry count {} exceeds maximum allowed {}",
            entries.len(),
            MAX_FEED_ENTRIES
        )));
    }

    build_feed(entries)
}

/// Validate entries and derive each unit's route.
pub fn build_feed(entries: Vec<FeedEntry>) -> Result<Feed, CliError> {
    let mut order: Vec<String> = Vec::new();
    let mut routes: BTreeMap<String, Vec<Stage>> = BTreeMap::new();
    let mut molds: BTreeMap<String, String> = BTreeMap::new();
    let mut packagings: BTreeMap<String, String> = BTreeMap::new();
    let mut steps = Vec::with_capacity(entries.len());

    for entry in entries {
        if entry.unit.trim().is_empty() {
            return Err(CliError::Feed("Feed entry has an empty unit id".to_string()));
        }
        let stage: Stage = entry.stage.parse()?;

        let route = routes.entry(entry.unit.clone()).or_insert_with(|| {
            order.push(entry.unit.clone());
            Vec::new()
        });
        route.push(stage);

        if let Some(mold) = entry.mold {
            molds.entry(entry.unit.clone()).or_insert(mold);
        }
        if let Some(packaging) = entry.packaging {
            packagings.entry(entry.unit.clone()).or_insert(packaging);
        }

        steps.push(FeedStep {
            unit: entry.unit,
            stage,
        });
    }

    let units = order
        .into_iter()
        .map(|id| {
            let route = routes.get(&id).cloned().unwrap_or_default();
            let mut unit = InspectableUnit::new(id.clone()).with_route(&route);
            if let Some(mold) = molds.remove(&id) {
                unit = unit.with_mold(mold);
            }
            if let Some(packaging) = packagings.remove(&id) {
                unit = unit.with_packaging(packaging);
            }
            unit
        })
        .collect();

    Ok(Feed { units, steps })
}

/// Process every step of `feed` in order. Returns the units in first-seen
/// order.
pub fn run_feed(
    system: &mut InspectionSystem,
    feed: Feed,
) -> Result<Vec<InspectableUnit>, CliError> {
    let Feed { mut units, steps } = feed;
    let index: BTreeMap<String, usize> = units
        .iter()
        .enumerate()
        .map(|(i, unit)| (unit.id().as_str().to_string(), i))
        .collect();

    for step in steps {
        let unit = index
            .get(&step.unit)
            .and_then(|i| units.get_mut(*i))
            .ok_or_else(|| CliError::Feed(format!("Unknown unit '{}'", step.unit)))?;
        system.process(unit, step.stage)?;
    }

    Ok(units)
}
