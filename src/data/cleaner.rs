//! Cleaning Pipeline Module
//! Categorical normalization passes applied to the US subset, in a fixed
//! order: dedup, label title-casing, rare-category pruning, the industry
//! rename table, and event-type whitespace stripping.

use crate::data::records::EventRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read cleaning config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse cleaning config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where full-row deduplication runs relative to label normalization.
///
/// `BeforeNormalize` matches the source pipeline: rows identical except for
/// label casing survive dedup and end up as exact duplicates under the
/// merged label. `AfterNormalize` collapses them instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DedupStage {
    #[default]
    BeforeNormalize,
    AfterNormalize,
}

/// Cleaning rules as data. The exclusion sets and the rename table are
/// allow/deny lists, not validators: values they don't mention pass through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    pub actor_type_exclusions: BTreeSet<String>,
    pub industry_exclusions: BTreeSet<String>,
    pub motive_exclusions: BTreeSet<String>,
    pub industry_renames: BTreeMap<String, String>,
    pub dedup_stage: DedupStage,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        let to_set = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        let renames: BTreeMap<String, String> = [
            (
                "Professional, Scientific, And Technical Services",
                "Tech/Science",
            ),
            (
                "Administrative And Support And Waste Management And Remediation Services",
                "Admin/Support",
            ),
            ("Mining, Quarrying, And Oil And Gas Extraction", "Oil and Gas"),
            ("Health Care And Social Assistance", "Health Care"),
            ("Other Services (Except Public Administration)", "Other Services"),
            ("Real Estate And Rental And Leasing", "Real Estate"),
            ("Arts, Entertainment, And Recreation", "Entertainment"),
            ("Accommodation And Food Services", "Accommodation"),
            ("Transportation And Warehousing", "Transportation"),
            ("Public Administration", "Public Admin"),
            // Keeps a second cleaning pass from re-casing the short label.
            ("Oil And Gas", "Oil and Gas"),
        ]
        .iter()
        .map(|(long, short)| (long.to_string(), short.to_string()))
        .collect();

        Self {
            actor_type_exclusions: to_set(&["Terrorist"]),
            industry_exclusions: to_set(&[
                "Agriculture, Forestry, Fishing And Hunting",
                "Management Of Companies And Enterprises",
            ]),
            motive_exclusions: to_set(&[
                "Political-espionage",
                "Reputation",
                "Protest,Political-Espionage",
            ]),
            industry_renames: renames,
            dedup_stage: DedupStage::default(),
        }
    }
}

impl CleaningConfig {
    /// Load rules from a JSON file; absent keys fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}

/// Title-case a label: every run of alphabetic characters starts uppercase
/// and continues lowercase, with any non-alphabetic character acting as a
/// word boundary (`nation-state` becomes `Nation-State`).
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_boundary = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_boundary = false;
        } else {
            out.push(ch);
            at_boundary = true;
        }
    }
    out
}

/// Run the full cleaning pipeline. Each step is a total map/filter over the
/// rows; none reorders them.
pub fn clean(records: Vec<EventRecord>, config: &CleaningConfig) -> Vec<EventRecord> {
    let mut rows = records;

    if config.dedup_stage == DedupStage::BeforeNormalize {
        rows = dedup(rows);
    }

    // Actor type: title-casing is the sole mechanism merging casing-variant
    // labels, then the rare categories go.
    for row in &mut rows {
        if let Some(v) = row.actor_type.take() {
            row.actor_type = Some(title_case(&v));
        }
    }
    rows.retain(|r| !excluded(&r.actor_type, &config.actor_type_exclusions));

    // Industry: title-case, prune the rare ones (checked against the
    // pre-rename form), then shorten via the rename table.
    for row in &mut rows {
        if let Some(v) = row.industry.take() {
            row.industry = Some(title_case(&v));
        }
    }
    rows.retain(|r| !excluded(&r.industry, &config.industry_exclusions));
    for row in &mut rows {
        if let Some(v) = &row.industry {
            if let Some(short) = config.industry_renames.get(v) {
                row.industry = Some(short.clone());
            }
        }
    }

    // Motive: exclusion only, no normalization.
    rows.retain(|r| !excluded(&r.motive, &config.motive_exclusions));

    // Event type: the source pads these with whitespace.
    for row in &mut rows {
        if let Some(v) = row.event_type.take() {
            row.event_type = Some(v.trim().to_string());
        }
    }

    if config.dedup_stage == DedupStage::AfterNormalize {
        rows = dedup(rows);
    }

    rows
}

fn excluded(value: &Option<String>, set: &BTreeSet<String>) -> bool {
    value.as_deref().is_some_and(|v| set.contains(v))
}

/// Drop exact duplicate rows, keeping the first occurrence. Order preserved.
fn dedup(rows: Vec<EventRecord>) -> Vec<EventRecord> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter().filter(|r| seen.insert(r.clone())).collect()
}
