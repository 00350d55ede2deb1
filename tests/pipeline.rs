//! End-to-end pipeline checks over a synthetic CSV: load, restrict, clean,
//! filter, aggregate.

use std::io::Write;
use std::path::PathBuf;

use cyberscope::data::cleaner::CleaningConfig;
use cyberscope::data::loader::{load_cleaned, select_target_rows, DatasetLoader};
use cyberscope::data::records::{EventRecord, TARGET_COUNTRY};
use cyberscope::data::view::FilterConfig;
use cyberscope::stats::{self, CrossTab};

const HEADER: &str = "event_date,year,actor,actor_type,organization,industry,motive,event_type,country,actor_country,state\n";

fn row(
    year: i32,
    actor_type: &str,
    organization: &str,
    industry: &str,
    motive: &str,
    event_type: &str,
    country: &str,
) -> String {
    // Industry and motive values may contain commas; keep them quoted.
    format!(
        "2020-01-01,{year},SomeActor,{actor_type},{organization},\"{industry}\",\"{motive}\",{event_type},{country},Undetermined,Texas\n"
    )
}

fn write_dataset(rows: &[String]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    for r in rows {
        file.write_all(r.as_bytes()).unwrap();
    }
    (dir, path)
}

fn sample_rows() -> Vec<String> {
    vec![
        // Exact duplicate pair - must collapse to one.
        row(2019, "criminal", "First Bank", "Finance And Insurance", "Financial", " Exploitive ", TARGET_COUNTRY),
        row(2019, "criminal", "First Bank", "Finance And Insurance", "Financial", " Exploitive ", TARGET_COUNTRY),
        // Casing variants of the same label on otherwise identical rows -
        // both survive under the default dedup stage.
        row(2020, "nation-state", "Gov Agency", "Public Administration", "Espionage", "Exploitive", TARGET_COUNTRY),
        row(2020, "Nation-State", "Gov Agency", "Public Administration", "Espionage", "Exploitive", TARGET_COUNTRY),
        // Rare categories that must be pruned.
        row(2020, "Terrorist", "Metro Transit", "Transportation And Warehousing", "Disruptive", "Disruptive", TARGET_COUNTRY),
        row(2021, "Criminal", "Farm Co", "Agriculture, Forestry, Fishing And Hunting", "Financial", "Exploitive", TARGET_COUNTRY),
        row(2021, "Criminal", "PR Firm", "Information", "Reputation", "Exploitive", TARGET_COUNTRY),
        // Kept rows across industries and years.
        row(2021, "Criminal", "City Hospital", "Health Care And Social Assistance", "Financial", "Exploitive", TARGET_COUNTRY),
        row(2022, "Criminal", "County Clinic", "Health Care And Social Assistance", "Financial", "Disruptive", TARGET_COUNTRY),
        row(2022, "Hacktivist", "Tech Startup", "Professional, Scientific, And Technical Services", "Protest", "Disruptive", TARGET_COUNTRY),
        // Foreign row - filtered out before cleaning ever sees it.
        row(2022, "Criminal", "Foreign Bank", "Finance And Insurance", "Financial", "Exploitive", "Canada"),
    ]
}

#[test]
fn cleaned_dataset_holds_the_advertised_invariants() {
    let (_dir, path) = write_dataset(&sample_rows());
    let config = CleaningConfig::default();
    let cleaned = load_cleaned(&path, &config).unwrap();

    // Only the target country.
    assert!(cleaned
        .iter()
        .all(|r| r.country.as_deref() == Some(TARGET_COUNTRY)));

    // Exclusion sets are enforced post-clean.
    for record in &cleaned {
        assert_ne!(record.actor_type.as_deref(), Some("Terrorist"));
        assert_ne!(
            record.industry.as_deref(),
            Some("Agriculture, Forestry, Fishing And Hunting")
        );
        assert_ne!(record.motive.as_deref(), Some("Reputation"));
    }

    // 11 source rows: one duplicate collapses, three rows are pruned, one is
    // foreign. The casing-variant pair survives as two rows.
    assert_eq!(cleaned.len(), 6);

    // Renames applied; event types stripped.
    assert!(cleaned
        .iter()
        .any(|r| r.industry.as_deref() == Some("Health Care")));
    assert!(cleaned
        .iter()
        .any(|r| r.industry.as_deref() == Some("Public Admin")));
    assert!(cleaned
        .iter()
        .all(|r| r.event_type.as_deref().is_some_and(|e| e.trim() == e)));

    // The known ordering gap: the casing variants are now exact duplicates.
    let nation_state: Vec<&EventRecord> = cleaned
        .iter()
        .filter(|r| r.actor_type.as_deref() == Some("Nation-State"))
        .collect();
    assert_eq!(nation_state.len(), 2);
    assert_eq!(nation_state[0], nation_state[1]);
}

#[test]
fn aggregates_are_consistent_with_the_view() {
    let (_dir, path) = write_dataset(&sample_rows());
    let cleaned = load_cleaned(&path, &CleaningConfig::default()).unwrap();

    let mut filter = FilterConfig::from_dataset(&cleaned);
    filter.industries = cleaned
        .iter()
        .filter_map(|r| r.industry.clone())
        .collect();
    let view = filter.apply(&cleaned);
    assert_eq!(view.len(), cleaned.len());

    // Frequency totals equal the row count (every row has an actor type).
    let counts = stats::value_counts(&view, |r| r.actor_type.as_deref());
    let total: u64 = counts.iter().map(|(_, c)| c).sum();
    assert_eq!(total as usize, view.len());

    // Cross-tab row sums equal the per-actor counts, and normalized rows sum
    // to one.
    let ct = CrossTab::compute(&view, |r| r.actor_type.as_deref(), |r| r.industry.as_deref());
    for (label, row_total) in ct.row_labels.iter().zip(ct.row_totals()) {
        let expected = view
            .iter()
            .filter(|r| r.actor_type.as_deref() == Some(label))
            .count() as u64;
        assert_eq!(row_total, expected);
    }
    for row in ct.normalized_rows() {
        let sum: f64 = row.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    // Year gaps stay gaps: 2018 never shows up.
    let yearly = stats::counts_by_year(&view);
    assert!(yearly.iter().all(|&(year, _)| year != 2018));
}

#[test]
fn empty_view_is_a_valid_state_end_to_end() {
    let (_dir, path) = write_dataset(&sample_rows());
    let cleaned = load_cleaned(&path, &CleaningConfig::default()).unwrap();

    let mut filter = FilterConfig::from_dataset(&cleaned);
    filter.year_range = (1980, 1985);
    let view = filter.apply(&cleaned);
    assert!(view.is_empty());

    let metrics = stats::summarize(&view);
    assert_eq!(metrics.total, 0);
    assert!(metrics.top_actor_type.is_none());
    assert!(metrics.top_industry.is_none());
    assert!(metrics.top_motive.is_none());

    let ct = CrossTab::compute(&view, |r| r.actor_type.as_deref(), |r| r.industry.as_deref());
    assert!(ct.is_empty());
    assert!(stats::counts_by_year(&view).is_empty());
    assert!(stats::value_counts(&view, |r| r.industry.as_deref()).is_empty());
}

#[test]
fn recleaning_the_cleaned_dataset_changes_nothing() {
    let (_dir, path) = write_dataset(&sample_rows());
    let config = CleaningConfig::default();
    let cleaned = load_cleaned(&path, &config).unwrap();

    // The casing-variant pair is an exact-duplicate pair post-clean, which a
    // second dedup would fold; idempotence is asserted on the normalization
    // passes over rows that are genuinely distinct.
    let distinct: Vec<EventRecord> = {
        let mut seen = std::collections::HashSet::new();
        cleaned
            .into_iter()
            .filter(|r| seen.insert(r.clone()))
            .collect()
    };
    let recleaned = cyberscope::data::cleaner::clean(distinct.clone(), &config);
    assert_eq!(distinct, recleaned);
}

#[test]
fn loader_separates_selection_from_cleaning() {
    let (_dir, path) = write_dataset(&sample_rows());
    let mut loader = DatasetLoader::new();
    let df = loader.load_csv(&path).unwrap();
    assert_eq!(df.height(), 11);

    let us = select_target_rows(df, TARGET_COUNTRY).unwrap();
    assert_eq!(us.height(), 10);

    let records = EventRecord::from_dataframe(&us).unwrap();
    // Pre-clean: duplicates and rare categories are still present.
    assert_eq!(records.len(), 10);
    assert!(records
        .iter()
        .any(|r| r.actor_type.as_deref() == Some("Terrorist")));
}
