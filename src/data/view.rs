//! Filtered View Module
//! Year-range and allow-set filtering over the cleaned dataset. Views are
//! recomputed from scratch on every change, never mutated in place.

use std::collections::BTreeSet;

use crate::data::records::EventRecord;

/// Industries pre-selected in the dashboard (the usual top targets).
pub const DEFAULT_INDUSTRIES: [&str; 4] = [
    "Health Care",
    "Public Admin",
    "Tech/Science",
    "Finance And Insurance",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Inclusive year bounds.
    pub year_range: (i32, i32),
    pub actor_types: BTreeSet<String>,
    pub industries: BTreeSet<String>,
}

impl FilterConfig {
    /// Widest sensible filter for a dataset: the full year span, every actor
    /// type, and the default industry subset intersected with what is
    /// actually present.
    pub fn from_dataset(records: &[EventRecord]) -> Self {
        let year_range = year_bounds(records);
        let actor_types = distinct(records, |r| r.actor_type.as_deref());
        let present = distinct(records, |r| r.industry.as_deref());
        let industries = DEFAULT_INDUSTRIES
            .iter()
            .filter(|name| present.contains(**name))
            .map(|name| name.to_string())
            .collect();
        Self {
            year_range,
            actor_types,
            industries,
        }
    }

    /// Compute the filtered view. A row with a missing year, actor type, or
    /// industry cannot match a range or an allow-set, so it drops out here.
    pub fn apply(&self, records: &[EventRecord]) -> Vec<EventRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    fn matches(&self, record: &EventRecord) -> bool {
        let (lo, hi) = self.year_range;
        record.year.is_some_and(|y| y >= lo && y <= hi)
            && record
                .actor_type
                .as_deref()
                .is_some_and(|a| self.actor_types.contains(a))
            && record
                .industry
                .as_deref()
                .is_some_and(|i| self.industries.contains(i))
    }
}

/// Distinct values of one field, sorted.
pub fn distinct<F>(records: &[EventRecord], field: F) -> BTreeSet<String>
where
    F: Fn(&EventRecord) -> Option<&str>,
{
    records
        .iter()
        .filter_map(|r| field(r))
        .map(str::to_string)
        .collect()
}

/// Min/max year across the dataset; `(0, 0)` when no year is present.
pub fn year_bounds(records: &[EventRecord]) -> (i32, i32) {
    let mut bounds: Option<(i32, i32)> = None;
    for year in records.iter().filter_map(|r| r.year) {
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(year), hi.max(year)),
            None => (year, year),
        });
    }
    bounds.unwrap_or((0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats;

    fn record(year: i32, actor_type: &str, industry: &str) -> EventRecord {
        EventRecord {
            year: Some(year),
            actor_type: Some(actor_type.to_string()),
            industry: Some(industry.to_string()),
            motive: Some("Financial".to_string()),
            ..EventRecord::default()
        }
    }

    fn sample() -> Vec<EventRecord> {
        vec![
            record(2018, "Criminal", "Health Care"),
            record(2019, "Criminal", "Finance And Insurance"),
            record(2020, "Nation-State", "Health Care"),
            record(2021, "Hacktivist", "Information"),
        ]
    }

    #[test]
    fn widest_filter_keeps_default_industries_only() {
        let records = sample();
        let filter = FilterConfig::from_dataset(&records);
        assert_eq!(filter.year_range, (2018, 2021));
        assert_eq!(filter.actor_types.len(), 3);
        // "Information" is present but not a default selection.
        assert!(!filter.industries.contains("Information"));
        assert_eq!(filter.apply(&records).len(), 3);
    }

    #[test]
    fn year_range_is_inclusive() {
        let records = sample();
        let mut filter = FilterConfig::from_dataset(&records);
        filter.year_range = (2019, 2020);
        let view = filter.apply(&records);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn zero_match_range_yields_a_valid_empty_view() {
        let records = sample();
        let mut filter = FilterConfig::from_dataset(&records);
        filter.year_range = (1990, 1995);
        let view = filter.apply(&records);
        assert!(view.is_empty());

        // The metric row over an empty view: total 0, no modal values, no
        // panic anywhere.
        let metrics = stats::summarize(&view);
        assert_eq!(metrics.total, 0);
        assert_eq!(metrics.top_actor_type, None);
        assert_eq!(metrics.top_industry, None);
        assert_eq!(metrics.top_motive, None);
    }

    #[test]
    fn rows_with_missing_fields_never_match() {
        let mut records = sample();
        records.push(EventRecord {
            year: None,
            actor_type: Some("Criminal".to_string()),
            industry: Some("Health Care".to_string()),
            ..EventRecord::default()
        });
        let filter = FilterConfig::from_dataset(&records);
        // Same count as without the year-less row.
        assert_eq!(filter.apply(&records).len(), 3);
    }

    #[test]
    fn selection_outside_top_counts_still_yields_a_view() {
        let records = sample();
        let mut filter = FilterConfig::from_dataset(&records);
        filter.industries = ["Information".to_string()].into_iter().collect();
        let view = filter.apply(&records);
        assert_eq!(view.len(), 1);
        let counts = stats::value_counts(&view, |r| r.industry.as_deref());
        assert_eq!(counts, vec![("Information".to_string(), 1)]);
    }
}
