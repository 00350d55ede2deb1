//! Aggregation Module
//! Pure frequency counts, cross-tabulations, and per-year groupings over a
//! record slice. Everything here is total on empty input.

use std::collections::{BTreeMap, BTreeSet};

use crate::data::records::EventRecord;

/// Count of rows per distinct value of one categorical field, missing values
/// skipped. Sorted count-descending, ties label-ascending.
pub fn value_counts<F>(records: &[EventRecord], field: F) -> Vec<(String, u64)>
where
    F: Fn(&EventRecord) -> Option<&str>,
{
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        if let Some(value) = field(record) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    let mut out: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// A count matrix over two categorical fields. Labels are sorted ascending
/// on both axes; rows missing either field contribute nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// `counts[row][col]`
    pub counts: Vec<Vec<u64>>,
}

impl CrossTab {
    pub fn compute<R, C>(records: &[EventRecord], row_field: R, col_field: C) -> CrossTab
    where
        R: Fn(&EventRecord) -> Option<&str>,
        C: Fn(&EventRecord) -> Option<&str>,
    {
        let mut cells: BTreeMap<(&str, &str), u64> = BTreeMap::new();
        let mut rows: BTreeSet<&str> = BTreeSet::new();
        let mut cols: BTreeSet<&str> = BTreeSet::new();
        for record in records {
            if let (Some(r), Some(c)) = (row_field(record), col_field(record)) {
                rows.insert(r);
                cols.insert(c);
                *cells.entry((r, c)).or_insert(0) += 1;
            }
        }

        let counts = rows
            .iter()
            .map(|r| {
                cols.iter()
                    .map(|c| cells.get(&(*r, *c)).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        CrossTab {
            row_labels: rows.into_iter().map(str::to_string).collect(),
            col_labels: cols.into_iter().map(str::to_string).collect(),
            counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty() || self.col_labels.is_empty()
    }

    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    /// Each row divided by its sum, for proportion views. Rows with no
    /// observations stay all-zero rather than dividing by zero.
    pub fn normalized_rows(&self) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| {
                let total: u64 = row.iter().sum();
                if total == 0 {
                    vec![0.0; row.len()]
                } else {
                    row.iter().map(|&c| c as f64 / total as f64).collect()
                }
            })
            .collect()
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Rows per year, year-ascending. Years with no rows are simply absent -
/// no backfill, no interpolation; chart code has to tolerate the gaps.
pub fn counts_by_year(records: &[EventRecord]) -> Vec<(i32, u64)> {
    let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
    for record in records {
        if let Some(year) = record.year {
            *counts.entry(year).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

/// Rows per (year, category): one year-ascending series per category value.
pub fn counts_by_year_and<F>(
    records: &[EventRecord],
    field: F,
) -> BTreeMap<String, Vec<(i32, u64)>>
where
    F: Fn(&EventRecord) -> Option<&str>,
{
    let mut by_category: BTreeMap<&str, BTreeMap<i32, u64>> = BTreeMap::new();
    for record in records {
        if let (Some(year), Some(value)) = (record.year, field(record)) {
            *by_category
                .entry(value)
                .or_default()
                .entry(year)
                .or_insert(0) += 1;
        }
    }
    by_category
        .into_iter()
        .map(|(value, series)| (value.to_string(), series.into_iter().collect()))
        .collect()
}

/// Modal value of a field. Ties resolve to the smallest label; `None` when
/// the field is absent everywhere.
pub fn mode_of<F>(records: &[EventRecord], field: F) -> Option<String>
where
    F: Fn(&EventRecord) -> Option<&str>,
{
    value_counts(records, field)
        .into_iter()
        .next()
        .map(|(value, _)| value)
}

/// Headline metrics for the current view. The total is always defined; the
/// modal values are `None` on an empty view and simply not displayed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryMetrics {
    pub total: usize,
    pub top_actor_type: Option<String>,
    pub top_industry: Option<String>,
    pub top_motive: Option<String>,
}

pub fn summarize(records: &[EventRecord]) -> SummaryMetrics {
    SummaryMetrics {
        total: records.len(),
        top_actor_type: mode_of(records, |r| r.actor_type.as_deref()),
        top_industry: mode_of(records, |r| r.industry.as_deref()),
        top_motive: mode_of(records, |r| r.motive.as_deref()),
    }
}
