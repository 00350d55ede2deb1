//! Stats module - aggregation over the cleaned dataset

pub mod aggregate;

pub use aggregate::{
    counts_by_year, counts_by_year_and, mode_of, summarize, value_counts, CrossTab,
    SummaryMetrics,
};
