//! Event Record Module
//! Typed rows of the incident table, extracted from the loaded DataFrame.

use polars::prelude::*;

/// Columns carried through the analysis, in source order.
pub const RELEVANT_COLUMNS: [&str; 11] = [
    "event_date",
    "year",
    "actor",
    "actor_type",
    "organization",
    "industry",
    "motive",
    "event_type",
    "country",
    "actor_country",
    "state",
];

/// Country whose incidents the whole analysis is restricted to.
pub const TARGET_COUNTRY: &str = "United States of America";

/// Dataset file looked for in the working directory when no path is given.
pub const DEFAULT_DATA_FILE: &str = "Cyber_Events_Database_2014_Oct_2025.csv";

/// One reported cyber incident. Missing cells stay `None`; they are never
/// rejected or filled. Full-tuple equality is the deduplication key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EventRecord {
    pub event_date: Option<String>,
    pub year: Option<i32>,
    pub actor: Option<String>,
    pub actor_type: Option<String>,
    pub organization: Option<String>,
    pub industry: Option<String>,
    pub motive: Option<String>,
    pub event_type: Option<String>,
    pub country: Option<String>,
    pub actor_country: Option<String>,
    pub state: Option<String>,
}

impl EventRecord {
    /// Extract typed records from a frame holding the relevant columns.
    /// Text columns are cast to strings and `year` to a 32-bit integer, so
    /// whatever the CSV reader inferred still comes through.
    pub fn from_dataframe(df: &DataFrame) -> PolarsResult<Vec<EventRecord>> {
        const TEXT_COLUMNS: [&str; 10] = [
            "event_date",
            "actor",
            "actor_type",
            "organization",
            "industry",
            "motive",
            "event_type",
            "country",
            "actor_country",
            "state",
        ];

        let mut text_cols = Vec::with_capacity(TEXT_COLUMNS.len());
        for name in TEXT_COLUMNS {
            text_cols.push(df.column(name)?.cast(&DataType::String)?);
        }
        let mut text = Vec::with_capacity(text_cols.len());
        for col in &text_cols {
            text.push(col.as_materialized_series().str()?);
        }

        let year_col = df.column("year")?.cast(&DataType::Int32)?;
        let years = year_col.as_materialized_series().i32()?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let field = |k: usize| text[k].get(i).map(str::to_string);
            records.push(EventRecord {
                event_date: field(0),
                year: years.get(i),
                actor: field(1),
                actor_type: field(2),
                organization: field(3),
                industry: field(4),
                motive: field(5),
                event_type: field(6),
                country: field(7),
                actor_country: field(8),
                state: field(9),
            });
        }
        Ok(records)
    }
}
