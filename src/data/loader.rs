//! Dataset Loader Module
//! Handles CSV loading and the country-restricted column projection using
//! Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::cleaner::{clean, CleaningConfig};
use crate::data::records::{EventRecord, RELEVANT_COLUMNS, TARGET_COUNTRY};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("input file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("no data loaded")]
    NoData,
}

/// Handles CSV file loading with Polars.
pub struct DatasetLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load the full incident table. Column names and types are taken on
    /// trust; downstream cleaning assumes they match.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.exists() {
            return Err(LoaderError::FileNotFound(file_path.to_path_buf()));
        }
        self.file_path = Some(file_path.to_path_buf());

        // Lazy scan, then collect once the schema is settled.
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        log::info!("loaded {} rows from {}", df.height(), file_path.display());
        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get the number of rows in the DataFrame.
    pub fn row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get file path.
    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}

/// Restrict to one country (exact match) and project onto the relevant
/// columns. No matching rows is not an error: the result is simply empty and
/// every downstream consumer handles the empty state.
pub fn select_target_rows(df: &DataFrame, country: &str) -> Result<DataFrame, LoaderError> {
    let columns: Vec<Expr> = RELEVANT_COLUMNS.iter().map(|c| col(*c)).collect();
    let selected = df
        .clone()
        .lazy()
        .filter(col("country").eq(lit(country)))
        .select(columns)
        .collect()?;
    Ok(selected)
}

/// Load, restrict to the target country, extract typed records and clean
/// them in one pass. This is the whole pipeline the report binary needs.
pub fn load_cleaned(
    path: &Path,
    config: &CleaningConfig,
) -> Result<Vec<EventRecord>, LoaderError> {
    let mut loader = DatasetLoader::new();
    let df = loader.load_csv(path)?;
    let us = select_target_rows(df, TARGET_COUNTRY)?;
    let records = EventRecord::from_dataframe(&us)?;
    let cleaned = clean(records, config);
    log::info!("cleaned dataset: {} US events", cleaned.len());
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
event_date,year,actor,actor_type,organization,industry,motive,event_type,country,actor_country,state
2020-01-05,2020,Lazarus,nation-state,First Bank,Finance And Insurance,Financial,  Exploitive ,United States of America,North Korea,New York
2020-01-05,2020,Lazarus,nation-state,First Bank,Finance And Insurance,Financial,  Exploitive ,United States of America,North Korea,New York
2021-06-10,2021,Unknown,criminal,City Hospital,Health Care And Social Assistance,Financial,Disruptive,United States of America,Undetermined,Ohio
2021-07-01,2021,Unknown,criminal,Elsewhere Ltd,Information,Financial,Disruptive,Canada,Undetermined,Ontario
";

    fn write_csv(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("events.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_is_a_distinct_error() {
        let mut loader = DatasetLoader::new();
        let err = loader
            .load_csv(Path::new("/nonexistent/events.csv"))
            .err()
            .unwrap();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }

    #[test]
    fn country_filter_and_projection() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir);

        let mut loader = DatasetLoader::new();
        let df = loader.load_csv(&path).unwrap();
        assert_eq!(df.height(), 4);

        let us = select_target_rows(df, TARGET_COUNTRY).unwrap();
        assert_eq!(us.height(), 3);
        assert_eq!(us.width(), RELEVANT_COLUMNS.len());

        let records = EventRecord::from_dataframe(&us).unwrap();
        assert!(records
            .iter()
            .all(|r| r.country.as_deref() == Some(TARGET_COUNTRY)));
        assert_eq!(records[0].year, Some(2020));
    }

    #[test]
    fn unmatched_country_yields_empty_frame_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir);

        let mut loader = DatasetLoader::new();
        let df = loader.load_csv(&path).unwrap();
        let none = select_target_rows(df, "Freedonia").unwrap();
        assert_eq!(none.height(), 0);
        let records = EventRecord::from_dataframe(&none).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn load_cleaned_applies_the_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir);

        let cleaned = load_cleaned(&path, &CleaningConfig::default()).unwrap();
        // The duplicate US row collapses; the Canadian row never enters.
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].actor_type.as_deref(), Some("Nation-State"));
        assert_eq!(cleaned[0].event_type.as_deref(), Some("Exploitive"));
        assert_eq!(cleaned[1].industry.as_deref(), Some("Health Care"));
    }
}
