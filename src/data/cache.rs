//! Dataset Cache Module
//! Caches the cleaned dataset per source path so repeated re-renders skip
//! the file read. Refreshed only through `invalidate`; lives for the
//! process.

use std::path::{Path, PathBuf};

use crate::data::cleaner::CleaningConfig;
use crate::data::loader::{self, LoaderError};
use crate::data::records::EventRecord;

#[derive(Default)]
pub struct DatasetCache {
    entry: Option<CacheEntry>,
}

struct CacheEntry {
    path: PathBuf,
    records: Vec<EventRecord>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cleaned records for `path`, reading the file only when the cache is
    /// cold or holds a different path.
    pub fn get_or_load(
        &mut self,
        path: &Path,
        config: &CleaningConfig,
    ) -> Result<&[EventRecord], LoaderError> {
        let hit = self
            .entry
            .as_ref()
            .is_some_and(|e| e.path.as_path() == path);
        if !hit {
            let records = loader::load_cleaned(path, config)?;
            self.entry = Some(CacheEntry {
                path: path.to_path_buf(),
                records,
            });
        } else {
            log::debug!("dataset cache hit for {}", path.display());
        }
        match &self.entry {
            Some(e) => Ok(&e.records),
            None => Err(LoaderError::NoData),
        }
    }

    /// Store records that were loaded elsewhere (the dashboard loads on a
    /// worker thread and hands the result over here).
    pub fn store(&mut self, path: PathBuf, records: Vec<EventRecord>) {
        self.entry = Some(CacheEntry { path, records });
    }

    /// The cached cleaned dataset, if any.
    pub fn records(&self) -> Option<&[EventRecord]> {
        self.entry.as_ref().map(|e| e.records.as_slice())
    }

    pub fn path(&self) -> Option<&Path> {
        self.entry.as_ref().map(|e| e.path.as_path())
    }

    /// Drop the cached dataset; the next `get_or_load` re-reads the file.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "event_date,year,actor,actor_type,organization,industry,motive,event_type,country,actor_country,state\n";
    const US_ROW: &str =
        "2020-01-05,2020,Lazarus,Nation-State,First Bank,Finance And Insurance,Financial,Exploitive,United States of America,North Korea,New York\n";

    #[test]
    fn serves_cached_data_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        std::fs::write(&path, format!("{HEADER}{US_ROW}")).unwrap();

        let config = CleaningConfig::default();
        let mut cache = DatasetCache::new();
        assert_eq!(cache.get_or_load(&path, &config).unwrap().len(), 1);

        // Append a second, distinct row; the cache must not notice.
        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(US_ROW.replace("2020", "2021").as_bytes())
            .unwrap();
        drop(file);
        assert_eq!(cache.get_or_load(&path, &config).unwrap().len(), 1);

        // Explicit refresh picks the new row up.
        cache.invalidate();
        assert!(cache.records().is_none());
        assert_eq!(cache.get_or_load(&path, &config).unwrap().len(), 2);
    }

    #[test]
    fn missing_file_propagates_and_leaves_cache_cold() {
        let mut cache = DatasetCache::new();
        let err = cache
            .get_or_load(Path::new("/nonexistent/events.csv"), &CleaningConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
        assert!(cache.records().is_none());
    }
}
