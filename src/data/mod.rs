//! Data module - loading, cleaning, and filtered views

pub mod cache;
pub mod cleaner;
pub mod loader;
pub mod records;
pub mod view;

pub use cache::DatasetCache;
pub use cleaner::{clean, title_case, CleaningConfig, DedupStage};
pub use loader::{load_cleaned, select_target_rows, DatasetLoader, LoaderError};
pub use records::{EventRecord, DEFAULT_DATA_FILE, RELEVANT_COLUMNS, TARGET_COUNTRY};
pub use view::{FilterConfig, DEFAULT_INDUSTRIES};
