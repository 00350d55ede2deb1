//! Static report binary: renders the exploratory chart sequence to PNG
//! files.
//!
//! Usage: report [data.csv] [out_dir] [cleaning.json]

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use cyberscope::data::cleaner::CleaningConfig;
use cyberscope::data::loader;
use cyberscope::data::records::DEFAULT_DATA_FILE;
use cyberscope::report::generate_report;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let data_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()));
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "charts".to_string()));
    let config = match args.next() {
        Some(path) => CleaningConfig::from_json_file(Path::new(&path))
            .with_context(|| format!("loading cleaning config {path}"))?,
        None => CleaningConfig::default(),
    };

    let records = loader::load_cleaned(&data_path, &config)
        .with_context(|| format!("loading {}", data_path.display()))?;
    log::info!("{} cleaned US events", records.len());

    let outputs = generate_report(&records, &out_dir)?;
    for path in &outputs {
        println!("{}", path.display());
    }
    Ok(())
}
