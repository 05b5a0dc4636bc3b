//! Opening the file-backed rental database

use std::path::PathBuf;

use rental_store::Database;
use rental_types::Result;

use crate::config::Config;

/// Open the database in the configured data directory
pub fn open_database(config: &Config) -> Result<Database> {
    let data_dir = config.data_dir()?;
    open_database_at(data_dir, config.create_missing_files)
}

/// Open the database at a custom directory
pub fn open_database_at(data_dir: PathBuf, create_missing_files: bool) -> Result<Database> {
    log::debug!("Opening rental database at {}", data_dir.display());
    if create_missing_files {
        Database::open_or_create(data_dir)
    } else {
        Database::open(data_dir)
    }
}
