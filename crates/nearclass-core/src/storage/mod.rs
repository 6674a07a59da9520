mod config;
pub mod csv_io;
pub mod db;

pub use config::Config;
pub use db::MeetingDb;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/nearclass[-dev]/` based on NEARCLASS_ENV.
///
/// Set NEARCLASS_ENV=dev to use a development data directory.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("NEARCLASS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("nearclass-dev")
    } else {
        base_dir.join("nearclass")
    };

    std::fs::create_dir_all(&dir).map_err(|_| StorageError::NoDataDir)?;
    Ok(dir)
}
