mod config;
pub mod database;

pub use config::{Config, ConfigStore, ScheduleConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/pomowidget[-dev]/` based on POMOWIDGET_ENV.
///
/// Set POMOWIDGET_ENV=dev to use development data directory, or
/// POMOWIDGET_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("POMOWIDGET_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("POMOWIDGET_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomowidget-dev")
            } else {
                base_dir.join("pomowidget")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
