//! Errors raised by the storage layer.
//!
//! The countdown engine itself never fails. Everything here comes from the
//! config file or the state database, and callers mostly log it and carry
//! on with defaults.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("state database: {0}")]
    Database(#[from] DatabaseError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    /// Parked timer state could not be (de)serialized.
    #[error("timer state encoding: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("cannot open {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Another process holds the write lock.
    #[error("busy, another pomowidget process is writing")]
    Busy,

    #[error("{0}")]
    Sqlite(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot write {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    #[error("bad value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// The edited tree no longer matches the config layout.
    #[error("rejected: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked) => {
                DatabaseError::Busy
            }
            _ => DatabaseError::Sqlite(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
