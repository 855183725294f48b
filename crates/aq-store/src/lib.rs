//! aq-store: the network store.
//!
//! Holds the authoritative in-memory node and pipe collections and mirrors
//! them to/from a single-file SQLite snapshot (`.pfh`) on open/save.

pub mod events;
pub mod schema;
pub mod store;

pub use events::CanvasUpdate;
pub use schema::{NodeRecord, PipeEndpoint, PipeRecord, Table};
pub use store::{DeleteOutcome, NetworkStore};

use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to open network file: {path}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("Failed to write network file: {path}")]
    Write {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("Failed to remove stale file before save: {path}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create parent directory for: {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Store has no bound file; save to an explicit path first")]
    Unbound,

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),
}
