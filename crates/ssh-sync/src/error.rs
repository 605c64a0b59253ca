//! Sync error types.
//!
//! Every fatal condition is a value returned up to `main`, which is the only
//! place that maps errors to a process exit code.

use netbox_client::NetBoxError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating the SSH config.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A required environment variable is unset or empty
    #[error("Environment variable {0} is required but not set")]
    MissingEnv(String),

    /// An environment variable is set but its value is not valid UTF-8
    #[error("Environment variable {0} is not valid unicode")]
    InvalidEnv(String),

    /// The HTTP client could not be constructed
    #[error("Failed to create NetBox client: {0}")]
    Client(#[source] NetBoxError),

    /// An inventory endpoint could not be fetched
    #[error("Failed to fetch data from {endpoint}: {source}")]
    Fetch {
        endpoint: String,
        #[source]
        source: NetBoxError,
    },

    /// The rendered config could not be written to disk
    #[error("Failed to write SSH config to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Console output failed (e.g. closed stdout)
    #[error("Failed to write to console: {0}")]
    Console(#[from] std::io::Error),
}

impl SyncError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            SyncError::MissingEnv(_)
            | SyncError::InvalidEnv(_)
            | SyncError::Client(_)
            | SyncError::Fetch { .. } => 1,
            SyncError::Write { .. } | SyncError::Console(_) => 2,
        }
    }
}
