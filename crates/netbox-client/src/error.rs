//! NetBox client errors

use thiserror::Error;

/// Errors that can occur when interacting with the NetBox API
#[derive(Debug, Error)]
pub enum NetBoxError {
    /// Transport failure: connection refused, timeout, TLS, ...
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NetBox answered with an error status or a body that is not the expected JSON
    #[error("NetBox API error: {0}")]
    Api(String),

    /// The token was rejected (401/403)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Endpoint not found (404), usually a wrong base URL or NetBox version
    #[error("Not found: {0}")]
    NotFound(String),
}
