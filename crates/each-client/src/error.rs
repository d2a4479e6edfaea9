//! Error types for the Each client
//!
//! Every failure is terminal for the call that produced it; nothing in
//! this crate retries or recovers.

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the client
#[derive(Error, Debug)]
pub enum Error {
    /// The client could not be constructed. Holds every failed option, in order.
    #[error("{}", .0.join("\n"))]
    Configuration(Vec<String>),

    /// The request never produced a response
    #[error("do request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a status outside the 2xx range
    #[error("do request failed with status code: {status}")]
    Status {
        /// Numeric HTTP status
        status: u16,
    },

    /// A body could not be encoded or decoded as JSON
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope reported a non-success status; holds its message verbatim
    #[error("{0}")]
    Api(String),
}

impl Error {
    /// HTTP status carried by a [`Error::Status`]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error came from client construction
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}
