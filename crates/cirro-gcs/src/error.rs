//! GCS task error types.

/// Result type for GCS task operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while running GCS tasks.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// The rendered source is not a valid object-store URI.
    ///
    /// Raised before any backend interaction, when the source cannot be
    /// parsed or names no bucket authority.
    #[error("invalid source uri '{uri}': {reason}")]
    InvalidUri {
        /// The rendered source string that was rejected.
        uri: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The entry filter pattern failed to compile.
    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as configured.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// The client could not be constructed or authenticated.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The backend rejected or failed a listing call.
    ///
    /// Wraps the SDK error unmodified, so callers see exactly what the
    /// backend reported.
    #[error("backend error: {0}")]
    Backend(#[from] google_cloud_storage::http::Error),

    /// Template rendering failed in the run context.
    #[error(transparent)]
    Context(#[from] cirro_task::Error),
}

impl Error {
    /// Creates a new invalid-uri error.
    pub fn invalid_uri(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUri {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }
}
