//! Task runtime error types.

/// Boxed error type for trait-object seams.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for task runtime operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur in the task runtime.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// One or more template variables had no value in the run context.
    #[error("unresolved template variables: {}", .names.join(", "))]
    UnresolvedVariables {
        /// Names of every placeholder that could not be resolved.
        names: Vec<String>,
    },
}
