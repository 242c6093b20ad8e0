//! Typed options for listing calls.

/// Options assembled by a listing task and applied to the backend request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Restrict results to keys starting with this prefix.
    pub prefix: Option<String>,
    /// Include non-current object generations. Present whenever the task
    /// configuration carries a versions flag, whatever its value.
    pub versions: Option<bool>,
    /// Group keys by `/`, returning immediate children plus synthesized
    /// directory markers instead of a flat recursive listing.
    pub current_directory: bool,
}

impl ListOptions {
    /// Creates empty options: a flat listing of the whole bucket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key prefix filter.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the versions flag.
    pub fn with_versions(mut self, versions: bool) -> Self {
        self.versions = Some(versions);
        self
    }

    /// Groups keys by delimiter instead of listing recursively.
    pub fn with_current_directory(mut self) -> Self {
        self.current_directory = true;
        self
    }
}
