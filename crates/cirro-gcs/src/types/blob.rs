//! Listed-entry descriptors.

use google_cloud_storage::http::objects::Object;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single entry returned by a bucket listing.
///
/// Wraps either a concrete object or a directory marker the backend
/// synthesizes when a listing groups keys by delimiter. The two are told
/// apart by provenance: a concrete zero-byte `dir/` placeholder object is
/// still an object, not a directory marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Blob {
    /// Fully qualified location, `gs://{bucket}/{name}`.
    pub uri: String,
    /// Bucket containing the entry.
    pub bucket: String,
    /// Object name (path within the bucket).
    pub name: String,
    /// Size in bytes. Zero for directory markers.
    pub size: u64,
    /// HTTP entity tag, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// Content type, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Last update time, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Timestamp>,
    /// Object generation, populated for entries read from the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,
    /// Whether this entry is a directory marker rather than a concrete
    /// object.
    pub is_directory: bool,
}

impl Blob {
    /// Creates a descriptor for a concrete object.
    pub fn object(bucket: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(bucket.into(), name.into(), false)
    }

    /// Creates a descriptor for a directory marker synthesized from a
    /// grouped-listing prefix.
    pub fn directory(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::with_kind(bucket.into(), prefix.into(), true)
    }

    fn with_kind(bucket: String, name: String, is_directory: bool) -> Self {
        let uri = format!("gs://{bucket}/{name}");
        Self {
            uri,
            bucket,
            name,
            size: 0,
            etag: None,
            content_type: None,
            updated: None,
            generation: None,
            is_directory,
        }
    }

    /// Maps a backend object into a descriptor.
    ///
    /// Everything coming through here is a concrete object; directory
    /// markers only ever originate from grouped-listing prefixes.
    pub fn from_object(object: &Object) -> Self {
        let updated = object
            .updated
            .and_then(|updated| Timestamp::from_second(updated.unix_timestamp()).ok());

        Self {
            size: object.size.max(0) as u64,
            etag: (!object.etag.is_empty()).then(|| object.etag.clone()),
            content_type: object.content_type.clone(),
            updated,
            generation: Some(object.generation),
            ..Self::object(object.bucket.clone(), object.name.clone())
        }
    }

    /// Sets the size in bytes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Sets the entity tag.
    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the last update time.
    pub fn with_updated(mut self, updated: Timestamp) -> Self {
        self.updated = Some(updated);
        self
    }

    /// Sets the object generation.
    pub fn with_generation(mut self, generation: i64) -> Self {
        self.generation = Some(generation);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_descriptor() {
        let blob = Blob::object("my-bucket", "dir/file.txt").with_size(64);

        assert_eq!(blob.uri, "gs://my-bucket/dir/file.txt");
        assert_eq!(blob.bucket, "my-bucket");
        assert_eq!(blob.name, "dir/file.txt");
        assert_eq!(blob.size, 64);
        assert!(!blob.is_directory);
    }

    #[test]
    fn test_directory_marker() {
        let blob = Blob::directory("my-bucket", "dir/nested/");

        assert_eq!(blob.uri, "gs://my-bucket/dir/nested/");
        assert_eq!(blob.size, 0);
        assert!(blob.is_directory);
    }

    #[test]
    fn test_placeholder_object_is_not_a_directory() {
        // Provenance decides the flag: a concrete object named like a
        // directory stays an object.
        let blob = Blob::object("my-bucket", "dir/");

        assert!(!blob.is_directory);
    }

    #[test]
    fn test_metadata_setters() {
        let updated = Timestamp::from_second(1_672_531_200).unwrap();
        let blob = Blob::object("my-bucket", "report.csv")
            .with_size(2048)
            .with_etag("\"abc123\"")
            .with_content_type("text/csv")
            .with_updated(updated)
            .with_generation(7);

        assert_eq!(blob.etag.as_deref(), Some("\"abc123\""));
        assert_eq!(blob.content_type.as_deref(), Some("text/csv"));
        assert_eq!(blob.updated, Some(updated));
        assert_eq!(blob.generation, Some(7));
    }

    #[test]
    fn test_serialization_skips_absent_metadata() {
        let json = serde_json::to_value(Blob::directory("my-bucket", "dir/")).unwrap();

        assert_eq!(json["uri"], "gs://my-bucket/dir/");
        assert_eq!(json["is_directory"], true);
        assert!(json.get("etag").is_none());
        assert!(json.get("updated").is_none());
    }
}
