//! GCS connection and listing backend.
//!
//! [`GcsConnection`] wraps the GCS JSON API client. Connections live for a
//! single task invocation: built from application-default credentials with
//! an optional project override, used for one listing sequence, dropped.
//! [`BlobLister`] is the seam listing tasks consume, so tests and emulator
//! setups can substitute their own backend.

use async_stream::try_stream;
use futures::StreamExt;
use futures::stream::BoxStream;
use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::objects::Object;
use google_cloud_storage::http::objects::list::ListObjectsRequest;
use tracing::{debug, error, info};

use crate::types::{Blob, ListOptions};
use crate::{Error, Result, TRACING_TARGET_CLIENT};

/// Streaming source of blobs for listing tasks.
pub trait BlobLister: Send + Sync {
    /// Streams the entries of `bucket` matching `options`, in backend order.
    fn list<'a>(
        &'a self,
        bucket: &'a str,
        options: &'a ListOptions,
    ) -> BoxStream<'a, Result<Blob>>;
}

/// Connection to Google Cloud Storage for a single task invocation.
pub struct GcsConnection {
    client: Client,
    project_id: Option<String>,
}

impl GcsConnection {
    /// Creates a connection with application-default credentials.
    ///
    /// The project override is retained for API surfaces that require one;
    /// object listings are scoped by bucket alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] when credential bootstrap fails.
    pub async fn connect(project_id: Option<String>) -> Result<Self> {
        let config = ClientConfig::default().with_auth().await.map_err(|e| {
            error!(
                target: TRACING_TARGET_CLIENT,
                error = %e,
                "Failed to authenticate GCS client"
            );
            Error::connection(e.to_string())
        })?;

        info!(
            target: TRACING_TARGET_CLIENT,
            project_id = project_id.as_deref().unwrap_or("<default>"),
            "GCS connection initialized"
        );

        Ok(Self {
            client: Client::new(config),
            project_id,
        })
    }

    /// Creates an unauthenticated connection, for emulators and local use.
    pub fn anonymous() -> Self {
        Self {
            client: Client::new(ClientConfig::default().anonymous()),
            project_id: None,
        }
    }

    /// Sets the project override.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Returns the project override, if one was configured.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }
}

impl BlobLister for GcsConnection {
    fn list<'a>(
        &'a self,
        bucket: &'a str,
        options: &'a ListOptions,
    ) -> BoxStream<'a, Result<Blob>> {
        let stream = try_stream! {
            debug!(
                target: TRACING_TARGET_CLIENT,
                bucket = bucket,
                prefix = options.prefix.as_deref().unwrap_or(""),
                current_directory = options.current_directory,
                "Listing bucket"
            );

            let mut page_token: Option<String> = None;
            loop {
                let request = ListObjectsRequest {
                    bucket: bucket.to_string(),
                    prefix: options.prefix.clone(),
                    delimiter: options.current_directory.then(|| "/".to_string()),
                    versions: options.versions,
                    page_token: page_token.clone(),
                    ..Default::default()
                };

                let response = self.client.list_objects(&request).await.map_err(|e| {
                    error!(
                        target: TRACING_TARGET_CLIENT,
                        bucket = bucket,
                        error = %e,
                        "Listing call failed"
                    );
                    e
                })?;

                let next = next_page(response.next_page_token);
                for blob in page_blobs(bucket, response.items, response.prefixes) {
                    yield blob;
                }

                match next {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }
        };

        stream.boxed()
    }
}

/// Maps one listing page into blob descriptors: concrete objects first,
/// then directory markers synthesized from the grouped prefixes.
fn page_blobs(
    bucket: &str,
    items: Option<Vec<Object>>,
    prefixes: Option<Vec<String>>,
) -> Vec<Blob> {
    let objects = items.unwrap_or_default();
    let prefixes = prefixes.unwrap_or_default();

    let mut blobs = Vec::with_capacity(objects.len() + prefixes.len());
    blobs.extend(objects.iter().map(Blob::from_object));
    blobs.extend(
        prefixes
            .into_iter()
            .map(|prefix| Blob::directory(bucket, prefix)),
    );
    blobs
}

/// Continuation token for the next page, or `None` when the backend
/// reports no further pages. An empty token also terminates.
fn next_page(token: Option<String>) -> Option<String> {
    token.filter(|token| !token.is_empty())
}

impl std::fmt::Debug for GcsConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcsConnection")
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}
