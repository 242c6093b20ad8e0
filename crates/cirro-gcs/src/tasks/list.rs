//! Bucket listing task.

use async_trait::async_trait;
use cirro_task::{BoxedError, Counter, RunContext, RunnableTask};
use futures::TryStreamExt;
use percent_encoding::percent_decode_str;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use url::Url;

use crate::client::{BlobLister, GcsConnection};
use crate::types::{Blob, ListOptions};
use crate::{Error, Result, TRACING_TARGET_TASKS};

/// Lists the entries of a Cloud Storage bucket.
///
/// The source URI selects the bucket and an optional key prefix. The
/// listing runs flat or grouped by the current directory, optionally
/// includes non-current object generations, and narrows its output by
/// entry kind and by a pattern the full entry URI must match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct List {
    /// Source URI, `gs://bucket[/prefix]`. Template-rendered.
    pub from: String,
    /// Project override handed to the connection. Template-rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// When present, lists every object generation, current and
    /// non-current alike.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_versions: Option<bool>,
    /// Which entry kinds reach the output.
    #[serde(default)]
    pub filter: Filter,
    /// Flat recursive listing, or grouped by the current directory.
    #[serde(default)]
    pub listing_type: ListingType,
    /// Pattern an entry URI must match entirely to reach the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_exp: Option<String>,
}

/// Entry kinds retained in the listing output.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Filter {
    /// Concrete objects only.
    Files,
    /// Directory markers only.
    Directory,
    /// Everything the backend returns.
    #[default]
    Both,
}

impl Filter {
    /// Whether `blob` passes this filter.
    fn retains(self, blob: &Blob) -> bool {
        match self {
            Self::Files => !blob.is_directory,
            Self::Directory => blob.is_directory,
            Self::Both => true,
        }
    }
}

/// Shape of the backend listing.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ListingType {
    /// Every key under the prefix, recursively.
    Recursive,
    /// Immediate children only, with markers for grouped directories.
    #[default]
    Directory,
}

/// Output of a bucket listing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListOutput {
    /// Retained entries, in backend order.
    pub blobs: Vec<Blob>,
}

/// Rendered and validated listing inputs, ready for a backend.
struct ResolvedSource {
    from: String,
    bucket: String,
    pattern: Option<Regex>,
    options: ListOptions,
}

impl List {
    /// Creates a listing task for the given source URI.
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            project_id: None,
            all_versions: None,
            filter: Filter::default(),
            listing_type: ListingType::default(),
            reg_exp: None,
        }
    }

    /// Sets the project override.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Requests a listing of every object generation.
    pub fn with_all_versions(mut self, all_versions: bool) -> Self {
        self.all_versions = Some(all_versions);
        self
    }

    /// Sets the output filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the listing shape.
    pub fn with_listing_type(mut self, listing_type: ListingType) -> Self {
        self.listing_type = listing_type;
        self
    }

    /// Sets the pattern an entry URI must match entirely.
    pub fn with_reg_exp(mut self, reg_exp: impl Into<String>) -> Self {
        self.reg_exp = Some(reg_exp.into());
        self
    }

    /// Runs the listing against a fresh connection.
    ///
    /// The source resolves first, so a malformed URI or pattern surfaces
    /// before credential bootstrap. Then connects with the rendered project
    /// override and runs the shared pipeline.
    pub async fn run(&self, ctx: &RunContext) -> Result<ListOutput> {
        let source = self.resolve(ctx)?;

        let project_id = ctx.render_opt(self.project_id.as_deref())?;
        let connection = GcsConnection::connect(project_id).await?;

        self.collect(ctx, &connection, source).await
    }

    /// Runs the listing against the given backend.
    pub async fn run_with(&self, ctx: &RunContext, lister: &dyn BlobLister) -> Result<ListOutput> {
        let source = self.resolve(ctx)?;

        self.collect(ctx, lister, source).await
    }

    /// Renders and validates the configured source.
    fn resolve(&self, ctx: &RunContext) -> Result<ResolvedSource> {
        let from = ctx.render(&self.from)?;

        let source = Url::parse(&from).map_err(|e| Error::invalid_uri(&from, e.to_string()))?;
        let bucket = source
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| Error::invalid_uri(&from, "missing bucket authority"))?
            .to_string();

        let pattern = self.reg_exp.as_deref().map(compile_full_match).transpose()?;
        let options = self.list_options(&from, &source)?;

        Ok(ResolvedSource {
            from,
            bucket,
            pattern,
            options,
        })
    }

    /// Drains the backend stream, keeping the entries the filters retain.
    async fn collect(
        &self,
        ctx: &RunContext,
        lister: &dyn BlobLister,
        source: ResolvedSource,
    ) -> Result<ListOutput> {
        tracing::debug!(
            target: TRACING_TARGET_TASKS,
            run_id = %ctx.run_id(),
            bucket = %source.bucket,
            filter = self.filter.as_ref(),
            listing_type = self.listing_type.as_ref(),
            "Listing bucket"
        );

        let mut blobs = Vec::new();
        let mut stream = lister.list(&source.bucket, &source.options);
        while let Some(blob) = stream.try_next().await? {
            if !self.filter.retains(&blob) {
                continue;
            }
            if let Some(pattern) = &source.pattern {
                if !pattern.is_match(&blob.uri) {
                    continue;
                }
            }
            blobs.push(blob);
        }

        ctx.metric(Counter::of("size", blobs.len() as u64));
        tracing::debug!(
            target: TRACING_TARGET_TASKS,
            run_id = %ctx.run_id(),
            count = blobs.len(),
            from = %source.from,
            "Found blobs"
        );

        Ok(ListOutput { blobs })
    }

    /// Builds the backend options from the parsed source.
    ///
    /// The parser keeps the path percent-encoded; the backend takes raw key
    /// prefixes, so the stripped path is decoded before it is applied.
    fn list_options(&self, from: &str, source: &Url) -> Result<ListOptions> {
        let mut options = ListOptions::new();

        let path = source.path();
        let encoded = path.strip_prefix('/').unwrap_or(path);
        let prefix = percent_decode_str(encoded)
            .decode_utf8()
            .map_err(|e| Error::invalid_uri(from, e.to_string()))?;
        if !prefix.is_empty() {
            options = options.with_prefix(prefix);
        }
        if let Some(all_versions) = self.all_versions {
            options = options.with_versions(all_versions);
        }
        if self.listing_type == ListingType::Directory {
            options = options.with_current_directory();
        }

        Ok(options)
    }
}

/// Compiles `pattern` anchored on both ends, so entries are selected only
/// when their whole URI matches.
fn compile_full_match(pattern: &str) -> Result<Regex> {
    Regex::new(&format!(r"\A(?:{pattern})\z")).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[async_trait]
impl RunnableTask for List {
    type Output = ListOutput;

    async fn run(&self, ctx: &RunContext) -> Result<ListOutput, BoxedError> {
        List::run(self, ctx).await.map_err(Into::into)
    }
}
