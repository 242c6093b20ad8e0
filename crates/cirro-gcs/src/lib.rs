#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CLIENT: &str = "cirro_gcs::client";
pub const TRACING_TARGET_TASKS: &str = "cirro_gcs::tasks";

pub mod client;
mod error;
pub mod tasks;
pub mod types;

#[doc(hidden)]
pub mod prelude;

pub use client::{BlobLister, GcsConnection};
pub use error::{Error, Result};
pub use tasks::{Filter, List, ListOutput, ListingType};
pub use types::{Blob, ListOptions};
