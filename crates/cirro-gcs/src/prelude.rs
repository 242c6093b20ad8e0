//! Prelude module for convenient imports.

pub use crate::client::{BlobLister, GcsConnection};
pub use crate::error::{Error, Result};
pub use crate::tasks::{Filter, List, ListOutput, ListingType};
pub use crate::types::{Blob, ListOptions};
