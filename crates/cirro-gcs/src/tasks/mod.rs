//! Workflow tasks over Cloud Storage buckets.

mod list;

pub use list::{Filter, List, ListOutput, ListingType};
