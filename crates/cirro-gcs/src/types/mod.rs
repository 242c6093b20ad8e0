//! Data model for bucket listings.

mod blob;
mod list_options;

pub use blob::Blob;
pub use list_options::ListOptions;
