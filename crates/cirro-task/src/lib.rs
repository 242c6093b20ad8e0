#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constant for consistent logging
pub const TRACING_TARGET: &str = "cirro_task";

mod context;
mod error;
mod metric;
mod render;
mod task;

#[doc(hidden)]
pub mod prelude;

pub use context::{RunContext, RunContextBuilder, RunContextBuilderError};
pub use error::{BoxedError, Error, Result};
pub use metric::Counter;
pub use task::RunnableTask;
