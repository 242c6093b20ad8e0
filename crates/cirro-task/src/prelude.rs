//! Prelude module for convenient imports.

pub use crate::context::{RunContext, RunContextBuilder};
pub use crate::error::{BoxedError, Error, Result};
pub use crate::metric::Counter;
pub use crate::task::RunnableTask;
