//! Task execution contract.

use async_trait::async_trait;
use serde::Serialize;

use crate::{BoxedError, RunContext};

/// A unit of work executed by the engine against a run context.
///
/// Implementations deserialize from a workflow definition, render their
/// templated fields through the [`RunContext`], perform their work, and
/// return a structured output the engine serializes and persists. Errors
/// cross the seam as boxed trait objects so each task crate can keep its
/// own error type.
#[async_trait]
pub trait RunnableTask: Send + Sync {
    /// Structured output produced by a successful run.
    type Output: Serialize + Send;

    /// Executes the task.
    async fn run(&self, ctx: &RunContext) -> Result<Self::Output, BoxedError>;
}
