//! Per-invocation context handed to running tasks.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use derive_builder::Builder;
use tracing::debug;
use uuid::Uuid;

use crate::{Counter, Result, TRACING_TARGET, render};

/// Execution context for a single task run.
///
/// Carries the variables available to template rendering and collects the
/// counters a task records while it runs. Tasks hold a shared reference, so
/// counter recording uses interior mutability.
#[derive(Debug, Builder)]
#[builder(pattern = "owned", setter(into, prefix = "with"))]
pub struct RunContext {
    /// Identifier of this task invocation.
    #[builder(default = "Uuid::now_v7()")]
    run_id: Uuid,
    /// Variables available to template rendering.
    #[builder(default)]
    vars: HashMap<String, String>,
    /// Counters recorded during the run.
    #[builder(default, setter(skip))]
    metrics: Mutex<Vec<Counter>>,
}

impl RunContext {
    /// Creates an empty context with a fresh run identifier.
    pub fn new() -> Self {
        Self {
            run_id: Uuid::now_v7(),
            vars: HashMap::new(),
            metrics: Mutex::new(Vec::new()),
        }
    }

    /// Returns a builder for creating a run context.
    pub fn builder() -> RunContextBuilder {
        RunContextBuilder::default()
    }

    /// Adds a variable available to template rendering.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Returns the identifier of this invocation.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Returns the value of a variable, if set.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Renders `{{ name }}` placeholders in `template` from the context
    /// variables.
    ///
    /// Fails if any referenced variable has no value.
    pub fn render(&self, template: &str) -> Result<String> {
        render::render(template, &self.vars)
    }

    /// Renders an optional templated field.
    pub fn render_opt(&self, template: Option<&str>) -> Result<Option<String>> {
        template.map(|template| self.render(template)).transpose()
    }

    /// Records a counter against this run.
    pub fn metric(&self, counter: Counter) {
        debug!(
            target: TRACING_TARGET,
            run_id = %self.run_id,
            name = counter.name(),
            value = counter.value(),
            "Recorded counter metric"
        );

        self.metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(counter);
    }

    /// Returns a snapshot of the counters recorded so far.
    pub fn metrics(&self) -> Vec<Counter> {
        self.metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
