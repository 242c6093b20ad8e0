//! Template rendering for task configuration fields.
//!
//! Configuration strings may reference run variables with `{{ name }}`
//! placeholders. Rendering substitutes every placeholder from the context's
//! variable map and fails if any referenced variable has no value.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// Matches `{{ name }}` placeholders, capturing the variable name.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.-]*)\s*\}\}").expect("placeholder pattern is valid")
});

/// Substitutes `{{ name }}` placeholders in `template` from `vars`.
///
/// Returns the rendered string, or an error naming every placeholder that
/// had no value.
pub(crate) fn render(template: &str, vars: &HashMap<String, String>) -> Result<String> {
    let mut missing = Vec::new();

    let rendered = PLACEHOLDER.replace_all(template, |captures: &regex::Captures<'_>| {
        let name = &captures[1];
        match vars.get(name) {
            Some(value) => value.clone(),
            None => {
                missing.push(name.to_string());
                String::new()
            }
        }
    });

    if !missing.is_empty() {
        return Err(Error::UnresolvedVariables { names: missing });
    }

    Ok(rendered.into_owned())
}
