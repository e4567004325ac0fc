//! Prompt templates module.
//!
//! This module contains the PromptTemplate struct and the small rendering
//! engine behind it. Templates use `{{variable}}` placeholders and
//! `{{#if variable}}...{{else}}...{{/if}}` conditional blocks.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

const IF_OPEN: &str = "{{#if ";
const IF_ELSE: &str = "{{else}}";
const IF_CLOSE: &str = "{{/if}}";

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The template string with placeholders.
    pub template: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            arguments,
            template: template.into(),
        }
    }

    /// Render the template with the given arguments.
    ///
    /// Conditional blocks are resolved first (a variable counts as set when
    /// it is present and non-empty), then `{{variable}}` placeholders are
    /// substituted. Placeholders for absent optional arguments are removed.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let expanded = expand_conditionals(&self.template, arguments)?;
        Ok(substitute(&expanded, arguments))
    }
}

/// Resolve every `{{#if ...}}` block against the supplied arguments.
fn expand_conditionals(
    template: &str,
    arguments: &HashMap<String, String>,
) -> Result<String, PromptError> {
    let mut result = template.to_string();

    while let Some(open) = result.find(IF_OPEN) {
        let name_end = result[open..]
            .find("}}")
            .map(|i| open + i)
            .ok_or_else(|| PromptError::template("Unclosed {{#if}} tag"))?;
        let close = result[name_end..]
            .find(IF_CLOSE)
            .map(|i| name_end + i)
            .ok_or_else(|| PromptError::template("Missing {{/if}} tag"))?;

        let variable = result[open + IF_OPEN.len()..name_end].trim();
        let block = &result[name_end + 2..close];

        let (when_set, when_unset) = match block.find(IF_ELSE) {
            Some(else_pos) => (&block[..else_pos], &block[else_pos + IF_ELSE.len()..]),
            None => (block, ""),
        };

        let is_set = arguments.get(variable).is_some_and(|v| !v.is_empty());
        let chosen = if is_set { when_set } else { when_unset };

        result = format!(
            "{}{}{}",
            &result[..open],
            chosen,
            &result[close + IF_CLOSE.len()..]
        );
    }

    Ok(result)
}

/// Substitute `{{variable}}` placeholders, then drop any that stay unmatched.
fn substitute(template: &str, arguments: &HashMap<String, String>) -> String {
    let mut result = template.to_string();

    for (key, value) in arguments {
        result = result.replace(&format!("{{{{{key}}}}}"), value);
    }

    // Remaining simple placeholders belong to optional arguments that were
    // not supplied.
    let mut cleaned = String::with_capacity(result.len());
    let mut rest = result.as_str();
    while let Some(start) = rest.find("{{") {
        cleaned.push_str(&rest[..start]);
        match rest[start..].find("}}") {
            Some(end) => rest = &rest[start + end + 2..],
            None => {
                rest = &rest[start..];
                break;
            }
        }
    }
    cleaned.push_str(rest);
    cleaned
}
