//! The record handed to storage and rendering collaborators.

use serde::{Deserialize, Serialize};

use crate::override_rule::OverrideRule;

/// A guest name together with its resolved Gujarati form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    /// The name exactly as the user entered it.
    pub original_text: String,
    /// Gujarati text, or the original when nothing could be resolved.
    pub resolved_text: String,
    /// The override token was present and its target made it into the output.
    pub override_applied: bool,
}

impl NameEntry {
    pub fn new(original_text: &str, resolved_text: String, rule: &OverrideRule) -> Self {
        let override_applied =
            rule.matches(original_text) && resolved_text.contains(rule.target());
        Self {
            original_text: original_text.to_string(),
            resolved_text,
            override_applied,
        }
    }

    /// Whether resolution changed the text at all.
    pub fn is_translated(&self) -> bool {
        self.original_text != self.resolved_text
    }
}
