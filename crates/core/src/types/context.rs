//! Merge accumulator produced by walking a parameter document

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;

/// Flat configuration built by one merge pass
///
/// The context is owned by the merge call that fills it and handed to the
/// deployment tool afterwards. It is never shared between passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeContext {
    /// Template parameters keyed by flattened path
    pub parameters: IndexMap<String, Value>,

    /// Compile time parameters keyed by flattened path
    pub compile_parameters: IndexMap<String, Value>,

    /// Stacks whose outputs are applied, in first-seen order without duplicates
    pub apply_stack: IndexSet<String>,

    /// Output mapping targets keyed by mapping name
    pub apply_mapping: IndexMap<String, String>,

    /// Deployment tags
    pub tags: IndexMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
}

impl MergeContext {
    /// Create an empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Template file selected for the deployment, if any
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Set the template file. Only the first assignment sticks; returns
    /// whether this call set it.
    pub fn set_file(&mut self, file: impl Into<String>) -> bool {
        if self.file.is_some() {
            return false;
        }
        self.file = Some(file.into());
        true
    }

    /// Append a stack name unless it is already present
    pub fn push_apply_stack(&mut self, name: impl Into<String>) -> bool {
        self.apply_stack.insert(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_is_set_once() {
        let mut ctx = MergeContext::new();
        assert!(ctx.set_file("first.rb"));
        assert!(!ctx.set_file("second.rb"));
        assert_eq!(ctx.file(), Some("first.rb"));
    }

    #[test]
    fn test_apply_stack_keeps_first_seen_order() {
        let mut ctx = MergeContext::new();
        assert!(ctx.push_apply_stack("b"));
        assert!(ctx.push_apply_stack("a"));
        assert!(!ctx.push_apply_stack("b"));
        let names: Vec<&str> = ctx.apply_stack.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
