//! Parameter document types

use crate::errors::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded document tree: mappings, sequences and scalars
///
/// Object key order is preserved, so documents survive a decode/encode cycle
/// without reshuffling.
pub type Document = Value;

/// One node of a nested parameter document
///
/// Fields that are absent decode to their empty defaults. Unknown fields
/// (for instance the lock marker) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterDocument {
    /// Template file for the deployment; only honoured at the root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Template parameters, literal values or resolver indirections
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Value>,

    /// Compile time parameters, literal values or resolver indirections
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub compile_parameters: IndexMap<String, Value>,

    /// Nested documents for child stacks
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub stacks: IndexMap<String, ParameterDocument>,

    /// Output mappings to apply from other stacks
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub mappings: IndexMap<String, String>,

    /// Tags applied to the deployment
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub tags: IndexMap<String, String>,

    /// Additional stacks whose outputs should be applied
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub apply_stacks: Vec<String>,
}

impl ParameterDocument {
    /// Interpret a decoded document tree as a parameter document
    pub fn from_document(document: Document) -> Result<Self> {
        if document.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(document)?)
    }

    /// Whether the document declares nothing at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.template.is_none()
            && self.parameters.is_empty()
            && self.compile_parameters.is_empty()
            && self.stacks.is_empty()
            && self.mappings.is_empty()
            && self.tags.is_empty()
            && self.apply_stacks.is_empty()
    }
}
