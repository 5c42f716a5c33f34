//! Parameter tree merging
//!
//! [`MergeEngine`] walks a nested parameter document into a flat
//! [`MergeContext`](stackparams_core::MergeContext), resolving indirection
//! values on the way. [`DocumentLoader`] finds and decrypts the document to
//! merge, and [`load_context`] ties both together for one invocation.

mod engine;
mod format;
mod loader;

pub use engine::MergeEngine;
pub use format::DocumentFormat;
pub use loader::{load_context, read_document, DocumentLoader};
