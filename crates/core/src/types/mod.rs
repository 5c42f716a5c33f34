//! Core domain types for `stackparams`.
//!
//! - **`document`**: the parameter document tree read from disk
//! - **`context`**: the accumulator produced by one merge pass
//! - **`safe`**: options for constructing an encryption safe

pub mod context;
pub mod document;
pub mod safe;

pub use context::*;
pub use document::*;
pub use safe::*;
