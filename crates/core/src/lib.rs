//! Core domain types, errors, and constants for `stackparams`.
//!
//! Every other crate in the workspace builds on these pieces:
//!
//! - **`errors`**: the shared `Error` enum and `Result` alias. Configuration
//!   failures, malformed envelopes, resolver misses and crypto failures all
//!   surface through it.
//! - **`types`**: the parameter document tree, the merge accumulator and the
//!   options used to build a safe.
//! - **`constants`**: marker keys, defaults and environment variable names.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
