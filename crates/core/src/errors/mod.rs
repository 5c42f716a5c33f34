//! Error types for stackparams operations

mod builders;
mod conversions;
mod types;

pub use builders::*;
pub use types::{Error, Result};
