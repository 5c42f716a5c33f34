//! Shared utilities and pure functions for stackparams
//!
//! Name normalisation used by the safe factory, the resolver registry and
//! the merge engine lives here, next to file writing and tracing setup.

pub mod atomic_file;
pub mod case;
pub mod tracing;

pub use atomic_file::*;
pub use case::*;
