//! Command-line surface for stackparams
//!
//! The binary in `main.rs` only parses arguments and loads settings; every
//! action lives here so it can be exercised without spawning the binary.

pub mod commands;
pub mod items;

pub use commands::Commands;
