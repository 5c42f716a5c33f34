//! Encryption safes for parameter documents
//!
//! A [`Safe`] turns plaintext bytes into a self-describing [`Envelope`] and
//! back. [`Locker`] sits on top and handles whole documents: marking them as
//! lock-enabled, serialising, and recognising envelopes on the way back in.

mod content;
mod envelope;
mod safe;
mod ssl;

pub use content::{is_lock_enabled, is_locked, strip_lock_marker, Locker};
pub use envelope::Envelope;
pub use safe::{build, from_options, Safe};
pub use ssl::{CipherKind, SslSafe};
