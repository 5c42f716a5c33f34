//! Options for constructing an encryption safe

use crate::constants::{DEFAULT_CIPHER, DEFAULT_ITERATIONS, DEFAULT_KEY_LENGTH, DEFAULT_SAFE_TYPE};
use serde::Deserialize;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Shared secret used to derive encryption keys; wiped on drop
#[derive(Clone, PartialEq, Eq, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the raw secret
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl From<&str> for SecretKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for SecretKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

/// Safe selection and algorithm parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SafeOptions {
    /// Safe variant name, e.g. `ssl`
    #[serde(rename = "type")]
    pub safe_type: String,

    /// Shared secret; required by every variant
    pub key: Option<SecretKey>,

    /// Cipher name, e.g. `AES-256-CBC`
    pub cipher: String,

    /// Key derivation iteration count
    pub iterations: u32,

    /// Derived key length in bytes
    pub key_length: usize,

    /// Fixed salt; a random salt is generated per lock when unset
    pub salt: Option<String>,
}

impl SafeOptions {
    /// Options for the default safe using the given key
    #[must_use]
    pub fn with_key(key: impl Into<SecretKey>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Set a fixed salt
    #[must_use]
    pub fn salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    /// Set the iteration count
    #[must_use]
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the cipher name
    #[must_use]
    pub fn cipher(mut self, cipher: impl Into<String>) -> Self {
        self.cipher = cipher.into();
        self
    }
}

impl Default for SafeOptions {
    fn default() -> Self {
        Self {
            safe_type: DEFAULT_SAFE_TYPE.to_string(),
            key: None,
            cipher: DEFAULT_CIPHER.to_string(),
            iterations: DEFAULT_ITERATIONS,
            key_length: DEFAULT_KEY_LENGTH,
            salt: None,
        }
    }
}
