//! Safe abstraction and factory

use crate::envelope::Envelope;
use crate::ssl::SslSafe;
use stackparams_core::{Error, Result, SafeOptions};
use stackparams_utils::canonical_name;
use std::fmt;

/// Symmetric encryption provider
///
/// Implementations are pure transforms: no I/O and no state carried between
/// calls. The provided method bodies fail with `NotImplemented`, so a variant
/// that forgets to override one fails loudly instead of passing data through.
pub trait Safe: fmt::Debug {
    /// Marker recorded in the envelope's `lock_type` field
    fn lock_type(&self) -> &'static str;

    /// Encrypt plaintext into an envelope
    fn lock(&self, _plaintext: &[u8]) -> Result<Envelope> {
        Err(Error::not_implemented(format!("{}::lock", self.lock_type())))
    }

    /// Recover plaintext from an envelope
    fn unlock(&self, _envelope: &Envelope) -> Result<Vec<u8>> {
        Err(Error::not_implemented(format!("{}::unlock", self.lock_type())))
    }
}

/// Build the safe variant named by `safe_type`
///
/// The name is compared in canonical form, so `ssl`, `Ssl` and `SSL` all
/// select the same variant.
pub fn build(safe_type: &str, options: &SafeOptions) -> Result<Box<dyn Safe>> {
    match canonical_name(safe_type).as_str() {
        SslSafe::LOCK_TYPE => Ok(Box::new(SslSafe::new(options)?)),
        _ => Err(Error::unknown_safe(safe_type)),
    }
}

/// Build the safe variant selected by the options themselves
pub fn from_options(options: &SafeOptions) -> Result<Box<dyn Safe>> {
    build(&options.safe_type, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct BareSafe;

    impl Safe for BareSafe {
        fn lock_type(&self) -> &'static str {
            "bare"
        }
    }

    #[test]
    fn test_unoverridden_methods_are_not_implemented() {
        let lock = BareSafe.lock(b"data").unwrap_err();
        assert!(matches!(lock, Error::NotImplemented { .. }));

        let envelope = Envelope::new("bare");
        let unlock = BareSafe.unlock(&envelope).unwrap_err();
        assert!(matches!(unlock, Error::NotImplemented { .. }));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let options = SafeOptions::with_key("TEST_KEY");
        let err = build("unknown", &options).unwrap_err();
        assert!(matches!(err, Error::UnknownSafe { ref name } if name == "unknown"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_defaults_to_ssl() {
        let options = SafeOptions::with_key("TEST_KEY");
        let safe = from_options(&options).unwrap();
        assert_eq!(safe.lock_type(), "ssl");

        let safe = build("SSL", &options).unwrap();
        assert_eq!(safe.lock_type(), "ssl");
    }
}
