//! Password-based AES-CBC safe

use crate::envelope::{encode, Envelope};
use crate::safe::Safe;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use sha1::Sha1;
use stackparams_core::{Error, Result, SafeOptions, SecretKey};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use zeroize::Zeroizing;

const IV_LEN: usize = 16;
const SALT_LEN: usize = 16;

/// Block cipher modes the SSL safe can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherKind {
    Aes128Cbc,
    Aes192Cbc,
    Aes256Cbc,
}

impl CipherKind {
    /// Canonical cipher name as written into envelopes
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CipherKind::Aes128Cbc => "AES-128-CBC",
            CipherKind::Aes192Cbc => "AES-192-CBC",
            CipherKind::Aes256Cbc => "AES-256-CBC",
        }
    }

    /// Key length in bytes
    #[must_use]
    pub fn key_len(self) -> usize {
        match self {
            CipherKind::Aes128Cbc => 16,
            CipherKind::Aes192Cbc => 24,
            CipherKind::Aes256Cbc => 32,
        }
    }

    fn encrypt(self, key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let ciphertext = match self {
            CipherKind::Aes128Cbc => cbc::Encryptor::<aes::Aes128>::new_from_slices(key, iv)
                .map_err(invalid_length)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            CipherKind::Aes192Cbc => cbc::Encryptor::<aes::Aes192>::new_from_slices(key, iv)
                .map_err(invalid_length)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            CipherKind::Aes256Cbc => cbc::Encryptor::<aes::Aes256>::new_from_slices(key, iv)
                .map_err(invalid_length)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        };
        Ok(ciphertext)
    }

    fn decrypt(self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let plaintext = match self {
            CipherKind::Aes128Cbc => cbc::Decryptor::<aes::Aes128>::new_from_slices(key, iv)
                .map_err(invalid_length)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            CipherKind::Aes192Cbc => cbc::Decryptor::<aes::Aes192>::new_from_slices(key, iv)
                .map_err(invalid_length)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            CipherKind::Aes256Cbc => cbc::Decryptor::<aes::Aes256>::new_from_slices(key, iv)
                .map_err(invalid_length)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        };
        plaintext.map_err(|_| Error::crypto("unlock", "bad decrypt (wrong key or corrupted content)"))
    }
}

impl FromStr for CipherKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "AES-128-CBC" => Ok(CipherKind::Aes128Cbc),
            "AES-192-CBC" => Ok(CipherKind::Aes192Cbc),
            "AES-256-CBC" => Ok(CipherKind::Aes256Cbc),
            _ => Err(Error::configuration(format!("unsupported cipher `{s}`"))),
        }
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn invalid_length(e: cbc::cipher::InvalidLength) -> Error {
    Error::crypto("initialize cipher", e.to_string())
}

/// Safe keyed by a shared passphrase
///
/// Each lock derives a fresh key with PBKDF2-HMAC-SHA1 over the configured
/// salt (or a random one) and encrypts under a random IV. Unlock reads the
/// salt, IV and cipher back out of the envelope, so envelopes stay readable
/// after the configured cipher or salt changes.
pub struct SslSafe {
    key: SecretKey,
    cipher: CipherKind,
    iterations: u32,
    salt: Option<String>,
}

impl SslSafe {
    pub const LOCK_TYPE: &'static str = "ssl";

    /// Validate options and build the safe
    pub fn new(options: &SafeOptions) -> Result<Self> {
        let key = match &options.key {
            Some(key) if !key.is_empty() => key.clone(),
            _ => return Err(Error::missing_key(Self::LOCK_TYPE)),
        };

        let cipher: CipherKind = options.cipher.parse()?;
        if options.key_length != cipher.key_len() {
            return Err(Error::configuration(format!(
                "key length {} does not match cipher {cipher} ({} bytes)",
                options.key_length,
                cipher.key_len()
            )));
        }
        if options.iterations == 0 {
            return Err(Error::configuration("iterations must be greater than zero"));
        }

        Ok(Self {
            key,
            cipher,
            iterations: options.iterations,
            salt: options.salt.clone(),
        })
    }

    fn derive_key(&self, cipher: CipherKind, salt: &[u8]) -> Zeroizing<Vec<u8>> {
        let mut derived = Zeroizing::new(vec![0u8; cipher.key_len()]);
        pbkdf2::pbkdf2_hmac::<Sha1>(
            self.key.expose().as_bytes(),
            salt,
            self.iterations,
            &mut derived,
        );
        derived
    }

    fn lock_salt(&self) -> Vec<u8> {
        match &self.salt {
            Some(salt) => salt.as_bytes().to_vec(),
            None => {
                let mut salt = vec![0u8; SALT_LEN];
                OsRng.fill_bytes(&mut salt);
                salt
            }
        }
    }
}

impl fmt::Debug for SslSafe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SslSafe")
            .field("cipher", &self.cipher)
            .field("iterations", &self.iterations)
            .field("fixed_salt", &self.salt.is_some())
            .finish_non_exhaustive()
    }
}

impl Safe for SslSafe {
    fn lock_type(&self) -> &'static str {
        Self::LOCK_TYPE
    }

    fn lock(&self, plaintext: &[u8]) -> Result<Envelope> {
        debug!(cipher = %self.cipher, iterations = self.iterations, "locking content");

        let salt = self.lock_salt();
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let key = self.derive_key(self.cipher, &salt);
        let ciphertext = self.cipher.encrypt(&key, &iv, plaintext)?;

        let mut envelope = Envelope::new(Self::LOCK_TYPE);
        envelope.iv = Some(encode(&iv));
        envelope.salt = Some(encode(&salt));
        envelope.cipher = Some(self.cipher.name().to_string());
        envelope.content = Some(encode(&ciphertext));
        Ok(envelope)
    }

    fn unlock(&self, envelope: &Envelope) -> Result<Vec<u8>> {
        let iv = envelope.iv_bytes()?;
        let salt = envelope.salt_bytes()?;
        let ciphertext = envelope.content_bytes()?;
        let cipher = match envelope.cipher.as_deref() {
            Some(name) => name.parse()?,
            None => self.cipher,
        };

        debug!(cipher = %cipher, iterations = self.iterations, "unlocking content");

        if iv.len() != IV_LEN {
            return Err(Error::invalid_envelope_field(
                "iv",
                format!("must decode to {IV_LEN} bytes, got {}", iv.len()),
            ));
        }

        let key = self.derive_key(cipher, &salt);
        cipher.decrypt(&key, &iv, &ciphertext)
    }
}
