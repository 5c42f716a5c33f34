//! Persisted encrypted form of a document

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stackparams_core::{Document, Error, Result, LOCK_TYPE_KEY};

/// URL-safe alphabet; pads on output, accepts input with or without padding
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Field names owned by the envelope itself
const ENVELOPE_FIELDS: &[&str] = &[LOCK_TYPE_KEY, "iv", "salt", "cipher", "content"];

/// Self-describing encrypted document
///
/// Carries everything needed to reverse the transform except the shared
/// key. Fields the envelope does not know about are kept in `extra` and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub lock_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cipher: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Empty envelope for the given safe variant
    #[must_use]
    pub fn new(lock_type: impl Into<String>) -> Self {
        Self {
            lock_type: lock_type.into(),
            iv: None,
            salt: None,
            cipher: None,
            content: None,
            extra: Map::new(),
        }
    }

    /// Parse an envelope out of a decoded document
    pub fn from_document(document: Document) -> Result<Self> {
        match document.get(LOCK_TYPE_KEY) {
            Some(Value::String(_)) => Ok(serde_json::from_value(document)?),
            Some(_) => Err(Error::invalid_envelope_field(
                LOCK_TYPE_KEY,
                "must be a string",
            )),
            None => Err(Error::malformed_envelope(LOCK_TYPE_KEY)),
        }
    }

    /// Convert into a document ready for encoding
    pub fn into_document(self) -> Result<Document> {
        Ok(serde_json::to_value(self)?)
    }

    /// Attach metadata alongside the envelope. Keys that collide with an
    /// envelope field or existing metadata are ignored.
    pub fn retain_metadata(&mut self, metadata: Map<String, Value>) {
        for (key, value) in metadata {
            if ENVELOPE_FIELDS.contains(&key.as_str()) {
                continue;
            }
            self.extra.entry(key).or_insert(value);
        }
    }

    /// Decoded initialization vector
    pub fn iv_bytes(&self) -> Result<Vec<u8>> {
        decode_field("iv", self.iv.as_deref())
    }

    /// Decoded key derivation salt
    pub fn salt_bytes(&self) -> Result<Vec<u8>> {
        decode_field("salt", self.salt.as_deref())
    }

    /// Decoded ciphertext
    pub fn content_bytes(&self) -> Result<Vec<u8>> {
        decode_field("content", self.content.as_deref())
    }
}

/// Encode bytes for storage in an envelope field
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE.encode(bytes)
}

fn decode_field(field: &str, value: Option<&str>) -> Result<Vec<u8>> {
    let value = value.ok_or_else(|| Error::malformed_envelope(field))?;
    URL_SAFE
        .decode(value)
        .map_err(|e| Error::invalid_envelope_field(field, format!("is not valid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_order_and_extras_survive() {
        let doc = json!({
            "lock_type": "ssl",
            "iv": "aXY=",
            "salt": "c2FsdA==",
            "cipher": "AES-256-CBC",
            "content": "Y29udGVudA==",
            "owner": "platform-team"
        });
        let envelope = Envelope::from_document(doc.clone()).unwrap();
        assert_eq!(envelope.extra["owner"], json!("platform-team"));

        let written = serde_json::to_string(&envelope.into_document().unwrap()).unwrap();
        assert_eq!(written, serde_json::to_string(&doc).unwrap());
    }

    #[test]
    fn test_missing_lock_type() {
        let err = Envelope::from_document(json!({"iv": "aXY="})).unwrap_err();
        assert!(matches!(err, Error::MalformedEnvelope { ref field, .. } if field == "lock_type"));
    }

    #[test]
    fn test_missing_field_is_named() {
        let envelope = Envelope::new("ssl");
        let err = envelope.iv_bytes().unwrap_err();
        assert!(matches!(err, Error::MalformedEnvelope { ref field, .. } if field == "iv"));
    }

    #[test]
    fn test_decoding_accepts_unpadded_input() {
        let mut envelope = Envelope::new("ssl");
        envelope.salt = Some("c2FsdA".to_string());
        assert_eq!(envelope.salt_bytes().unwrap(), b"salt");
        assert_eq!(encode(b"salt"), "c2FsdA==");
    }

    #[test]
    fn test_invalid_base64_is_malformed() {
        let mut envelope = Envelope::new("ssl");
        envelope.content = Some("not base64!".to_string());
        let err = envelope.content_bytes().unwrap_err();
        assert!(matches!(err, Error::MalformedEnvelope { ref field, .. } if field == "content"));
    }

    #[test]
    fn test_metadata_does_not_clobber_envelope_fields() {
        let mut envelope = Envelope::new("ssl");
        envelope.iv = Some("aXY=".to_string());
        let mut metadata = Map::new();
        metadata.insert("iv".to_string(), json!("forged"));
        metadata.insert("note".to_string(), json!("kept"));
        envelope.retain_metadata(metadata);

        assert_eq!(envelope.iv.as_deref(), Some("aXY="));
        assert!(!envelope.extra.contains_key("iv"));
        assert_eq!(envelope.extra["note"], json!("kept"));
    }
}
