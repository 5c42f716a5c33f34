//! Document-level lock and unlock

use crate::envelope::Envelope;
use crate::safe::build;
use serde_json::{Map, Value};
use stackparams_core::{Document, Error, Result, SafeOptions, LOCK_ENABLED_KEY, LOCK_TYPE_KEY};
use tracing::{debug, instrument};

/// Locks and unlocks whole parameter documents with a configured safe
#[derive(Debug, Clone)]
pub struct Locker {
    options: SafeOptions,
}

impl Locker {
    #[must_use]
    pub fn new(options: SafeOptions) -> Self {
        Self { options }
    }

    /// Encrypt a document, marking it lock-enabled first
    pub fn lock_content(&self, document: Document) -> Result<Document> {
        self.lock_content_with(document, Map::new())
    }

    /// Encrypt a document and carry `metadata` alongside the envelope fields
    #[instrument(level = "debug", skip_all, fields(safe = %self.options.safe_type))]
    pub fn lock_content_with(
        &self,
        document: Document,
        metadata: Map<String, Value>,
    ) -> Result<Document> {
        let Value::Object(mut fields) = document else {
            return Err(Error::configuration("only mapping documents can be locked"));
        };
        fields.insert(LOCK_ENABLED_KEY.to_string(), Value::Bool(true));

        let plaintext = serde_json::to_vec(&Value::Object(fields))?;
        let safe = build(&self.options.safe_type, &self.options)?;
        let mut envelope = safe.lock(&plaintext)?;
        envelope.retain_metadata(metadata);

        debug!(lock_type = %envelope.lock_type, "document locked");
        envelope.into_document()
    }

    /// Decrypt a locked document; unlocked documents are returned unchanged
    ///
    /// The safe variant is taken from the envelope's own `lock_type`, while
    /// the key and iteration count come from the configured options.
    #[instrument(level = "debug", skip_all)]
    pub fn unlock_content(&self, document: Document) -> Result<Document> {
        if !is_locked(&document) {
            return Ok(document);
        }

        let envelope = Envelope::from_document(document)?;
        let safe = build(&envelope.lock_type, &self.options)?;
        let plaintext = safe.unlock(&envelope)?;

        let mut unlocked: Value = serde_json::from_slice(&plaintext)?;
        let Value::Object(fields) = &mut unlocked else {
            return Err(Error::crypto("unlock", "decrypted content is not a mapping"));
        };
        fields.insert(LOCK_ENABLED_KEY.to_string(), Value::Bool(true));

        debug!(lock_type = %envelope.lock_type, "document unlocked");
        Ok(unlocked)
    }
}

/// Whether a document is an encrypted envelope
#[must_use]
pub fn is_locked(document: &Document) -> bool {
    matches!(document.get(LOCK_TYPE_KEY), Some(v) if !v.is_null())
}

/// Whether a plaintext document is marked for re-locking on save
#[must_use]
pub fn is_lock_enabled(document: &Document) -> bool {
    matches!(document.get(LOCK_ENABLED_KEY), Some(Value::Bool(true)))
}

/// Remove the lock-enabled marker, returning whether it was set
pub fn strip_lock_marker(document: &mut Document) -> bool {
    match document.as_object_mut() {
        Some(fields) => matches!(fields.shift_remove(LOCK_ENABLED_KEY), Some(Value::Bool(true))),
        None => false,
    }
}
