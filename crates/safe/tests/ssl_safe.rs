//! End-to-end checks for the SSL safe through its public surface

use proptest::prelude::*;
use serde_json::json;
use stackparams_core::{Error, SafeOptions};
use stackparams_safe::{build, strip_lock_marker, Envelope, Locker, Safe};

fn options(key: &str) -> SafeOptions {
    SafeOptions::with_key(key).iterations(32)
}

#[test]
fn test_round_trip_with_default_algorithm() {
    let safe = build("ssl", &options("TEST_KEY")).unwrap();
    let envelope = safe.lock(b"TEST_DATA").unwrap();

    let document = envelope.clone().into_document().unwrap();
    for field in ["lock_type", "iv", "salt", "cipher", "content"] {
        assert!(document.get(field).is_some(), "missing {field}");
    }

    let reloaded = Envelope::from_document(document).unwrap();
    let ciphertext = reloaded.content_bytes().unwrap();
    assert!(!ciphertext.is_empty());
    assert_ne!(ciphertext, b"TEST_DATA");
    assert_eq!(safe.unlock(&reloaded).unwrap(), b"TEST_DATA");
}

#[test]
fn test_wrong_key_does_not_recover_plaintext() {
    let envelope = build("ssl", &options("TEST_KEY"))
        .unwrap()
        .lock(b"TEST_DATA")
        .unwrap();
    let other = build("ssl", &options("OTHER_KEY")).unwrap();

    match other.unlock(&envelope) {
        Ok(bytes) => assert_ne!(bytes, b"TEST_DATA"),
        Err(err) => assert!(matches!(err, Error::Crypto { .. })),
    }
}

#[test]
fn test_tampered_content_is_malformed() {
    let safe = build("ssl", &options("TEST_KEY")).unwrap();
    let mut envelope = safe.lock(b"TEST_DATA").unwrap();
    envelope.content = Some("%%%".to_string());

    let err = safe.unlock(&envelope).unwrap_err();
    assert!(matches!(err, Error::MalformedEnvelope { ref field, .. } if field == "content"));
}

#[test]
fn test_missing_iv_is_malformed() {
    let safe = build("ssl", &options("TEST_KEY")).unwrap();
    let mut document = safe.lock(b"TEST_DATA").unwrap().into_document().unwrap();
    document.as_object_mut().unwrap().shift_remove("iv");

    let envelope = Envelope::from_document(document).unwrap();
    let err = safe.unlock(&envelope).unwrap_err();
    assert!(matches!(err, Error::MalformedEnvelope { ref field, .. } if field == "iv"));
}

#[test]
fn test_missing_content_is_malformed() {
    let safe = build("ssl", &options("TEST_KEY")).unwrap();
    let mut document = safe.lock(b"TEST_DATA").unwrap().into_document().unwrap();
    document.as_object_mut().unwrap().shift_remove("content");

    let envelope = Envelope::from_document(document).unwrap();
    let err = safe.unlock(&envelope).unwrap_err();
    assert!(matches!(err, Error::MalformedEnvelope { ref field, .. } if field == "content"));
}

#[test]
fn test_locked_documents_survive_key_reuse_across_lockers() {
    let doc = json!({
        "template": "app",
        "parameters": {"db__password": "hunter2"},
        "stacks": {"network": {}}
    });
    let locked = Locker::new(options("TEST_KEY")).lock_content(doc.clone()).unwrap();
    let text = serde_json::to_string_pretty(&locked).unwrap();

    let reparsed = serde_json::from_str(&text).unwrap();
    let mut unlocked = Locker::new(options("TEST_KEY")).unlock_content(reparsed).unwrap();
    strip_lock_marker(&mut unlocked);
    assert_eq!(unlocked, doc);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_lock_unlock_recovers_bytes(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let safe = build("ssl", &options("TEST_KEY")).unwrap();
        let envelope = safe.lock(&data).unwrap();
        prop_assert_eq!(safe.unlock(&envelope).unwrap(), data);
    }
}
