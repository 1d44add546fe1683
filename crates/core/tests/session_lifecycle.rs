//! Integration tests for the streaming session protocol.

use hashbridge_core::{digest, load_builtin, ready, HashInput, Session};
use serde_json::json;

fn ensure_engine() {
    let _ = load_builtin();
}

fn digest_split(bytes: &[u8], split_at: usize, bits: Option<u32>) -> Vec<u8> {
    let mut session = Session::init(bits).unwrap();
    session.update(&bytes[..split_at]).unwrap();
    session.update(&bytes[split_at..]).unwrap();
    let out = session.finalize().unwrap();
    session.cleanup();
    out
}

/// Streaming equivalence: for any split b = b1 ++ b2, updating twice equals
/// updating once with the whole input, for the same digest size.
#[test]
fn test_streaming_equivalence_over_splits() {
    ensure_engine();

    let bytes: Vec<u8> = (0..=255).collect();

    let mut whole = Session::init(Some(512)).unwrap();
    whole.update(&bytes).unwrap();
    let reference = whole.finalize().unwrap();
    whole.cleanup();

    for split_at in [0, 1, 37, 128, 255, 256] {
        assert_eq!(
            digest_split(&bytes, split_at, Some(512)),
            reference,
            "split at {split_at} diverged"
        );
    }

    // The session result also matches the one-shot path.
    assert_eq!(digest(&bytes[..], Some(512)).unwrap(), reference);
}

/// The "hello" update-split variants: one call with all five bytes vs two
/// calls with two then three, identical digests every time.
#[test]
fn test_hello_split_variants_agree() {
    ensure_engine();

    let one_call = digest("hello", None).unwrap();
    let two_then_three = digest_split(b"hello", 2, None);
    let one_then_four = digest_split(b"hello", 1, None);

    assert_eq!(one_call, two_then_three);
    assert_eq!(one_call, one_then_four);
    assert_eq!(one_call.len(), 64);
}

/// Update order is semantically significant: feeding the same chunks in a
/// different order changes the digest.
#[test]
fn test_update_order_matters() {
    ensure_engine();

    let mut ab = Session::init(None).unwrap();
    ab.update(b"alpha").unwrap();
    ab.update(b"beta").unwrap();
    let ab_digest = ab.finalize().unwrap();
    ab.cleanup();

    let mut ba = Session::init(None).unwrap();
    ba.update(b"beta").unwrap();
    ba.update(b"alpha").unwrap();
    let ba_digest = ba.finalize().unwrap();
    ba.cleanup();

    assert_ne!(ab_digest, ba_digest);
}

/// Zero-or-more updates: interleaving empty updates does not change the
/// digest.
#[test]
fn test_empty_updates_are_neutral() {
    ensure_engine();

    let mut padded = Session::init(Some(256)).unwrap();
    padded.update(b"").unwrap();
    padded.update(b"payload").unwrap();
    padded.update(b"").unwrap();
    let padded_digest = padded.finalize().unwrap();
    padded.cleanup();

    assert_eq!(padded_digest, digest(b"payload".as_slice(), Some(256)).unwrap());
}

/// Two sessions may be open concurrently as long as their operations are
/// serialized; interleaving them does not cross-contaminate state.
#[test]
fn test_interleaved_sessions_stay_independent() {
    ensure_engine();

    let mut first = Session::init(Some(512)).unwrap();
    let mut second = Session::init(Some(512)).unwrap();

    first.update(b"first-").unwrap();
    second.update(b"second-").unwrap();
    first.update(b"session").unwrap();
    second.update(b"session").unwrap();

    let first_digest = first.finalize().unwrap();
    let second_digest = second.finalize().unwrap();
    first.cleanup();
    second.cleanup();

    assert_eq!(first_digest, digest(b"first-session".as_slice(), Some(512)).unwrap());
    assert_eq!(second_digest, digest(b"second-session".as_slice(), Some(512)).unwrap());
}

/// Values arriving through the dynamic JSON boundary hash identically to
/// their statically typed equivalents.
#[test]
fn test_json_boundary_matches_static_inputs() {
    ensure_engine();

    let mut session = Session::init(None).unwrap();
    session.update_from_value(HashInput::from_json(&json!("hello")).unwrap()).unwrap();
    let from_json = session.finalize().unwrap();
    session.cleanup();

    assert_eq!(from_json, digest("hello", None).unwrap());
}

/// Awaiting readiness then hashing works end to end.
#[tokio::test]
async fn test_ready_then_digest() {
    ensure_engine();
    ready().await;

    let out = digest("after ready", None).unwrap();
    assert_eq!(out.len(), 64);
}
