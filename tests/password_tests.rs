use quillpost::password::{hash_password, verify_password};

#[test]
fn test_hash_then_verify_roundtrip() {
    let digest = hash_password("correct horse battery staple").unwrap();
    assert!(verify_password(&digest, "correct horse battery staple"));
}

#[test]
fn test_verify_rejects_wrong_password() {
    let digest = hash_password("pw123").unwrap();
    assert!(!verify_password(&digest, "pw124"));
    assert!(!verify_password(&digest, ""));
}

#[test]
fn test_digest_is_self_describing() {
    // The PHC string embeds the algorithm identifier, parameters, and salt,
    // so verification needs nothing but the digest itself.
    let digest = hash_password("pw123").unwrap();
    assert!(
        digest.starts_with("$pbkdf2-sha256$"),
        "unexpected digest format: {digest}"
    );
    assert!(digest.contains("i="), "iteration count missing: {digest}");
}

#[test]
fn test_same_password_hashes_differently() {
    // Per-call random salt: two digests of the same plaintext must differ,
    // and both must still verify.
    let a = hash_password("pw123").unwrap();
    let b = hash_password("pw123").unwrap();
    assert_ne!(a, b);
    assert!(verify_password(&a, "pw123"));
    assert!(verify_password(&b, "pw123"));
}

#[test]
fn test_verify_rejects_malformed_digest() {
    assert!(!verify_password("not-a-phc-string", "pw123"));
    assert!(!verify_password("", "pw123"));
}
