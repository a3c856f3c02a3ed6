use invoice_backend::util::password::*;

fn strength_cases() -> Vec<(&'static str, bool)> {
    vec![
        ("Abcdef12", true),             // Minimum valid password
        ("ValidPass123!", true),        // Special characters are allowed, not required
        ("abcdef12", false),            // Missing uppercase
        ("ABCDEF12", false),            // Missing lowercase
        ("Abcdefgh", false),            // Missing digit
        ("Abc123", false),              // Too short
        ("Abcde12", false),             // 7 chars
        ("", false),                    // Empty password
        ("12345678", false),            // Only digits
        ("ÄÖÜäöü12", false),            // Non-ASCII letters do not count
        ("Pässw0rd", true),             // ASCII classes present alongside non-ASCII
    ]
}

#[test]
fn test_is_strong_password() {
    for (password, expected) in strength_cases() {
        assert_eq!(is_strong_password(password), expected, "password {:?}", password);
    }
}

#[test]
fn test_validate_password_strength_matches_predicate() {
    for (password, expected) in strength_cases() {
        let result = PasswordUtilsImpl::validate_password_strength(password);
        assert_eq!(result.is_ok(), expected, "password {:?}: {:?}", password, result);
    }
}

#[test]
fn test_validate_password_strength_lists_every_failed_rule() {
    let errors = PasswordUtilsImpl::validate_password_strength("short").unwrap_err();
    let text = errors.join(" ").to_lowercase();
    assert!(text.contains("at least 8 characters"));
    assert!(text.contains("uppercase"));
    assert!(text.contains("digit"));
    assert!(!text.contains("lowercase"));
    assert_eq!(errors.len(), 3);
}

#[test]
fn test_length_counts_characters_not_bytes() {
    // 7 characters, more than 8 bytes
    assert!(!is_strong_password("Ab1éééé"));
    assert!(is_strong_password("Ab1ééééé"));
}

#[test]
fn test_hash_password_success() {
    let hash = PasswordUtilsImpl::hash_password("test_password_123").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(hash.split('$').count() >= 5);
}

#[test]
fn test_hash_password_uses_random_salt() {
    let hash1 = PasswordUtilsImpl::hash_password("same_password").unwrap();
    let hash2 = PasswordUtilsImpl::hash_password("same_password").unwrap();
    assert_ne!(hash1, hash2);
}

#[test]
fn test_verify_password() {
    let hash = PasswordUtilsImpl::hash_password("CaseSensitive123").unwrap();
    assert!(PasswordUtilsImpl::verify_password("CaseSensitive123", &hash).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("casesensitive123", &hash).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("", &hash).unwrap());
}

#[test]
fn test_verify_password_invalid_hash_format() {
    for invalid_hash in ["", "not_a_hash", "plaintext_password"] {
        match PasswordUtilsImpl::verify_password("test_password", invalid_hash) {
            Err(PasswordError::InvalidHashFormat) | Err(PasswordError::VerificationFailed(_)) => (),
            other => panic!("unexpected result for {:?}: {:?}", invalid_hash, other),
        }
    }
}
