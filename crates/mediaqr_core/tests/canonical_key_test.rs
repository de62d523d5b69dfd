use mediaqr_core::{CanonicalKey, is_canonical_key_syntax};

const VALID: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

#[test]
fn accepts_hyphenated_uuid_in_either_case() {
    assert!(is_canonical_key_syntax(VALID));
    assert!(is_canonical_key_syntax(&VALID.to_uppercase()));
}

#[test]
fn rejects_wrong_length() {
    assert!(!is_canonical_key_syntax(""));
    assert!(!is_canonical_key_syntax("Ab3d9Z"));
    assert!(!is_canonical_key_syntax(&VALID[..35]));
    assert!(!is_canonical_key_syntax(&format!("{}0", VALID)));
}

#[test]
fn rejects_misplaced_hyphens() {
    // Same length, groups shifted to 9-3-4-4-12.
    assert!(!is_canonical_key_syntax("67e550441-0b1-426f-9247-bb680e5fe0c8"));
    // Hyphens replaced with hex digits keeps length 36 but only one group.
    assert!(!is_canonical_key_syntax("67e550440100b104426f092470bb680e5fe0"));
    // Six groups.
    assert!(!is_canonical_key_syntax("67e55044-10b1-426f-9247-bb680e5-e0c8"));
}

#[test]
fn rejects_non_hex_characters() {
    assert!(!is_canonical_key_syntax("67e55044-10b1-426f-9247-bb680e5fe0cg"));
    assert!(!is_canonical_key_syntax("zze55044-10b1-426f-9247-bb680e5fe0c8"));
    assert!(!is_canonical_key_syntax("67e55044-10b1-426f-9247-bb680e5fe0c "));
}

#[test]
fn rejects_multibyte_input_without_panicking() {
    // 36 bytes, but not 36 ASCII characters.
    let token = "67e55044-10b1-426f-9247-bb680e5fé0c";
    assert_eq!(token.len(), 36);
    assert!(!is_canonical_key_syntax(token));
    assert!(CanonicalKey::parse(token).is_none());
}

#[test]
fn parse_round_trips_through_display() {
    let key = CanonicalKey::parse(VALID).unwrap();
    assert_eq!(key.to_string(), VALID);
}

#[test]
fn parse_refuses_forms_the_uuid_crate_would_accept() {
    // Simple and braced forms are valid UUIDs but not canonical-key syntax.
    assert!(CanonicalKey::parse("67e5504410b1426f9247bb680e5fe0c8").is_none());
    assert!(CanonicalKey::parse("{67e55044-10b1-426f-9247-bb680e5fe0c8}").is_none());
}

#[test]
fn generated_keys_are_distinct_and_well_formed() {
    let a = CanonicalKey::generate();
    let b = CanonicalKey::generate();
    assert_ne!(a, b);
    assert!(is_canonical_key_syntax(&a.to_string()));
}
