use mediaqr_core::{
    DEFAULT_SHORT_CODE_LENGTH, RandomShortCodeGenerator, SHORT_CODE_ALPHABET, ShortCode,
    ShortCodeGenerator, generate_short_code,
};
use std::collections::HashSet;

#[test]
fn alphabet_is_base62_without_duplicates() {
    let unique: HashSet<u8> = SHORT_CODE_ALPHABET.iter().copied().collect();
    assert_eq!(unique.len(), 62);
    assert!(SHORT_CODE_ALPHABET.iter().all(|b| b.is_ascii_alphanumeric()));
}

#[test]
fn ten_thousand_codes_stay_inside_the_alphabet() {
    let generator = RandomShortCodeGenerator::default();
    for _ in 0..10_000 {
        let code = generator.generate();
        assert_eq!(code.len(), DEFAULT_SHORT_CODE_LENGTH);
        assert!(
            code.as_str().bytes().all(|b| SHORT_CODE_ALPHABET.contains(&b)),
            "code {} has a symbol outside the alphabet",
            code
        );
    }
}

#[test]
fn generated_codes_are_not_repeated_in_a_small_sample() {
    let codes: HashSet<ShortCode> = (0..1_000)
        .map(|_| generate_short_code(DEFAULT_SHORT_CODE_LENGTH))
        .collect();
    // 1000 draws from 5.68e10 values: a repeat would point at a broken RNG.
    assert_eq!(codes.len(), 1_000);
}

#[test]
fn custom_length_is_respected() {
    let generator = RandomShortCodeGenerator::new(10);
    assert_eq!(generator.length(), 10);
    assert_eq!(generator.generate().len(), 10);
    assert_eq!(generate_short_code(0).len(), 0);
}

#[test]
fn every_symbol_shows_up_eventually() {
    let mut seen = HashSet::new();
    for _ in 0..5_000 {
        seen.extend(generate_short_code(6).as_str().bytes());
    }
    assert_eq!(seen.len(), 62);
}

#[test]
fn parse_accepts_only_base62() {
    assert_eq!(ShortCode::parse("Ab3d9Z").unwrap().as_str(), "Ab3d9Z");
    assert!(ShortCode::parse("abc_12").is_none());
    assert!(ShortCode::parse("héllo").is_none());
    assert!(ShortCode::parse("").is_none());
}

#[test]
fn short_code_serializes_as_plain_string() {
    let code = ShortCode::parse("x9Y8z7").unwrap();
    assert_eq!(serde_json::to_string(&code).unwrap(), "\"x9Y8z7\"");
}
