//! Short-code type and generation.
//!
//! Short codes are the public face of a record: they end up in QR codes and
//! share links, so they must not be guessable. Every symbol is drawn from the
//! operating system's CSPRNG, never from a seeded or statistical generator.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

/// Base62 alphabet: digits, lowercase, uppercase.
pub const SHORT_CODE_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of generated codes; 62^6 is roughly 5.68e10 possible values.
pub const DEFAULT_SHORT_CODE_LENGTH: usize = 6;

/// Public-facing alias for a record.
///
/// # Examples
///
/// ```
/// use mediaqr_core::ShortCode;
///
/// assert!(ShortCode::parse("Ab3d9Z").is_some());
/// assert!(ShortCode::parse("Ab-d9Z").is_none());
/// assert!(ShortCode::parse("").is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Accept a string as a short code if it is non-empty base62.
    pub fn parse(value: &str) -> Option<Self> {
        if !value.is_empty() && value.bytes().all(|b| SHORT_CODE_ALPHABET.contains(&b)) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    /// Wrap a value loaded from a trusted store without re-checking it.
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of symbols in the code.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for generated codes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Draw a fresh code of `length` symbols from the OS random source.
pub fn generate_short_code(length: usize) -> ShortCode {
    let symbols = Uniform::from(0..SHORT_CODE_ALPHABET.len());
    let mut rng = OsRng;
    let code = (0..length)
        .map(|_| SHORT_CODE_ALPHABET[symbols.sample(&mut rng)] as char)
        .collect();
    ShortCode(code)
}

/// Source of candidate short codes.
///
/// Implementations are pure generators: they never consult storage, so a
/// returned code may already be taken. Uniqueness is settled by the store's
/// insert.
pub trait ShortCodeGenerator: Send + Sync {
    /// Produce one candidate code.
    fn generate(&self) -> ShortCode;
}

/// CSPRNG-backed base62 generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RandomShortCodeGenerator {
    length: usize,
}

impl RandomShortCodeGenerator {
    /// Generator producing codes of the given length.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Configured code length.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomShortCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SHORT_CODE_LENGTH)
    }
}

impl ShortCodeGenerator for RandomShortCodeGenerator {
    fn generate(&self) -> ShortCode {
        generate_short_code(self.length)
    }
}
