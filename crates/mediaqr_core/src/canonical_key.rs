//! Canonical keys and their surface-syntax check.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const GROUP_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];
const CANONICAL_KEY_LEN: usize = 36;

/// Durable primary identifier of a record (random v4 UUID).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct CanonicalKey(Uuid);

impl CanonicalKey {
    /// Fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a client token, but only if it passes [`is_canonical_key_syntax`].
    ///
    /// Tokens that fail the check never reach the UUID parser.
    pub fn parse(token: &str) -> Option<Self> {
        if !is_canonical_key_syntax(token) {
            return None;
        }
        Uuid::parse_str(token).ok().map(Self)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Consume into the underlying UUID.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

/// Strict hyphenated-UUID shape check: 36 characters, five groups of
/// 8-4-4-4-12 hex digits.
///
/// # Examples
///
/// ```
/// use mediaqr_core::is_canonical_key_syntax;
///
/// assert!(is_canonical_key_syntax("67e55044-10b1-426f-9247-bb680e5fe0c8"));
/// assert!(!is_canonical_key_syntax("67e5504410b1426f9247bb680e5fe0c8"));
/// assert!(!is_canonical_key_syntax("Ab3d9Z"));
/// ```
pub fn is_canonical_key_syntax(token: &str) -> bool {
    if token.len() != CANONICAL_KEY_LEN {
        return false;
    }

    let groups: Vec<&str> = token.split('-').collect();
    groups.len() == GROUP_LENGTHS.len()
        && groups.iter().zip(GROUP_LENGTHS).all(|(group, expected)| {
            group.len() == expected && group.bytes().all(|b| b.is_ascii_hexdigit())
        })
}
