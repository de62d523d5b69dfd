//! Stored media records.

use crate::{CanonicalKey, ShortCode};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A record ready for insertion; everything fixed except the access count.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct NewMediaRecord {
    canonical_key: CanonicalKey,
    short_code: ShortCode,
    payload: Bytes,
    content_type: String,
    filename: Option<String>,
    created_at: DateTime<Utc>,
}

impl NewMediaRecord {
    /// Assemble a new record stamped with the current time.
    pub fn new(
        canonical_key: CanonicalKey,
        short_code: ShortCode,
        payload: Bytes,
        content_type: impl Into<String>,
        filename: Option<String>,
    ) -> Self {
        Self {
            canonical_key,
            short_code,
            payload,
            content_type: content_type.into(),
            filename,
            created_at: Utc::now(),
        }
    }

    /// Payload length in bytes.
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }
}

/// One stored blob plus its metadata.
///
/// `size` always equals the payload length; it is derived, never supplied.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MediaRecord {
    canonical_key: CanonicalKey,
    short_code: ShortCode,
    payload: Bytes,
    content_type: String,
    filename: Option<String>,
    size: u64,
    access_count: u64,
    created_at: DateTime<Utc>,
}

impl MediaRecord {
    /// Materialise a freshly inserted record with a zero access count.
    pub fn inserted(new: NewMediaRecord) -> Self {
        let size = new.size();
        Self {
            canonical_key: new.canonical_key,
            short_code: new.short_code,
            payload: new.payload,
            content_type: new.content_type,
            filename: new.filename,
            size,
            access_count: 0,
            created_at: new.created_at,
        }
    }

    /// Rebuild a record loaded from a backing store.
    pub fn from_stored(
        canonical_key: CanonicalKey,
        short_code: ShortCode,
        payload: Bytes,
        content_type: String,
        filename: Option<String>,
        access_count: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        let size = payload.len() as u64;
        Self {
            canonical_key,
            short_code,
            payload,
            content_type,
            filename,
            size,
            access_count,
            created_at,
        }
    }

    /// Bump the access counter by one. Only stores call this.
    pub fn increment_access_count(&mut self) {
        self.access_count = self.access_count.saturating_add(1);
    }

    /// Metadata view without the payload bytes.
    pub fn info(&self) -> MediaInfo {
        MediaInfo {
            canonical_key: self.canonical_key,
            short_code: self.short_code.clone(),
            filename: self.filename.clone(),
            content_type: self.content_type.clone(),
            size: self.size,
            access_count: self.access_count,
            created_at: self.created_at,
        }
    }
}

/// Record metadata as reported by the info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MediaInfo {
    canonical_key: CanonicalKey,
    short_code: ShortCode,
    filename: Option<String>,
    content_type: String,
    size: u64,
    access_count: u64,
    created_at: DateTime<Utc>,
}
