//! In-process media store.
//!
//! Both key spaces live behind one lock so that the short-code uniqueness
//! check and the write it guards can never interleave with another insert.

use crate::{InsertOutcome, MediaStore, StoreTotals};
use mediaqr_core::{CanonicalKey, MediaRecord, NewMediaRecord, ShortCode};
use mediaqr_error::{MediaQrResult, StorageError, StorageErrorKind};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct Index {
    records: HashMap<CanonicalKey, MediaRecord>,
    short_codes: HashMap<ShortCode, CanonicalKey>,
}

/// Media store held entirely in memory.
///
/// Contents are lost on restart. Useful for development and tests, and as
/// the reference behaviour for the PostgreSQL store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    index: RwLock<Index>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.index.read().records.len()
    }

    /// True when no records are stored.
    pub fn is_empty(&self) -> bool {
        self.index.read().records.is_empty()
    }
}

#[async_trait::async_trait]
impl MediaStore for MemoryStore {
    #[tracing::instrument(skip(self, record), fields(short_code = %record.short_code(), size = record.size()))]
    async fn insert(&self, record: NewMediaRecord) -> MediaQrResult<InsertOutcome> {
        let mut index = self.index.write();

        if index.short_codes.contains_key(record.short_code()) {
            tracing::debug!("Short code already taken");
            return Ok(InsertOutcome::ShortCodeTaken(record.short_code().clone()));
        }
        if index.records.contains_key(record.canonical_key()) {
            return Err(StorageError::new(StorageErrorKind::Query(format!(
                "duplicate canonical key {}",
                record.canonical_key()
            )))
            .into());
        }

        let stored = MediaRecord::inserted(record);
        index
            .short_codes
            .insert(stored.short_code().clone(), *stored.canonical_key());
        index.records.insert(*stored.canonical_key(), stored.clone());

        tracing::debug!(canonical_key = %stored.canonical_key(), "Inserted record");
        Ok(InsertOutcome::Inserted(stored))
    }

    async fn find_by_short_code(&self, short_code: &str) -> MediaQrResult<Option<MediaRecord>> {
        let index = self.index.read();
        let Some(code) = ShortCode::parse(short_code) else {
            return Ok(None);
        };
        Ok(index
            .short_codes
            .get(&code)
            .and_then(|key| index.records.get(key))
            .cloned())
    }

    async fn find_by_canonical_key(
        &self,
        canonical_key: CanonicalKey,
    ) -> MediaQrResult<Option<MediaRecord>> {
        Ok(self.index.read().records.get(&canonical_key).cloned())
    }

    async fn increment_access_count(&self, canonical_key: CanonicalKey) -> MediaQrResult<bool> {
        let mut index = self.index.write();
        match index.records.get_mut(&canonical_key) {
            Some(record) => {
                record.increment_access_count();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, canonical_key: CanonicalKey) -> MediaQrResult<bool> {
        let mut index = self.index.write();
        let Some(record) = index.records.remove(&canonical_key) else {
            return Ok(false);
        };
        index.short_codes.remove(record.short_code());
        tracing::debug!(short_code = %record.short_code(), "Deleted record");
        Ok(true)
    }

    async fn totals(&self) -> MediaQrResult<StoreTotals> {
        let index = self.index.read();
        Ok(StoreTotals {
            record_count: index.records.len() as u64,
            total_bytes: index.records.values().map(|r| *r.size()).sum(),
            last_created_at: index.records.values().map(|r| *r.created_at()).max(),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn clear(&self) -> MediaQrResult<u64> {
        let mut index = self.index.write();
        let removed = index.records.len() as u64;
        index.records.clear();
        index.short_codes.clear();
        Ok(removed)
    }
}
