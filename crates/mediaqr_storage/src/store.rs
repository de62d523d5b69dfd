//! Store trait definition.

use chrono::{DateTime, Utc};
use mediaqr_core::{CanonicalKey, MediaRecord, NewMediaRecord, ShortCode};
use mediaqr_error::MediaQrResult;

/// Result of an insert that may lose a short-code race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record is now durable
    Inserted(MediaRecord),
    /// Another live record already holds this short code; nothing was written
    ShortCodeTaken(ShortCode),
}

/// Aggregates over all live records.
///
/// An empty store yields zeros and `None`, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreTotals {
    /// Number of live records
    pub record_count: u64,
    /// Sum of payload sizes in bytes
    pub total_bytes: u64,
    /// Most recent `created_at`
    pub last_created_at: Option<DateTime<Utc>>,
}

/// Backing store for media records.
///
/// The store is the only shared mutable state in the system, so every
/// operation here that writes must be atomic on its own:
///
/// - `insert` checks short-code uniqueness and writes in one step
/// - `increment_access_count` is a single `count = count + 1`
/// - `delete` removes the record from both key spaces at once
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    /// Insert a record unless its short code is held by a live record.
    ///
    /// # Errors
    ///
    /// Any failure other than the short-code collision, which is reported
    /// as [`InsertOutcome::ShortCodeTaken`] instead.
    async fn insert(&self, record: NewMediaRecord) -> MediaQrResult<InsertOutcome>;

    /// Point lookup by short code. The token is compared verbatim; a token
    /// that is not a well-formed short code is a miss, never an error.
    async fn find_by_short_code(&self, short_code: &str) -> MediaQrResult<Option<MediaRecord>>;

    /// Point lookup by canonical key.
    async fn find_by_canonical_key(
        &self,
        canonical_key: CanonicalKey,
    ) -> MediaQrResult<Option<MediaRecord>>;

    /// Atomically add one to the access counter.
    ///
    /// # Returns
    ///
    /// `false` if no record has this key.
    async fn increment_access_count(&self, canonical_key: CanonicalKey) -> MediaQrResult<bool>;

    /// Hard-delete a record, freeing its short code.
    ///
    /// # Returns
    ///
    /// `false` if no record has this key.
    async fn delete(&self, canonical_key: CanonicalKey) -> MediaQrResult<bool>;

    /// Count and size aggregates.
    async fn totals(&self) -> MediaQrResult<StoreTotals>;

    /// Remove every record, returning how many were removed.
    async fn clear(&self) -> MediaQrResult<u64>;
}
