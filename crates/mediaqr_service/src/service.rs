//! The `MediaService` facade wiring allocation, resolution and accounting
//! together over one store.

use crate::{
    AccessAccounting, Allocator, DEFAULT_ALLOCATION_ATTEMPTS, DEFAULT_STORAGE_CAPACITY_BYTES,
    Resolver, StoreStats, Upload, UsageReport,
};
use derive_getters::Getters;
use mediaqr_core::{
    CanonicalKey, DEFAULT_MAX_FILE_SIZE, DEFAULT_SHORT_CODE_LENGTH, MediaInfo, MediaRecord,
    RandomShortCodeGenerator, ShortCodeGenerator, UploadPolicy,
};
use mediaqr_error::{MediaQrResult, NotFoundError};
use mediaqr_storage::MediaStore;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, instrument};

/// Tunables for [`MediaService`], fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(derive(Debug))]
pub struct ServiceSettings {
    /// Largest accepted payload in bytes
    #[builder(default = "DEFAULT_MAX_FILE_SIZE")]
    max_file_size: u64,
    /// Symbols per generated short code
    #[builder(default = "DEFAULT_SHORT_CODE_LENGTH")]
    short_code_length: usize,
    /// Insert attempts per upload before giving up
    #[builder(default = "DEFAULT_ALLOCATION_ATTEMPTS")]
    allocation_attempts: u32,
    /// Capacity reported by the usage report
    #[builder(default = "DEFAULT_STORAGE_CAPACITY_BYTES")]
    storage_capacity_bytes: u64,
}

impl ServiceSettings {
    /// Settings with every field given.
    pub fn new(
        max_file_size: u64,
        short_code_length: usize,
        allocation_attempts: u32,
        storage_capacity_bytes: u64,
    ) -> Self {
        Self {
            max_file_size,
            short_code_length,
            allocation_attempts,
            storage_capacity_bytes,
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            short_code_length: DEFAULT_SHORT_CODE_LENGTH,
            allocation_attempts: DEFAULT_ALLOCATION_ATTEMPTS,
            storage_capacity_bytes: DEFAULT_STORAGE_CAPACITY_BYTES,
        }
    }
}

/// Upload, retrieve, inspect and delete media over a [`MediaStore`].
///
/// Content retrievals ([`retrieve`](Self::retrieve) and
/// [`retrieve_by_key`](Self::retrieve_by_key)) enqueue an access-count
/// increment and return without waiting for it. [`info`](Self::info) never
/// counts.
///
/// Must be constructed inside a tokio runtime; the accounting worker is
/// spawned on it.
#[derive(Clone)]
pub struct MediaService {
    store: Arc<dyn MediaStore>,
    allocator: Arc<Allocator>,
    resolver: Resolver,
    accounting: AccessAccounting,
    settings: ServiceSettings,
}

impl MediaService {
    /// Service with the OS-backed random short-code generator.
    pub fn new(store: Arc<dyn MediaStore>, settings: ServiceSettings) -> Self {
        let generator = Arc::new(RandomShortCodeGenerator::new(settings.short_code_length));
        Self::with_generator(store, generator, settings).0
    }

    /// Service with a caller-supplied generator.
    ///
    /// Also returns the accounting worker's handle; it finishes once every
    /// clone of the service is dropped.
    pub fn with_generator(
        store: Arc<dyn MediaStore>,
        generator: Arc<dyn ShortCodeGenerator>,
        settings: ServiceSettings,
    ) -> (Self, JoinHandle<()>) {
        let allocator = Allocator::new(
            Arc::clone(&store),
            generator,
            UploadPolicy::new(settings.max_file_size),
            settings.allocation_attempts,
        );
        let (accounting, worker) = AccessAccounting::spawn(Arc::clone(&store));
        let service = Self {
            resolver: Resolver::new(Arc::clone(&store)),
            store,
            allocator: Arc::new(allocator),
            accounting,
            settings,
        };
        (service, worker)
    }

    /// Settings in effect.
    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Upload limits in effect.
    pub fn upload_policy(&self) -> &UploadPolicy {
        self.allocator.policy()
    }

    /// Validate and store an upload under a new short code.
    pub async fn upload(&self, upload: Upload) -> MediaQrResult<MediaRecord> {
        self.allocator.allocate(upload).await
    }

    /// Resolve a short code or canonical key and count the access.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, token: &str) -> MediaQrResult<MediaRecord> {
        let record = self.resolver.require(token).await?;
        self.accounting.record_access(*record.canonical_key());
        Ok(record)
    }

    /// Look up an exact canonical key and count the access.
    #[instrument(skip(self))]
    pub async fn retrieve_by_key(&self, token: &str) -> MediaQrResult<MediaRecord> {
        let record = self.resolver.require_canonical(token).await?;
        self.accounting.record_access(*record.canonical_key());
        Ok(record)
    }

    /// Metadata for a short code or canonical key. Does not count.
    #[instrument(skip(self))]
    pub async fn info(&self, token: &str) -> MediaQrResult<MediaInfo> {
        Ok(self.resolver.require(token).await?.info())
    }

    /// Resolve and hard-delete, returning the removed record's canonical key.
    #[instrument(skip(self))]
    pub async fn delete(&self, token: &str) -> MediaQrResult<CanonicalKey> {
        let record = self.resolver.require(token).await?;
        let canonical_key = *record.canonical_key();
        // A concurrent delete may win between resolve and delete.
        if !self.store.delete(canonical_key).await? {
            return Err(NotFoundError::new().into());
        }
        info!(%canonical_key, short_code = %record.short_code(), "Deleted media record");
        Ok(canonical_key)
    }

    /// Count, size and recency aggregates.
    pub async fn stats(&self) -> MediaQrResult<StoreStats> {
        Ok(self.store.totals().await?.into())
    }

    /// Usage against the configured capacity.
    pub async fn usage(&self) -> MediaQrResult<UsageReport> {
        let totals = self.store.totals().await?;
        Ok(UsageReport::new(
            totals.total_bytes,
            self.settings.storage_capacity_bytes,
        ))
    }

    /// Remove every record, returning how many were removed.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> MediaQrResult<u64> {
        let removed = self.store.clear().await?;
        info!(removed, "Cleared media store");
        Ok(removed)
    }
}
