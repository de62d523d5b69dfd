//! Allocation coordinator: validate, then insert under a fresh short code,
//! retrying only on short-code collisions.

use bytes::Bytes;
use mediaqr_core::{
    CanonicalKey, MediaRecord, NewMediaRecord, ShortCode, ShortCodeGenerator, UploadPolicy,
};
use mediaqr_error::{AllocationError, AllocationErrorKind, MediaQrError, MediaQrResult};
use mediaqr_storage::{InsertOutcome, MediaStore};
use std::sync::Arc;
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, error, info, instrument};

/// Default bound on insert attempts per upload.
pub const DEFAULT_ALLOCATION_ATTEMPTS: u32 = 5;

/// An upload as received from a client, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Raw file bytes
    pub payload: Bytes,
    /// Declared MIME type
    pub content_type: String,
    /// Client-side file name, if any
    pub filename: Option<String>,
}

impl Upload {
    /// Bundle an upload.
    pub fn new(
        payload: impl Into<Bytes>,
        content_type: impl Into<String>,
        filename: Option<String>,
    ) -> Self {
        Self {
            payload: payload.into(),
            content_type: content_type.into(),
            filename,
        }
    }
}

/// Why a single insert attempt did not produce a record.
#[derive(Debug)]
enum AttemptFailure {
    Collision(ShortCode),
    Store(MediaQrError),
}

/// Creates records with unique short codes.
pub struct Allocator {
    store: Arc<dyn MediaStore>,
    generator: Arc<dyn ShortCodeGenerator>,
    policy: UploadPolicy,
    max_attempts: u32,
}

impl Allocator {
    /// Coordinator over `store`, drawing candidates from `generator`.
    ///
    /// `max_attempts` below one is treated as one.
    pub fn new(
        store: Arc<dyn MediaStore>,
        generator: Arc<dyn ShortCodeGenerator>,
        policy: UploadPolicy,
        max_attempts: u32,
    ) -> Self {
        Self {
            store,
            generator,
            policy,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Upload limits enforced before allocation.
    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Validate `upload` and store it under a freshly allocated short code.
    ///
    /// Exactly one record exists on success and none on failure.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the upload breaks the policy; nothing is written
    /// - `AllocationError::Exhausted` if every candidate collided
    /// - the store's error, unretried, for any other insert failure
    #[instrument(skip(self, upload), fields(content_type = %upload.content_type, size = upload.payload.len()))]
    pub async fn allocate(&self, upload: Upload) -> MediaQrResult<MediaRecord> {
        self.policy
            .validate(&upload.content_type, upload.payload.len() as u64)?;
        self.policy.validate_filename(upload.filename.as_deref())?;

        // Collisions are retried immediately: a fresh candidate is all it takes.
        let retries = FixedInterval::from_millis(0).take(self.max_attempts as usize - 1);
        let result = Retry::spawn(retries, || self.try_allocate(&upload)).await;

        match result {
            Ok(record) => {
                info!(
                    canonical_key = %record.canonical_key(),
                    short_code = %record.short_code(),
                    "Allocated media record"
                );
                Ok(record)
            }
            Err(AttemptFailure::Collision(last)) => {
                error!(
                    attempts = self.max_attempts,
                    last_candidate = %last,
                    "Short-code allocation exhausted"
                );
                Err(AllocationError::new(AllocationErrorKind::Exhausted {
                    attempts: self.max_attempts,
                })
                .into())
            }
            Err(AttemptFailure::Store(e)) => Err(e),
        }
    }

    async fn try_allocate(
        &self,
        upload: &Upload,
    ) -> Result<MediaRecord, RetryError<AttemptFailure>> {
        let candidate = NewMediaRecord::new(
            CanonicalKey::generate(),
            self.generator.generate(),
            upload.payload.clone(),
            upload.content_type.clone(),
            upload.filename.clone(),
        );

        match self.store.insert(candidate).await {
            Ok(InsertOutcome::Inserted(record)) => Ok(record),
            Ok(InsertOutcome::ShortCodeTaken(code)) => {
                debug!(short_code = %code, "Short code collision, retrying with a new candidate");
                Err(RetryError::Transient {
                    err: AttemptFailure::Collision(code),
                    retry_after: None,
                })
            }
            Err(e) => {
                error!(error = %e, "Insert failed, not retrying");
                Err(RetryError::Permanent(AttemptFailure::Store(e)))
            }
        }
    }
}
