//! Identifier resolution across the two key spaces.

use mediaqr_core::{CanonicalKey, MediaRecord};
use mediaqr_error::{MediaQrResult, NotFoundError};
use mediaqr_storage::MediaStore;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Maps client tokens to records.
///
/// A token is always tried as a short code first. Only on a miss, and only if
/// it has hyphenated-UUID shape, is it tried as a canonical key. Anything
/// else is a miss; malformed tokens never reach the UUID parser.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn MediaStore>,
}

impl Resolver {
    /// Resolver over `store`.
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }

    /// Short code first, canonical key second.
    #[instrument(skip(self))]
    pub async fn resolve(&self, token: &str) -> MediaQrResult<Option<MediaRecord>> {
        if let Some(record) = self.store.find_by_short_code(token).await? {
            debug!("Resolved as short code");
            return Ok(Some(record));
        }

        match CanonicalKey::parse(token) {
            Some(key) => {
                let record = self.store.find_by_canonical_key(key).await?;
                debug!(found = record.is_some(), "Resolved as canonical key");
                Ok(record)
            }
            None => Ok(None),
        }
    }

    /// Canonical key only; short codes are not consulted.
    #[instrument(skip(self))]
    pub async fn resolve_canonical(&self, token: &str) -> MediaQrResult<Option<MediaRecord>> {
        match CanonicalKey::parse(token) {
            Some(key) => self.store.find_by_canonical_key(key).await,
            None => Ok(None),
        }
    }

    /// Like [`Resolver::resolve`], turning a miss into `NotFoundError`.
    pub async fn require(&self, token: &str) -> MediaQrResult<MediaRecord> {
        self.resolve(token)
            .await?
            .ok_or_else(|| NotFoundError::new().into())
    }

    /// Like [`Resolver::resolve_canonical`], turning a miss into `NotFoundError`.
    pub async fn require_canonical(&self, token: &str) -> MediaQrResult<MediaRecord> {
        self.resolve_canonical(token)
            .await?
            .ok_or_else(|| NotFoundError::new().into())
    }
}
