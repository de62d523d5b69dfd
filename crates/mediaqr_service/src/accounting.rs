//! Access accounting.
//!
//! Retrieval handlers enqueue the key of every delivered record and return
//! at once. A single worker task drains the queue and issues the store's
//! atomic increment. A failed increment is logged and dropped: the bytes have
//! already gone out, so there is nothing to report to the client and nothing
//! worth retrying.
//!
//! The queue is bounded. When the worker falls behind, further increments are
//! dropped with a warning rather than held in memory.

use mediaqr_core::CanonicalKey;
use mediaqr_error::{AccountingError, AccountingErrorKind};
use mediaqr_storage::MediaStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Pending increments held before new ones are dropped.
pub const DEFAULT_ACCOUNTING_QUEUE_CAPACITY: usize = 4096;

/// Handle for enqueueing access-count increments.
///
/// Cloning shares the queue. The worker stops once every handle is dropped
/// and the queue is drained.
#[derive(Debug, Clone)]
pub struct AccessAccounting {
    sender: mpsc::Sender<CanonicalKey>,
}

impl AccessAccounting {
    /// Start the worker on the current tokio runtime with the default
    /// queue capacity.
    ///
    /// Returns the handle and the worker's join handle.
    pub fn spawn(store: Arc<dyn MediaStore>) -> (Self, JoinHandle<()>) {
        Self::spawn_with_capacity(store, DEFAULT_ACCOUNTING_QUEUE_CAPACITY)
    }

    /// Start the worker with room for `capacity` pending increments
    /// (at least one).
    pub fn spawn_with_capacity(
        store: Arc<dyn MediaStore>,
        capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let worker = tokio::spawn(run_worker(store, receiver));
        (Self { sender }, worker)
    }

    /// Queue one increment for `canonical_key`. Never blocks.
    ///
    /// Returns `false` if the increment was dropped because the queue is
    /// full or the worker has stopped.
    pub fn record_access(&self, canonical_key: CanonicalKey) -> bool {
        match self.sender.try_send(canonical_key) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(%canonical_key, "Access accounting queue is full; dropping increment");
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!(%canonical_key, "Access accounting worker has stopped; dropping increment");
                false
            }
        }
    }
}

async fn run_worker(store: Arc<dyn MediaStore>, mut receiver: mpsc::Receiver<CanonicalKey>) {
    debug!("Access accounting worker started");
    while let Some(canonical_key) = receiver.recv().await {
        if let Err(err) = increment(store.as_ref(), canonical_key).await {
            warn!(%canonical_key, error = %err, "Failed to record access");
        }
    }
    debug!("Access accounting worker stopped");
}

async fn increment(store: &dyn MediaStore, canonical_key: CanonicalKey) -> Result<(), AccountingError> {
    match store.increment_access_count(canonical_key).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(AccountingError::new(AccountingErrorKind::RecordMissing(
            canonical_key.to_string(),
        ))),
        Err(e) => Err(AccountingError::new(AccountingErrorKind::Store(e.to_string()))),
    }
}
