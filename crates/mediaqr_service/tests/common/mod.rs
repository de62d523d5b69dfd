//! Shared fixtures for service tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mediaqr_core::{CanonicalKey, MediaRecord, NewMediaRecord, ShortCode, ShortCodeGenerator};
use mediaqr_error::{MediaQrResult, StorageError, StorageErrorKind};
use mediaqr_storage::{InsertOutcome, MediaStore, MemoryStore, StoreTotals};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Hands out a fixed sequence of codes, then repeats the fallback.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<ShortCode>>,
    fallback: ShortCode,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(script: &[&str], fallback: &str) -> Self {
        Self {
            script: Mutex::new(
                script
                    .iter()
                    .map(|code| ShortCode::parse(code).unwrap())
                    .collect(),
            ),
            fallback: ShortCode::parse(fallback).unwrap(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(code: &str) -> Self {
        Self::new(&[], code)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ShortCodeGenerator for ScriptedGenerator {
    fn generate(&self) -> ShortCode {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Store whose writes always fail with a non-collision error.
#[derive(Default)]
pub struct UnavailableStore {
    pub inserts: AtomicUsize,
}

fn unavailable() -> StorageError {
    StorageError::new(StorageErrorKind::Unavailable("database is down".to_string()))
}

#[async_trait]
impl MediaStore for UnavailableStore {
    async fn insert(&self, _record: NewMediaRecord) -> MediaQrResult<InsertOutcome> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Err(unavailable().into())
    }

    async fn find_by_short_code(&self, _short_code: &str) -> MediaQrResult<Option<MediaRecord>> {
        Err(unavailable().into())
    }

    async fn find_by_canonical_key(
        &self,
        _canonical_key: CanonicalKey,
    ) -> MediaQrResult<Option<MediaRecord>> {
        Err(unavailable().into())
    }

    async fn increment_access_count(&self, _canonical_key: CanonicalKey) -> MediaQrResult<bool> {
        Err(unavailable().into())
    }

    async fn delete(&self, _canonical_key: CanonicalKey) -> MediaQrResult<bool> {
        Err(unavailable().into())
    }

    async fn totals(&self) -> MediaQrResult<StoreTotals> {
        Err(unavailable().into())
    }

    async fn clear(&self) -> MediaQrResult<u64> {
        Err(unavailable().into())
    }
}

/// Memory store that logs lookup order and can answer extra short-code
/// aliases, including ones no generator would produce.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    pub lookups: Mutex<Vec<&'static str>>,
    aliases: Mutex<HashMap<String, CanonicalKey>>,
}

impl RecordingStore {
    pub fn alias(&self, token: &str, canonical_key: CanonicalKey) {
        self.aliases.lock().insert(token.to_string(), canonical_key);
    }

    pub fn take_lookups(&self) -> Vec<&'static str> {
        std::mem::take(&mut *self.lookups.lock())
    }
}

#[async_trait]
impl MediaStore for RecordingStore {
    async fn insert(&self, record: NewMediaRecord) -> MediaQrResult<InsertOutcome> {
        self.inner.insert(record).await
    }

    async fn find_by_short_code(&self, short_code: &str) -> MediaQrResult<Option<MediaRecord>> {
        self.lookups.lock().push("short_code");
        let alias = self.aliases.lock().get(short_code).copied();
        match alias {
            Some(key) => self.inner.find_by_canonical_key(key).await,
            None => self.inner.find_by_short_code(short_code).await,
        }
    }

    async fn find_by_canonical_key(
        &self,
        canonical_key: CanonicalKey,
    ) -> MediaQrResult<Option<MediaRecord>> {
        self.lookups.lock().push("canonical_key");
        self.inner.find_by_canonical_key(canonical_key).await
    }

    async fn increment_access_count(&self, canonical_key: CanonicalKey) -> MediaQrResult<bool> {
        self.inner.increment_access_count(canonical_key).await
    }

    async fn delete(&self, canonical_key: CanonicalKey) -> MediaQrResult<bool> {
        self.inner.delete(canonical_key).await
    }

    async fn totals(&self) -> MediaQrResult<StoreTotals> {
        self.inner.totals().await
    }

    async fn clear(&self) -> MediaQrResult<u64> {
        self.inner.clear().await
    }
}

/// Memory store whose increments wait for a permit, so the accounting
/// worker can be held mid-increment.
pub struct GatedStore {
    pub inner: MemoryStore,
    pub entered: tokio::sync::Notify,
    pub gate: tokio::sync::Semaphore,
}

impl GatedStore {
    pub fn closed() -> Self {
        Self {
            inner: MemoryStore::new(),
            entered: tokio::sync::Notify::new(),
            gate: tokio::sync::Semaphore::new(0),
        }
    }

    pub fn open(&self, permits: usize) {
        self.gate.add_permits(permits);
    }
}

#[async_trait]
impl MediaStore for GatedStore {
    async fn insert(&self, record: NewMediaRecord) -> MediaQrResult<InsertOutcome> {
        self.inner.insert(record).await
    }

    async fn find_by_short_code(&self, short_code: &str) -> MediaQrResult<Option<MediaRecord>> {
        self.inner.find_by_short_code(short_code).await
    }

    async fn find_by_canonical_key(
        &self,
        canonical_key: CanonicalKey,
    ) -> MediaQrResult<Option<MediaRecord>> {
        self.inner.find_by_canonical_key(canonical_key).await
    }

    async fn increment_access_count(&self, canonical_key: CanonicalKey) -> MediaQrResult<bool> {
        self.entered.notify_one();
        self.gate.acquire().await.unwrap().forget();
        self.inner.increment_access_count(canonical_key).await
    }

    async fn delete(&self, canonical_key: CanonicalKey) -> MediaQrResult<bool> {
        self.inner.delete(canonical_key).await
    }

    async fn totals(&self) -> MediaQrResult<StoreTotals> {
        self.inner.totals().await
    }

    async fn clear(&self) -> MediaQrResult<u64> {
        self.inner.clear().await
    }
}

/// Poll until the record's access count reaches `expected` or give up.
pub async fn wait_for_access_count(
    store: &dyn MediaStore,
    canonical_key: CanonicalKey,
    expected: u64,
) -> u64 {
    let mut observed = 0;
    for _ in 0..200 {
        observed = store
            .find_by_canonical_key(canonical_key)
            .await
            .unwrap()
            .map(|record| *record.access_count())
            .unwrap_or(0);
        if observed >= expected {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    observed
}

pub fn png(bytes: &'static [u8]) -> mediaqr_service::Upload {
    mediaqr_service::Upload::new(bytes, "image/png", Some("dot.png".to_string()))
}

pub fn arc<S: MediaStore + 'static>(store: S) -> (Arc<S>, Arc<dyn MediaStore>) {
    let typed = Arc::new(store);
    let erased: Arc<dyn MediaStore> = typed.clone();
    (typed, erased)
}
