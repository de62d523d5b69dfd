//! Tests for the PostgreSQL store. Require `DATABASE_URL` and a disposable
//! database; run with `cargo test -p mediaqr_storage --features postgres -- --ignored`.

#![cfg(feature = "postgres")]

use bytes::Bytes;
use mediaqr_core::{CanonicalKey, NewMediaRecord, ShortCode, generate_short_code};
use mediaqr_storage::{InsertOutcome, MediaStore, PostgresMediaStore};

fn connect() -> PostgresMediaStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PostgresMediaStore::connect(&url, 4).unwrap()
}

fn new_record(code: ShortCode) -> NewMediaRecord {
    NewMediaRecord::new(
        CanonicalKey::generate(),
        code,
        Bytes::from_static(b"postgres payload"),
        "video/mp4",
        Some("clip.mp4".to_string()),
    )
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_round_trip_and_collision() {
    let store = connect();
    let code = generate_short_code(12);

    let first = store.insert(new_record(code.clone())).await.unwrap();
    let InsertOutcome::Inserted(record) = first else {
        panic!("first insert should succeed");
    };
    assert_eq!(*record.size(), 16);

    let second = store.insert(new_record(code.clone())).await.unwrap();
    assert_eq!(second, InsertOutcome::ShortCodeTaken(code.clone()));

    let found = store
        .find_by_short_code(code.as_str())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.canonical_key(), record.canonical_key());

    assert!(store
        .increment_access_count(*record.canonical_key())
        .await
        .unwrap());
    let found = store
        .find_by_canonical_key(*record.canonical_key())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(*found.access_count(), 1);

    assert!(store.delete(*record.canonical_key()).await.unwrap());
    assert!(store
        .find_by_short_code(code.as_str())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_totals_never_fail() {
    let store = connect();
    let totals = store.totals().await.unwrap();
    assert!(totals.record_count == 0 || totals.last_created_at.is_some());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_malformed_short_code_lookup_is_a_miss() {
    let store = connect();
    for token in ["ab\0cd", "\0", "not-base62!", ""] {
        let found = store.find_by_short_code(token).await;
        assert!(matches!(found, Ok(None)), "{token:?}: {found:?}");
    }
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_filename_at_column_limit_round_trips() {
    let store = connect();
    let filename = "é".repeat(mediaqr_core::MAX_FILENAME_LENGTH);
    let record = NewMediaRecord::new(
        CanonicalKey::generate(),
        generate_short_code(12),
        Bytes::from_static(b"long name"),
        "image/png",
        Some(filename.clone()),
    );

    let InsertOutcome::Inserted(record) = store.insert(record).await.unwrap() else {
        panic!("insert should succeed");
    };
    assert_eq!(record.filename().as_deref(), Some(filename.as_str()));
    assert!(store.delete(*record.canonical_key()).await.unwrap());
}
