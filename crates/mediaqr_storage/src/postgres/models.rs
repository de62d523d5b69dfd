//! Row types for the `media_store` table.

use super::schema::media_store;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use mediaqr_core::{CanonicalKey, MediaRecord, NewMediaRecord, ShortCode};
use uuid::Uuid;

/// A full row as read back from PostgreSQL.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = media_store)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MediaRow {
    pub id: Uuid,
    pub short_id: String,
    pub file_data: Vec<u8>,
    pub content_type: String,
    pub filename: Option<String>,
    pub file_size: i64,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<MediaRow> for MediaRecord {
    fn from(row: MediaRow) -> Self {
        MediaRecord::from_stored(
            CanonicalKey::from(row.id),
            ShortCode::from_stored(row.short_id),
            Bytes::from(row.file_data),
            row.content_type,
            row.filename,
            row.access_count.max(0) as u64,
            row.created_at,
        )
    }
}

/// Insertable row borrowing from a [`NewMediaRecord`].
#[derive(Debug, Insertable)]
#[diesel(table_name = media_store)]
pub struct NewMediaRow<'a> {
    pub id: Uuid,
    pub short_id: &'a str,
    pub file_data: &'a [u8],
    pub content_type: &'a str,
    pub filename: Option<&'a str>,
    pub file_size: i64,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a NewMediaRecord> for NewMediaRow<'a> {
    fn from(record: &'a NewMediaRecord) -> Self {
        Self {
            id: record.canonical_key().into_uuid(),
            short_id: record.short_code().as_str(),
            file_data: record.payload(),
            content_type: record.content_type(),
            filename: record.filename().as_deref(),
            file_size: record.size() as i64,
            access_count: 0,
            created_at: *record.created_at(),
        }
    }
}
