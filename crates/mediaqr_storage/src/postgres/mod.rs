//! PostgreSQL media store.
//!
//! Short-code uniqueness is the `media_store_short_id_key` constraint; a
//! violation of exactly that constraint is reported as a collision, any other
//! database error is a storage failure.

mod models;
mod schema;

use crate::{InsertOutcome, MediaStore, StoreTotals};
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::BigInt;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use mediaqr_core::{CanonicalKey, MediaRecord, NewMediaRecord, ShortCode};
use mediaqr_error::{MediaQrResult, StorageError, StorageErrorKind};
use models::{MediaRow, NewMediaRow};
use schema::media_store;

/// Schema migrations shipped with this crate.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const SHORT_CODE_CONSTRAINT: &str = "media_store_short_id_key";

type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Database-backed media store.
#[derive(Clone)]
pub struct PostgresMediaStore {
    pool: PgPool,
}

impl PostgresMediaStore {
    /// Wrap an existing pool. Migrations are not run.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool for `database_url` and bring the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created or a migration fails.
    #[tracing::instrument(skip(database_url))]
    pub fn connect(database_url: &str, pool_size: u32) -> MediaQrResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(StorageError::from)?;

        let mut conn = pool.get().map_err(StorageError::from)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StorageError::new(StorageErrorKind::Migration(e.to_string())))?;
        tracing::info!(migrations = applied.len(), "Connected to PostgreSQL media store");

        Ok(Self { pool })
    }

    /// Run a closure against a pooled connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, op: F) -> MediaQrResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MediaQrResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(StorageError::from)?;
            op(&mut *conn)
        })
        .await
        .map_err(|e| StorageError::new(StorageErrorKind::Task(e.to_string())))?
    }
}

fn is_short_code_violation(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(SHORT_CODE_CONSTRAINT)
    )
}

#[async_trait::async_trait]
impl MediaStore for PostgresMediaStore {
    #[tracing::instrument(skip(self, record), fields(short_code = %record.short_code(), size = record.size()))]
    async fn insert(&self, record: NewMediaRecord) -> MediaQrResult<InsertOutcome> {
        self.with_conn(move |conn| {
            let result = diesel::insert_into(media_store::table)
                .values(NewMediaRow::from(&record))
                .execute(conn);
            match result {
                Ok(_) => Ok(InsertOutcome::Inserted(MediaRecord::inserted(record))),
                Err(e) if is_short_code_violation(&e) => {
                    Ok(InsertOutcome::ShortCodeTaken(record.short_code().clone()))
                }
                Err(e) => Err(StorageError::from(e).into()),
            }
        })
        .await
    }

    async fn find_by_short_code(&self, short_code: &str) -> MediaQrResult<Option<MediaRecord>> {
        // Text parameters containing NUL are rejected by the server outright.
        let Some(short_code) = ShortCode::parse(short_code) else {
            return Ok(None);
        };
        self.with_conn(move |conn| {
            let row = media_store::table
                .filter(media_store::short_id.eq(short_code.as_str()))
                .select(MediaRow::as_select())
                .first(conn)
                .optional()
                .map_err(StorageError::from)?;
            Ok(row.map(MediaRecord::from))
        })
        .await
    }

    async fn find_by_canonical_key(
        &self,
        canonical_key: CanonicalKey,
    ) -> MediaQrResult<Option<MediaRecord>> {
        self.with_conn(move |conn| {
            let row = media_store::table
                .find(canonical_key.into_uuid())
                .select(MediaRow::as_select())
                .first(conn)
                .optional()
                .map_err(StorageError::from)?;
            Ok(row.map(MediaRecord::from))
        })
        .await
    }

    async fn increment_access_count(&self, canonical_key: CanonicalKey) -> MediaQrResult<bool> {
        self.with_conn(move |conn| {
            let updated = diesel::update(media_store::table.find(canonical_key.into_uuid()))
                .set(media_store::access_count.eq(media_store::access_count + 1i64))
                .execute(conn)
                .map_err(StorageError::from)?;
            Ok(updated > 0)
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, canonical_key: CanonicalKey) -> MediaQrResult<bool> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(media_store::table.find(canonical_key.into_uuid()))
                .execute(conn)
                .map_err(StorageError::from)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn totals(&self) -> MediaQrResult<StoreTotals> {
        self.with_conn(|conn| {
            let (count, total, last): (i64, i64, Option<DateTime<Utc>>) = media_store::table
                .select((
                    diesel::dsl::count_star(),
                    diesel::dsl::sql::<BigInt>("COALESCE(SUM(file_size), 0)::BIGINT"),
                    diesel::dsl::max(media_store::created_at),
                ))
                .first(conn)
                .map_err(StorageError::from)?;
            Ok(StoreTotals {
                record_count: count.max(0) as u64,
                total_bytes: total.max(0) as u64,
                last_created_at: last,
            })
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn clear(&self) -> MediaQrResult<u64> {
        self.with_conn(|conn| {
            let deleted = diesel::delete(media_store::table)
                .execute(conn)
                .map_err(StorageError::from)?;
            Ok(deleted as u64)
        })
        .await
    }
}
