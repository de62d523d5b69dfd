//! Media record stores for mediaqr.
//!
//! The [`MediaStore`] trait is the collaborator the service layer talks to:
//! point lookups by either key, an insert that refuses duplicate short codes,
//! an atomic access-count increment, delete, and aggregate totals.
//!
//! # Backends
//!
//! - [`MemoryStore`]: in-process, always available
//! - `PostgresMediaStore`: Diesel + r2d2, behind the `postgres` feature
//!
//! # Example
//!
//! ```rust
//! use mediaqr_core::{CanonicalKey, NewMediaRecord, ShortCode};
//! use mediaqr_storage::{InsertOutcome, MediaStore, MemoryStore};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! let record = NewMediaRecord::new(
//!     CanonicalKey::generate(),
//!     ShortCode::parse("Ab3d9Z").unwrap(),
//!     bytes::Bytes::from_static(b"\x89PNG"),
//!     "image/png",
//!     Some("logo.png".to_string()),
//! );
//!
//! assert!(matches!(store.insert(record).await?, InsertOutcome::Inserted(_)));
//! assert!(store.find_by_short_code("Ab3d9Z").await?.is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;
#[cfg(feature = "postgres")]
mod postgres;
mod store;

pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::{MIGRATIONS, PostgresMediaStore};
pub use store::{InsertOutcome, MediaStore, StoreTotals};
