//! Identifier allocation and dual-key resolution for mediaqr.
//!
//! - [`Allocator`] validates uploads and inserts them under fresh short
//!   codes, retrying only on short-code collisions.
//! - [`Resolver`] maps a client token to a record, short code first.
//! - [`AccessAccounting`] counts content deliveries off the response path.
//! - [`UsageReport`] and [`StoreStats`] summarise the store.
//!
//! [`MediaService`] ties them together.
//!
//! # Example
//!
//! ```
//! use mediaqr_service::{MediaService, ServiceSettings, Upload};
//! use mediaqr_storage::MemoryStore;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> mediaqr_error::MediaQrResult<()> {
//! let service = MediaService::new(Arc::new(MemoryStore::new()), ServiceSettings::default());
//! let record = service
//!     .upload(Upload::new(&b"\x89PNG"[..], "image/png", Some("dot.png".into())))
//!     .await?;
//!
//! let found = service.retrieve(record.short_code().as_str()).await?;
//! assert_eq!(found.canonical_key(), record.canonical_key());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod accounting;
mod allocation;
mod resolver;
mod service;
mod usage;

pub use accounting::{AccessAccounting, DEFAULT_ACCOUNTING_QUEUE_CAPACITY};
pub use allocation::{Allocator, DEFAULT_ALLOCATION_ATTEMPTS, Upload};
pub use resolver::Resolver;
pub use service::{
    MediaService, ServiceSettings, ServiceSettingsBuilder, ServiceSettingsBuilderError,
};
pub use usage::{DEFAULT_STORAGE_CAPACITY_BYTES, StoreStats, UsageReport};
