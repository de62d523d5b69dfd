//! Error types for the mediaqr media store.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! `MediaQrError` boxes any of them and is what crate APIs return.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod accounting;
mod allocation;
mod config;
mod error;
mod not_found;
mod server;
mod storage;
mod validation;

pub use accounting::{AccountingError, AccountingErrorKind};
pub use allocation::{AllocationError, AllocationErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{MediaQrError, MediaQrErrorKind, MediaQrResult};
pub use not_found::NotFoundError;
pub use server::{ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
