//! Core data types for the mediaqr media store.
//!
//! This crate owns the two identifier spaces a record lives in:
//!
//! - **Canonical keys**: random v4 UUIDs, the durable primary key.
//! - **Short codes**: six base62 symbols drawn from the OS CSPRNG, the
//!   public alias printed into QR codes.
//!
//! It also defines the record model and the upload pre-conditions
//! (content-type allow-list and payload ceiling).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod canonical_key;
mod content_type;
mod record;
mod short_code;
mod upload;

pub use canonical_key::{CanonicalKey, is_canonical_key_syntax};
pub use content_type::{ALLOWED_CONTENT_TYPES, is_allowed_content_type};
pub use record::{MediaInfo, MediaRecord, NewMediaRecord};
pub use short_code::{
    DEFAULT_SHORT_CODE_LENGTH, RandomShortCodeGenerator, SHORT_CODE_ALPHABET, ShortCode,
    ShortCodeGenerator, generate_short_code,
};
pub use upload::{DEFAULT_MAX_FILE_SIZE, MAX_FILENAME_LENGTH, UploadPolicy};
