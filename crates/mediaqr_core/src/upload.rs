//! Upload pre-conditions.

use crate::is_allowed_content_type;
use mediaqr_error::{ValidationError, ValidationErrorKind};

/// Default payload ceiling: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Longest accepted file name, in characters.
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Limits an upload must satisfy before any record is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadPolicy {
    max_file_size: u64,
}

impl UploadPolicy {
    /// Policy with the given payload ceiling in bytes.
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Payload ceiling in bytes; a payload of exactly this size is accepted.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Check content type, then ceiling, then emptiness.
    ///
    /// # Errors
    ///
    /// `DisallowedContentType`, `PayloadTooLarge` (with both sizes) or
    /// `EmptyPayload`, in that order of precedence.
    pub fn validate(&self, content_type: &str, size: u64) -> Result<(), ValidationError> {
        if !is_allowed_content_type(content_type) {
            return Err(ValidationError::new(
                ValidationErrorKind::DisallowedContentType(content_type.to_string()),
            ));
        }
        self.check_size(size)?;
        if size == 0 {
            return Err(ValidationError::new(ValidationErrorKind::EmptyPayload));
        }
        Ok(())
    }

    /// File names are optional; a present one must fit [`MAX_FILENAME_LENGTH`]
    /// and be free of control characters.
    pub fn validate_filename(&self, filename: Option<&str>) -> Result<(), ValidationError> {
        let Some(filename) = filename else {
            return Ok(());
        };
        let length = filename.chars().count();
        if length > MAX_FILENAME_LENGTH {
            return Err(ValidationError::new(ValidationErrorKind::FilenameTooLong {
                actual: length,
                max: MAX_FILENAME_LENGTH,
            }));
        }
        if filename.chars().any(char::is_control) {
            return Err(ValidationError::new(ValidationErrorKind::InvalidFilename));
        }
        Ok(())
    }

    /// Ceiling check alone, for callers that count bytes while reading.
    pub fn check_size(&self, size: u64) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::new(ValidationErrorKind::PayloadTooLarge {
                actual: size,
                max: self.max_file_size,
            }));
        }
        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}
