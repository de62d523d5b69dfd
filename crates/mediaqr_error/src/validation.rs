//! Upload validation errors.
//!
//! These are raised before any storage mutation is attempted, so a
//! validation failure never leaves a partial record behind.

/// Reasons an upload is rejected as bad input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Declared content type is not on the allow-list
    #[display("Content type '{}' is not allowed; accepted types are audio/*, video/* and image/*", _0)]
    DisallowedContentType(String),
    /// Payload has zero bytes
    #[display("Uploaded file is empty")]
    EmptyPayload,
    /// Payload exceeds the configured ceiling
    #[display("File too large ({} bytes); maximum allowed is {} bytes", actual, max)]
    PayloadTooLarge {
        /// Observed payload size in bytes
        actual: u64,
        /// Configured ceiling in bytes
        max: u64,
    },
    /// Client-supplied file name is longer than the stored column allows
    #[display("File name too long ({} characters); maximum allowed is {}", actual, max)]
    FilenameTooLong {
        /// Observed length in characters
        actual: usize,
        /// Maximum length in characters
        max: usize,
    },
    /// Client-supplied file name contains control characters
    #[display("File name must not contain control characters")]
    InvalidFilename,
    /// Upload request is structurally broken (missing field, bad multipart body)
    #[display("Malformed upload: {}", _0)]
    MalformedUpload(String),
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use mediaqr_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::PayloadTooLarge {
///     actual: 11,
///     max: 10,
/// });
/// let message = format!("{}", err);
/// assert!(message.contains("11 bytes"));
/// assert!(message.contains("10 bytes"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when the payload was rejected for size rather than shape.
    pub fn is_too_large(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::PayloadTooLarge { .. })
    }
}
