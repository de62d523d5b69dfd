//! Top-level error wrapper types.

use crate::{
    AccountingError, AllocationError, ConfigError, NotFoundError, ServerError, StorageError,
    ValidationError,
};

/// Every error a mediaqr crate can produce.
///
/// # Examples
///
/// ```
/// use mediaqr_error::{MediaQrError, NotFoundError};
///
/// let err: MediaQrError = NotFoundError::new().into();
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MediaQrErrorKind {
    /// Upload rejected before allocation
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Token resolved to nothing
    #[from(NotFoundError)]
    NotFound(NotFoundError),
    /// Short-code retry bound hit
    #[from(AllocationError)]
    Allocation(AllocationError),
    /// Background increment failed
    #[from(AccountingError)]
    Accounting(AccountingError),
    /// Backing store failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Server process error
    #[from(ServerError)]
    Server(ServerError),
}

/// mediaqr error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("MediaQr Error: {}", _0)]
pub struct MediaQrError(Box<MediaQrErrorKind>);

impl MediaQrError {
    /// Create a new error from a kind.
    pub fn new(kind: MediaQrErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MediaQrErrorKind {
        &self.0
    }

    /// True if this is a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), MediaQrErrorKind::NotFound(_))
    }
}

// Generic From implementation for any type that converts to MediaQrErrorKind
impl<T> From<T> for MediaQrError
where
    T: Into<MediaQrErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for mediaqr operations.
///
/// # Examples
///
/// ```
/// use mediaqr_error::{MediaQrResult, NotFoundError};
///
/// fn lookup() -> MediaQrResult<Vec<u8>> {
///     Err(NotFoundError::new())?
/// }
///
/// assert!(lookup().unwrap_err().is_not_found());
/// ```
pub type MediaQrResult<T> = std::result::Result<T, MediaQrError>;
