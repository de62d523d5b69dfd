//! Lookup miss.

/// Raised when a token resolves to no live record.
///
/// The message is deliberately generic: it never says whether the token was
/// tried as a short code, a canonical key, or both.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media not found at line {} in {}", line, file)]
pub struct NotFoundError {
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl NotFoundError {
    /// Create a new NotFoundError at the current location.
    #[track_caller]
    pub fn new() -> Self {
        let location = std::panic::Location::caller();
        Self {
            line: location.line(),
            file: location.file(),
        }
    }
}
