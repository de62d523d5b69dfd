//! Short-code allocation failures.

/// Ways allocation of a new record can fail after validation passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AllocationErrorKind {
    /// Every attempt produced a short code that was already taken
    #[display("Could not allocate a unique short code after {} attempts", attempts)]
    Exhausted {
        /// Number of candidates tried
        attempts: u32,
    },
}

/// Allocation error with location tracking.
///
/// Always a server-side condition: hitting the retry bound points at load or
/// entropy problems, never at bad input.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Allocation Error: {} at line {} in {}", kind, line, file)]
pub struct AllocationError {
    /// The kind of error that occurred
    pub kind: AllocationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AllocationError {
    /// Create a new allocation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AllocationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
