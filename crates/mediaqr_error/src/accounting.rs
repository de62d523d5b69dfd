//! Background access-accounting failures.
//!
//! These are only ever logged by the accounting worker; they are never
//! returned to a client.

/// Why an access-count increment did not land.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AccountingErrorKind {
    /// The record vanished between retrieval and increment
    #[display("Record {} no longer exists", _0)]
    RecordMissing(String),
    /// The store rejected the increment
    #[display("Store failed to increment access count: {}", _0)]
    Store(String),
}

/// Accounting error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Accounting Error: {} at line {} in {}", kind, line, file)]
pub struct AccountingError {
    /// The kind of error that occurred
    pub kind: AccountingErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AccountingError {
    /// Create a new accounting error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AccountingErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
