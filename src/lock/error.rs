use std::fmt;

/// Error type for row lock operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    /// The underlying primitive was poisoned (a thread panicked while holding it).
    Poisoned(String),
    /// A release was attempted on a row that is not held.
    ReleaseFailed(String),
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::Poisoned(msg) => write!(f, "row lock poisoned: {}", msg),
            LockError::ReleaseFailed(msg) => write!(f, "row lock release failed: {}", msg),
        }
    }
}

impl std::error::Error for LockError {}
