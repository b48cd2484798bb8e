use super::LockError;

/// A lock on a single stored row.
///
/// `lock` blocks until the row is free. Implementations must be usable from
/// many threads at once.
pub trait RowLock: Send + Sync {
    /// Acquire the row, blocking until it becomes available.
    fn lock(&self) -> Result<(), LockError>;

    /// Release the row. Fails with [`LockError::ReleaseFailed`] if it is not held.
    fn unlock(&self) -> Result<(), LockError>;
}
