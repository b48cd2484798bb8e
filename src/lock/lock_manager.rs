use std::sync::Arc;

use super::{LockError, RowGuard, RowLock};

/// Factory for per-row locks.
///
/// Repeated calls with the same key must return the same logical lock while
/// anyone still holds or waits on it.
pub trait LockManager: Send + Sync {
    /// The concrete lock type returned by this manager.
    type Lock: RowLock;

    /// Get (or create) the lock for a storage key.
    fn get_lock(&self, key: &str) -> Result<Arc<Self::Lock>, LockError>;

    /// Release a row acquired through [`lock_row`].
    ///
    /// Managers that keep a lock per key can forget the key here once the
    /// caller's handle is the last one outstanding.
    fn release(&self, key: &str, lock: &Arc<Self::Lock>) -> Result<(), LockError> {
        let _ = key;
        lock.unlock()
    }
}

/// Lock one row and return a guard that releases it through `manager` on drop.
pub fn lock_row<M: LockManager>(manager: &Arc<M>, key: &str) -> Result<RowGuard<M>, LockError> {
    let lock = manager.get_lock(key)?;
    lock.lock()?;
    Ok(RowGuard::new(key, lock, Arc::clone(manager)))
}

/// Lock several rows in sorted key order.
///
/// Every caller acquires in the same order, so two units of work that
/// touch overlapping rows cannot deadlock. Duplicate keys are locked once.
/// If any acquisition fails, rows already taken are released.
pub fn lock_rows<M: LockManager>(
    manager: &Arc<M>,
    keys: &[String],
) -> Result<Vec<RowGuard<M>>, LockError> {
    let mut ordered: Vec<&str> = keys.iter().map(String::as_str).collect();
    ordered.sort_unstable();
    ordered.dedup();

    let mut guards = Vec::with_capacity(ordered.len());
    for key in ordered {
        guards.push(lock_row(manager, key)?);
    }
    Ok(guards)
}
