use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};

use super::{LockError, LockManager, RowLock};

/// In-memory row lock backed by `Mutex<bool>` + `Condvar`.
pub struct InMemoryRowLock {
    held: Mutex<bool>,
    wake: Condvar,
}

impl InMemoryRowLock {
    pub fn new() -> Self {
        InMemoryRowLock {
            held: Mutex::new(false),
            wake: Condvar::new(),
        }
    }
}

impl Default for InMemoryRowLock {
    fn default() -> Self {
        Self::new()
    }
}

impl RowLock for InMemoryRowLock {
    fn lock(&self) -> Result<(), LockError> {
        let mut held = self
            .held
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        while *held {
            held = self
                .wake
                .wait(held)
                .map_err(|e| LockError::Poisoned(e.to_string()))?;
        }
        *held = true;
        Ok(())
    }

    fn unlock(&self) -> Result<(), LockError> {
        let mut held = self
            .held
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        if !*held {
            return Err(LockError::ReleaseFailed("row is not locked".into()));
        }
        *held = false;
        self.wake.notify_one();
        Ok(())
    }
}

/// Lock manager that creates one [`InMemoryRowLock`] per key on demand and
/// drops it when the last guard releases.
pub struct InMemoryLockManager {
    rows: Mutex<HashMap<String, Arc<InMemoryRowLock>>>,
}

impl InMemoryLockManager {
    pub fn new() -> Self {
        InMemoryLockManager {
            rows: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryLockManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LockManager for InMemoryLockManager {
    type Lock = InMemoryRowLock;

    fn get_lock(&self, key: &str) -> Result<Arc<InMemoryRowLock>, LockError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| LockError::Poisoned("row lock table".into()))?;
        Ok(rows
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(InMemoryRowLock::new()))
            .clone())
    }

    fn release(&self, key: &str, lock: &Arc<InMemoryRowLock>) -> Result<(), LockError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| LockError::Poisoned("row lock table".into()))?;

        // Waiters took their handle under this mutex, so a count of two
        // (table + releasing guard) means nobody else wants the row.
        let idle = Arc::strong_count(lock) == 2
            && rows.get(key).is_some_and(|entry| Arc::ptr_eq(entry, lock));
        if idle {
            rows.remove(key);
        }
        lock.unlock()
    }
}
