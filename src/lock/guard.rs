use std::sync::Arc;

use tracing::warn;

use super::LockManager;

/// Holds a row lock until dropped.
pub struct RowGuard<M: LockManager> {
    key: String,
    lock: Arc<M::Lock>,
    manager: Arc<M>,
}

impl<M: LockManager> RowGuard<M> {
    pub(crate) fn new(key: &str, lock: Arc<M::Lock>, manager: Arc<M>) -> Self {
        Self {
            key: key.to_string(),
            lock,
            manager,
        }
    }

    /// Storage key of the locked row.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<M: LockManager> Drop for RowGuard<M> {
    fn drop(&mut self) {
        if let Err(err) = self.manager.release(&self.key, &self.lock) {
            warn!(key = %self.key, error = %err, "failed to release row lock");
        }
    }
}

impl<M: LockManager> std::fmt::Debug for RowGuard<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowGuard").field("key", &self.key).finish()
    }
}
