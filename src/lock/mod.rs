//! Row locks - pessimistic per-row locking for units of work.
//!
//! A [`LockManager`] hands out one [`RowLock`] per storage key
//! (`"COLLECTION:id"`). Units of work acquire the rows they intend to write
//! before reading them, hold the returned [`RowGuard`]s until commit or
//! rollback, and release on drop. The in-memory manager forgets a key once
//! its last guard is gone, so the lock table only holds rows in use.
//!
//! The in-memory implementation serializes threads of one process. A shared
//! relational store would implement the same traits with `SELECT ... FOR UPDATE`
//! or advisory locks.

mod error;
mod guard;
mod in_memory;
mod lock;
mod lock_manager;

pub use error::LockError;
pub use guard::RowGuard;
pub use in_memory::{InMemoryLockManager, InMemoryRowLock};
pub use lock::RowLock;
pub use lock_manager::{lock_row, lock_rows, LockManager};
