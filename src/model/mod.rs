//! Models - typed, versioned rows in a key/value backed store.
//!
//! Every persisted entity (users, stores, product units, orders) is a
//! [`Model`]: a serde type with a collection name and a string id. Stores
//! keep a version per row; multi-row writes go through a [`WriteBatch`] so
//! they commit all-or-nothing.
//!
//! ## Example
//!
//! ```ignore
//! use grocery_orders::{InMemoryModelStore, ModelsExt, ModelStore, WriteBatch};
//!
//! let store = InMemoryModelStore::new();
//! store.models::<User>().save(&alice)?;
//!
//! let current = store.models::<ProductUnit>().get("unit-1")?.unwrap();
//! let mut batch = WriteBatch::new();
//! batch.update(&decremented, current.version)?;
//! batch.insert(&order)?;
//! store.apply_batch(batch)?;
//! ```

mod batch;
mod in_memory;
mod model_repository;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Trait for types that can be stored as models.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Collection name (a table in SQL, a key prefix in KV stores).
    const COLLECTION: &'static str;

    /// Unique identifier of this row.
    fn id(&self) -> &str;
}

/// Storage key for a row: `"COLLECTION:id"`.
pub fn row_key<M: Model>(id: &str) -> String {
    format!("{}:{}", M::COLLECTION, id)
}

/// A model together with the row version it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for model store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Optimistic concurrency conflict.
    ConcurrencyConflict {
        key: String,
        expected: u64,
        actual: u64,
    },
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::ConcurrencyConflict {
                key,
                expected,
                actual,
            } => write!(
                f,
                "concurrency conflict on {} (expected version {}, actual {})",
                key, expected, actual
            ),
            ModelError::Serde(msg) => write!(f, "model serialization error: {}", msg),
            ModelError::Storage(msg) => write!(f, "model storage error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

pub use batch::{ExpectedVersion, StagedWrite, WriteBatch};
pub use in_memory::InMemoryModelStore;
pub use model_repository::{ModelRepository, ModelsExt};
pub use store::ModelStore;
