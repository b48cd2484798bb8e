//! InMemoryModelStore - HashMap-backed model store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{row_key, ExpectedVersion, Model, ModelError, ModelStore, Versioned, WriteBatch};

struct StoredRow {
    bytes: Vec<u8>,
    version: u64,
}

/// In-memory model store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clones share the same rows.
#[derive(Clone)]
pub struct InMemoryModelStore {
    rows: Arc<RwLock<HashMap<String, StoredRow>>>,
}

impl Default for InMemoryModelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn decode<M: Model>(row: &StoredRow) -> Result<Versioned<M>, ModelError> {
        let data: M =
            serde_json::from_slice(&row.bytes).map_err(|e| ModelError::Serde(e.to_string()))?;
        Ok(Versioned {
            data,
            version: row.version,
        })
    }
}

impl ModelStore for InMemoryModelStore {
    fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))?;

        rows.get(&row_key::<M>(id))
            .map(|row| Self::decode::<M>(row))
            .transpose()
    }

    fn save_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let key = row_key::<M>(model.id());
        let bytes = serde_json::to_vec(model).map_err(|e| ModelError::Serde(e.to_string()))?;

        let mut rows = self
            .rows
            .write()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))?;

        let version = rows.get(&key).map(|r| r.version + 1).unwrap_or(1);
        rows.insert(key, StoredRow { bytes, version });

        Ok(Versioned {
            data: model.clone(),
            version,
        })
    }

    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))?;

        let prefix = format!("{}:", M::COLLECTION);
        let mut results = Vec::new();
        for (key, row) in rows.iter() {
            if !key.starts_with(&prefix) {
                continue;
            }
            let model = Self::decode::<M>(row)?;
            if predicate(&model.data) {
                results.push(model);
            }
        }

        Ok(results)
    }

    fn apply_batch(&self, batch: WriteBatch) -> Result<(), ModelError> {
        let writes = batch.into_writes();
        if writes.is_empty() {
            return Ok(());
        }

        let mut rows = self
            .rows
            .write()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))?;

        for write in &writes {
            let actual = rows.get(&write.key).map(|r| r.version);
            match (write.expected, actual) {
                (ExpectedVersion::Absent, None) => {}
                (ExpectedVersion::Exactly(expected), Some(actual)) if expected == actual => {}
                (expected, actual) => {
                    return Err(ModelError::ConcurrencyConflict {
                        key: write.key.clone(),
                        expected: match expected {
                            ExpectedVersion::Absent => 0,
                            ExpectedVersion::Exactly(v) => v,
                        },
                        actual: actual.unwrap_or(0),
                    });
                }
            }
        }

        for write in writes {
            let version = rows.get(&write.key).map(|r| r.version + 1).unwrap_or(1);
            rows.insert(
                write.key,
                StoredRow {
                    bytes: write.bytes,
                    version,
                },
            );
        }

        Ok(())
    }
}
