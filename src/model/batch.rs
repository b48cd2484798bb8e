//! WriteBatch - version-checked writes that commit together.

use super::{row_key, Model, ModelError};

/// What the store must hold at a key for a staged write to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// The row must not exist yet.
    Absent,
    /// The row must still be at this version.
    Exactly(u64),
}

/// One pending row write.
#[derive(Debug, Clone)]
pub struct StagedWrite {
    pub key: String,
    pub bytes: Vec<u8>,
    pub expected: ExpectedVersion,
}

/// Writes collected by a unit of work and applied atomically by a store.
#[derive(Debug, Default)]
pub struct WriteBatch {
    writes: Vec<StagedWrite>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a new row.
    pub fn insert<M: Model>(&mut self, model: &M) -> Result<(), ModelError> {
        self.stage(model, ExpectedVersion::Absent)
    }

    /// Stage a replacement for a row read at `expected_version`.
    pub fn update<M: Model>(&mut self, model: &M, expected_version: u64) -> Result<(), ModelError> {
        self.stage(model, ExpectedVersion::Exactly(expected_version))
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Consume the batch.
    pub fn into_writes(self) -> Vec<StagedWrite> {
        self.writes
    }

    // A key staged twice keeps its first expectation and the latest bytes.
    fn stage<M: Model>(&mut self, model: &M, expected: ExpectedVersion) -> Result<(), ModelError> {
        let key = row_key::<M>(model.id());
        let bytes = serde_json::to_vec(model).map_err(|e| ModelError::Serde(e.to_string()))?;

        if let Some(existing) = self.writes.iter_mut().find(|w| w.key == key) {
            existing.bytes = bytes;
            return Ok(());
        }

        self.writes.push(StagedWrite {
            key,
            bytes,
            expected,
        });
        Ok(())
    }
}
