//! ModelStore - abstract storage for models.

use super::{Model, ModelError, Versioned, WriteBatch};

/// Abstract storage for models.
pub trait ModelStore: Send + Sync {
    /// Get a model by id. Returns `None` if not found.
    fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError>;

    /// Upsert a model without a version check.
    fn save_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError>;

    /// Models matching a predicate, in no particular order.
    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError>;

    /// Apply every staged write, or none of them.
    ///
    /// All version expectations are checked before the first write lands.
    fn apply_batch(&self, batch: WriteBatch) -> Result<(), ModelError>;
}
