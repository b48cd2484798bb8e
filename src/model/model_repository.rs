//! ModelRepository - typed handle on one collection, for seeding and
//! inspecting rows outside a transaction.

use std::marker::PhantomData;

use super::{Model, ModelError, ModelStore, Versioned};

/// Rows of one model type in a [`ModelStore`].
pub struct ModelRepository<'a, S, M> {
    store: &'a S,
    _marker: PhantomData<M>,
}

impl<'a, S: ModelStore, M: Model> ModelRepository<'a, S, M> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// The row and the version it is at, if present.
    pub fn get(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError> {
        self.store.get_model(id)
    }

    /// Upsert without a version check; catalog services own these rows.
    pub fn save(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        self.store.save_model(model)
    }
}

/// `store.models::<Order>()` on any [`ModelStore`].
pub trait ModelsExt: ModelStore + Sized {
    fn models<M: Model>(&self) -> ModelRepository<'_, Self, M> {
        ModelRepository::new(self)
    }
}

impl<S: ModelStore> ModelsExt for S {}
