use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use super::{OrderFilter, OrderStorage, StockDecrement, Transaction};
use crate::domain::{Order, Product, ProductUnit, Store, User};
use crate::error::{OrderError, OrderResult};
use crate::lock::{lock_row, lock_rows, InMemoryLockManager, LockManager, RowGuard};
use crate::model::{row_key, InMemoryModelStore, ModelStore, Versioned, WriteBatch};

/// [`OrderStorage`] over any [`ModelStore`] plus a [`LockManager`] for row locks.
pub struct ModelStorage<S, L> {
    models: S,
    locks: Arc<L>,
}

/// Process-local storage, for tests and single-node deployments.
pub type InMemoryStorage = ModelStorage<InMemoryModelStore, InMemoryLockManager>;

impl InMemoryStorage {
    pub fn in_memory() -> Self {
        ModelStorage::new(InMemoryModelStore::new(), InMemoryLockManager::new())
    }
}

impl<S, L> ModelStorage<S, L> {
    pub fn new(models: S, locks: L) -> Self {
        Self {
            models,
            locks: Arc::new(locks),
        }
    }

    /// The underlying model store, for seeding catalog rows.
    pub fn models(&self) -> &S {
        &self.models
    }
}

impl<S: Clone, L> Clone for ModelStorage<S, L> {
    fn clone(&self) -> Self {
        Self {
            models: self.models.clone(),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<S, L> OrderStorage for ModelStorage<S, L>
where
    S: ModelStore + Clone,
    L: LockManager,
{
    type Tx = ModelTransaction<S, L>;

    fn begin(&self) -> OrderResult<Self::Tx> {
        Ok(ModelTransaction::new(
            self.models.clone(),
            Arc::clone(&self.locks),
        ))
    }

    fn order(&self, id: &str) -> OrderResult<Option<Order>> {
        Ok(self.models.get_model::<Order>(id)?.map(|v| v.data))
    }

    fn find_orders(&self, filter: &OrderFilter) -> OrderResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .models
            .find_models::<Order>(&|order| filter.matches(order))?
            .into_iter()
            .map(|v| v.data)
            .collect();
        orders.sort_by(|a, b| filter.compare(a, b));
        Ok(orders)
    }

    fn count_orders(&self, filter: &OrderFilter) -> OrderResult<usize> {
        Ok(self
            .models
            .find_models::<Order>(&|order| filter.matches(order))?
            .len())
    }

    fn store_owned_by(&self, owner_id: &str) -> OrderResult<Option<Store>> {
        let mut stores = self
            .models
            .find_models::<Store>(&|store| store.is_owned_by(owner_id))?;
        stores.sort_by(|a, b| a.data.id.cmp(&b.data.id));
        Ok(stores.into_iter().next().map(|v| v.data))
    }
}

/// A unit of work over a [`ModelStore`].
///
/// Rows locked through [`Transaction::lock_units`] / [`Transaction::lock_order`]
/// stay locked until commit or drop. Staged writes carry the version each row
/// was read at, so the store rejects the batch if anything changed underneath.
pub struct ModelTransaction<S, L: LockManager> {
    models: S,
    locks: Arc<L>,
    guards: Vec<RowGuard<L>>,
    locked: HashSet<String>,
    units: HashMap<String, Versioned<ProductUnit>>,
    reserved: HashMap<String, u32>,
    order_versions: HashMap<String, u64>,
    batch: WriteBatch,
}

impl<S, L: LockManager> ModelTransaction<S, L> {
    fn new(models: S, locks: Arc<L>) -> Self {
        Self {
            models,
            locks,
            guards: Vec::new(),
            locked: HashSet::new(),
            units: HashMap::new(),
            reserved: HashMap::new(),
            order_versions: HashMap::new(),
            batch: WriteBatch::new(),
        }
    }

    /// Number of writes staged so far.
    pub fn staged_writes(&self) -> usize {
        self.batch.len()
    }
}

impl<S, L> Transaction for ModelTransaction<S, L>
where
    S: ModelStore,
    L: LockManager,
{
    fn user(&mut self, id: &str) -> OrderResult<Option<User>> {
        Ok(self.models.get_model::<User>(id)?.map(|v| v.data))
    }

    fn store(&mut self, id: &str) -> OrderResult<Option<Store>> {
        Ok(self.models.get_model::<Store>(id)?.map(|v| v.data))
    }

    fn product(&mut self, id: &str) -> OrderResult<Option<Product>> {
        Ok(self.models.get_model::<Product>(id)?.map(|v| v.data))
    }

    fn lock_units(&mut self, ids: &[String]) -> OrderResult<()> {
        let keys: Vec<String> = ids
            .iter()
            .map(|id| row_key::<ProductUnit>(id))
            .filter(|key| !self.locked.contains(key))
            .collect();
        if keys.is_empty() {
            return Ok(());
        }

        let guards = lock_rows(&self.locks, &keys)?;
        self.locked.extend(keys);
        self.guards.extend(guards);
        Ok(())
    }

    fn unit(&mut self, id: &str) -> OrderResult<Option<ProductUnit>> {
        if let Some(unit) = self.units.get(id) {
            return Ok(Some(unit.data.clone()));
        }

        let fetched = self.models.get_model::<ProductUnit>(id)?;
        let Some(fetched) = fetched else {
            return Ok(None);
        };

        let unit = fetched.data.clone();
        // Only rows read under lock are trusted for later writes.
        if self.locked.contains(&row_key::<ProductUnit>(id)) {
            self.units.insert(id.to_string(), fetched);
        }
        Ok(Some(unit))
    }

    fn decrement_stock(&mut self, unit_id: &str, quantity: u32) -> OrderResult<StockDecrement> {
        if !self.locked.contains(&row_key::<ProductUnit>(unit_id)) {
            return Err(OrderError::Storage(format!(
                "product unit {} must be locked before its stock changes",
                unit_id
            )));
        }
        if !self.units.contains_key(unit_id) && self.unit(unit_id)?.is_none() {
            return Err(OrderError::not_found("product unit", unit_id));
        }

        let Some(entry) = self.units.get_mut(unit_id) else {
            return Err(OrderError::not_found("product unit", unit_id));
        };

        let reserved = self.reserved.entry(unit_id.to_string()).or_insert(0);
        let remaining = entry.data.stock_quantity;
        if remaining < quantity {
            return Ok(StockDecrement::Insufficient {
                available: remaining + *reserved,
                requested: reserved.saturating_add(quantity),
            });
        }

        *reserved += quantity;
        entry.data.stock_quantity = remaining - quantity;
        self.batch.update(&entry.data, entry.version)?;
        Ok(StockDecrement::Applied {
            remaining: entry.data.stock_quantity,
        })
    }

    fn insert_order(&mut self, order: &Order) -> OrderResult<()> {
        self.batch.insert(order)?;
        Ok(())
    }

    fn lock_order(&mut self, id: &str) -> OrderResult<Option<Order>> {
        let key = row_key::<Order>(id);
        if !self.locked.contains(&key) {
            let guard = lock_row(&self.locks, &key)?;
            self.guards.push(guard);
            self.locked.insert(key);
        }

        let fetched = self.models.get_model::<Order>(id)?;
        Ok(fetched.map(|v| {
            self.order_versions.insert(id.to_string(), v.version);
            v.data
        }))
    }

    fn update_order(&mut self, order: &Order) -> OrderResult<()> {
        let version = self
            .order_versions
            .get(order.id())
            .copied()
            .ok_or_else(|| {
                OrderError::Storage(format!(
                    "order {} must be locked before it is updated",
                    order.id()
                ))
            })?;
        self.batch.update(order, version)?;
        Ok(())
    }

    fn commit(self) -> OrderResult<()> {
        let ModelTransaction {
            models,
            guards,
            batch,
            ..
        } = self;

        let writes = batch.len();
        models.apply_batch(batch)?;
        drop(guards);
        debug!(writes, "transaction committed");
        Ok(())
    }
}
