//! Storage collaborators of the order engine.
//!
//! [`OrderStorage`] is the shared backing store. Every mutating operation
//! runs inside one [`Transaction`]: rows it intends to write are locked
//! before they are read, writes are staged, and [`Transaction::commit`]
//! applies them all at once. Dropping a transaction without committing
//! rolls it back and releases its locks.

mod filter;
mod model_storage;

pub use filter::OrderFilter;
pub use model_storage::{InMemoryStorage, ModelStorage, ModelTransaction};

use crate::domain::{Order, Product, ProductUnit, Store, User};
use crate::error::OrderResult;

/// Outcome of a conditional stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecrement {
    /// Stock was reduced; `remaining` is what is left.
    Applied { remaining: u32 },
    /// Stock was left untouched. `available` is the stock the row held when
    /// the transaction locked it; `requested` is everything this transaction
    /// asked of the unit, including this call.
    Insufficient { available: u32, requested: u32 },
}

/// One atomic unit of work against the backing store.
pub trait Transaction {
    fn user(&mut self, id: &str) -> OrderResult<Option<User>>;

    fn store(&mut self, id: &str) -> OrderResult<Option<Store>>;

    fn product(&mut self, id: &str) -> OrderResult<Option<Product>>;

    /// Lock product units for the rest of the transaction.
    ///
    /// Callers pass every unit they will touch in one call so rows are
    /// acquired in a consistent order.
    fn lock_units(&mut self, ids: &[String]) -> OrderResult<()>;

    /// Current state of a unit, including decrements staged by this transaction.
    fn unit(&mut self, id: &str) -> OrderResult<Option<ProductUnit>>;

    /// Reduce a locked unit's stock by `quantity`, unless that would go negative.
    fn decrement_stock(&mut self, unit_id: &str, quantity: u32) -> OrderResult<StockDecrement>;

    /// Stage a new order row.
    fn insert_order(&mut self, order: &Order) -> OrderResult<()>;

    /// Lock an order row and read it.
    fn lock_order(&mut self, id: &str) -> OrderResult<Option<Order>>;

    /// Stage the new state of an order locked with [`Transaction::lock_order`].
    fn update_order(&mut self, order: &Order) -> OrderResult<()>;

    /// Apply every staged write atomically and release all locks.
    fn commit(self) -> OrderResult<()>
    where
        Self: Sized;
}

/// Shared backing store for orders and the catalog rows they reference.
pub trait OrderStorage: Send + Sync {
    type Tx: Transaction;

    fn begin(&self) -> OrderResult<Self::Tx>;

    fn order(&self, id: &str) -> OrderResult<Option<Order>>;

    /// Orders matching `filter`, sorted as the filter prescribes.
    fn find_orders(&self, filter: &OrderFilter) -> OrderResult<Vec<Order>>;

    fn count_orders(&self, filter: &OrderFilter) -> OrderResult<usize>;

    /// The store owned by a user, if any.
    fn store_owned_by(&self, owner_id: &str) -> OrderResult<Option<Store>>;
}
