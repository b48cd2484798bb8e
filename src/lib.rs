mod config;
mod domain;
mod error;
mod lock;
mod model;
mod orders;
mod storage;
mod telemetry;

pub use config::OrderConfig;
pub use domain::{Actor, Order, OrderItem, OrderStatus, Product, ProductUnit, Role, Store, User, UserStatus};
pub use error::{OrderError, OrderResult};
pub use lock::{
    lock_row, lock_rows, InMemoryLockManager, InMemoryRowLock, LockError, LockManager, RowGuard,
    RowLock,
};
pub use model::{
    row_key, ExpectedVersion, InMemoryModelStore, Model, ModelError, ModelRepository, ModelStore,
    ModelsExt, StagedWrite, Versioned, WriteBatch,
};
pub use orders::{
    rule_for, Authority, NewOrder, OrderLine, OrderService, RequiredField, StatusChange,
    TransitionRule, TRANSITIONS,
};
pub use storage::{
    InMemoryStorage, ModelStorage, ModelTransaction, OrderFilter, OrderStorage, StockDecrement,
    Transaction,
};
pub use telemetry::init_tracing;

// Re-export the decimal type used for every money amount
pub use rust_decimal::Decimal;
