use crate::config::OrderConfig;
use crate::storage::OrderStorage;

/// Entry point for order operations.
///
/// Holds no mutable state of its own; concurrent callers coordinate
/// through the storage's transactions.
pub struct OrderService<St> {
    pub(super) storage: St,
    pub(super) config: OrderConfig,
}

impl<St: OrderStorage> OrderService<St> {
    pub fn new(storage: St, config: OrderConfig) -> Self {
        Self { storage, config }
    }

    /// Service with [`OrderConfig::default`].
    pub fn with_defaults(storage: St) -> Self {
        Self::new(storage, OrderConfig::default())
    }

    pub fn storage(&self) -> &St {
        &self.storage
    }

    pub fn config(&self) -> &OrderConfig {
        &self.config
    }
}
