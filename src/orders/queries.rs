use tracing::instrument;

use super::OrderService;
use crate::domain::{Actor, Order, OrderStatus, Role};
use crate::error::{OrderError, OrderResult};
use crate::storage::{OrderFilter, OrderStorage};

impl<St: OrderStorage> OrderService<St> {
    pub fn get_order(&self, order_id: &str) -> OrderResult<Order> {
        self.storage
            .order(order_id)?
            .ok_or_else(|| OrderError::not_found("order", order_id))
    }

    /// Orders matching `filter`: newest-first, except the pickup queue.
    pub fn orders(&self, filter: &OrderFilter) -> OrderResult<Vec<Order>> {
        self.storage.find_orders(filter)
    }

    pub fn orders_for_customer(&self, customer_id: &str) -> OrderResult<Vec<Order>> {
        self.orders(&OrderFilter::Customer(customer_id.to_string()))
    }

    pub fn orders_for_store(&self, store_id: &str) -> OrderResult<Vec<Order>> {
        self.orders(&OrderFilter::Store(store_id.to_string()))
    }

    pub fn orders_for_shipper(&self, shipper_id: &str) -> OrderResult<Vec<Order>> {
        self.orders(&OrderFilter::Shipper(shipper_id.to_string()))
    }

    /// CONFIRMED orders waiting for a shipper, oldest first.
    pub fn available_orders(&self) -> OrderResult<Vec<Order>> {
        self.orders(&OrderFilter::UnassignedConfirmed)
    }

    /// Orders of the store `owner` runs.
    #[instrument(skip(self, owner), fields(owner = %owner.id))]
    pub fn orders_for_store_owner(&self, owner: &Actor) -> OrderResult<Vec<Order>> {
        if !owner.is(Role::StoreOwner) {
            return Err(OrderError::Forbidden(
                "only store owners can list their store's orders".into(),
            ));
        }
        let store = self
            .storage
            .store_owned_by(&owner.id)?
            .ok_or_else(|| OrderError::not_found("store owned by user", &owner.id))?;
        self.orders_for_store(&store.id)
    }

    pub fn count_store_orders(&self, store_id: &str, status: OrderStatus) -> OrderResult<usize> {
        self.storage
            .count_orders(&OrderFilter::StoreWithStatus(store_id.to_string(), status))
    }
}
