use tracing::{info, instrument};

use super::OrderService;
use crate::domain::{Actor, Order, OrderStatus, Role};
use crate::error::{OrderError, OrderResult};
use crate::storage::{OrderStorage, Transaction};

impl<St: OrderStorage> OrderService<St> {
    /// Let `shipper` claim a CONFIRMED, unassigned order.
    ///
    /// The status and shipper checks run against the row held under lock and
    /// the write is version-checked, so of two concurrent claims exactly one
    /// succeeds; the other sees PICKING_UP and fails with `InvalidState`.
    #[instrument(skip(self, shipper), fields(shipper = %shipper.id))]
    pub fn assign_shipper(&self, shipper: &Actor, order_id: &str) -> OrderResult<Order> {
        let mut tx = self.storage.begin()?;
        let mut order = tx
            .lock_order(order_id)?
            .ok_or_else(|| OrderError::not_found("order", order_id))?;

        if order.status() != OrderStatus::Confirmed {
            return Err(OrderError::InvalidState(format!(
                "order {} is already claimed or not yet confirmed",
                order_id
            )));
        }
        if order.shipper_id().is_some() {
            return Err(OrderError::InvalidState(format!(
                "order {} already has a shipper",
                order_id
            )));
        }

        let user = tx
            .user(&shipper.id)?
            .ok_or_else(|| OrderError::not_found("user", &shipper.id))?;
        if !user.has_capability(Role::Shipper) {
            return Err(OrderError::Forbidden(
                "only shippers can claim orders".into(),
            ));
        }

        order.claim(&user.id);
        tx.update_order(&order)?;
        tx.commit()?;

        info!(order = %order_id, shipper = %user.full_name, "shipper claimed order");
        Ok(order)
    }
}
