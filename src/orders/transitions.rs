use tracing::{info, instrument};

use super::OrderService;
use crate::domain::{Actor, Order, OrderStatus, Role, Store};
use crate::error::{OrderError, OrderResult};
use crate::storage::{OrderStorage, Transaction};

/// Who may apply a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    /// The owner of the order's store.
    StoreOwner,
    /// The customer who placed the order, or the store's owner.
    CustomerOrStoreOwner,
    /// The shipper already assigned to the order.
    AssignedShipper,
    /// Only [`OrderService::assign_shipper`]; no actor may request it directly.
    ShipperAssignment,
}

impl Authority {
    pub fn permits(self, actor: &Actor, order: &Order, store: &Store) -> bool {
        let owns_store = actor.is(Role::StoreOwner) && store.is_owned_by(&actor.id);
        match self {
            Authority::StoreOwner => owns_store,
            Authority::CustomerOrStoreOwner => order.customer_id() == actor.id || owns_store,
            Authority::AssignedShipper => order.shipper_id() == Some(actor.id.as_str()),
            Authority::ShipperAssignment => false,
        }
    }

    fn denial(self) -> &'static str {
        match self {
            Authority::StoreOwner => "only the store owner can do this",
            Authority::CustomerOrStoreOwner => {
                "only the ordering customer or the store owner can do this"
            }
            Authority::AssignedShipper => "only the shipper assigned to this order can do this",
            Authority::ShipperAssignment => "this status is set when a shipper claims the order",
        }
    }
}

/// Field a transition cannot happen without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    CancelReason,
    PodImageUrl,
}

impl RequiredField {
    pub fn name(self) -> &'static str {
        match self {
            RequiredField::CancelReason => "cancel_reason",
            RequiredField::PodImageUrl => "pod_image_url",
        }
    }

    fn supplied(self, change: &StatusChange) -> Option<&str> {
        let value = match self {
            RequiredField::CancelReason => change.cancel_reason.as_deref(),
            RequiredField::PodImageUrl => change.pod_image_url.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    fn record(self, order: &mut Order, value: &str) {
        match self {
            RequiredField::CancelReason => order.set_cancel_reason(value.to_string()),
            RequiredField::PodImageUrl => order.set_pod_image_url(value.to_string()),
        }
    }
}

/// One allowed edge of the order state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub authority: Authority,
    pub requires: Option<RequiredField>,
}

/// Every allowed status change. Pairs absent here are invalid, including
/// anything out of DELIVERED/CANCELLED and cancelling once goods are picked up.
pub const TRANSITIONS: &[TransitionRule] = &[
    TransitionRule {
        from: OrderStatus::Pending,
        to: OrderStatus::Confirmed,
        authority: Authority::StoreOwner,
        requires: None,
    },
    TransitionRule {
        from: OrderStatus::Pending,
        to: OrderStatus::Cancelled,
        authority: Authority::CustomerOrStoreOwner,
        requires: Some(RequiredField::CancelReason),
    },
    TransitionRule {
        from: OrderStatus::Confirmed,
        to: OrderStatus::PickingUp,
        authority: Authority::ShipperAssignment,
        requires: None,
    },
    TransitionRule {
        from: OrderStatus::Confirmed,
        to: OrderStatus::Cancelled,
        authority: Authority::CustomerOrStoreOwner,
        requires: Some(RequiredField::CancelReason),
    },
    TransitionRule {
        from: OrderStatus::PickingUp,
        to: OrderStatus::Delivering,
        authority: Authority::AssignedShipper,
        requires: None,
    },
    TransitionRule {
        from: OrderStatus::Delivering,
        to: OrderStatus::Delivered,
        authority: Authority::AssignedShipper,
        requires: Some(RequiredField::PodImageUrl),
    },
];

pub fn rule_for(from: OrderStatus, to: OrderStatus) -> Option<&'static TransitionRule> {
    TRANSITIONS
        .iter()
        .find(|rule| rule.from == from && rule.to == to)
}

/// A requested status change and the auxiliary fields that come with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub cancel_reason: Option<String>,
    pub pod_image_url: Option<String>,
}

impl StatusChange {
    pub fn to(status: OrderStatus) -> Self {
        Self {
            status,
            cancel_reason: None,
            pod_image_url: None,
        }
    }

    pub fn cancel(reason: impl Into<String>) -> Self {
        Self::to(OrderStatus::Cancelled).with_cancel_reason(reason)
    }

    pub fn deliver(pod_image_url: impl Into<String>) -> Self {
        Self::to(OrderStatus::Delivered).with_pod_image_url(pod_image_url)
    }

    pub fn with_cancel_reason(mut self, reason: impl Into<String>) -> Self {
        self.cancel_reason = Some(reason.into());
        self
    }

    pub fn with_pod_image_url(mut self, url: impl Into<String>) -> Self {
        self.pod_image_url = Some(url.into());
        self
    }
}

impl<St: OrderStorage> OrderService<St> {
    /// Move an order to a new status on behalf of `actor`.
    ///
    /// The order is re-read under its row lock, so two concurrent requests
    /// cannot both pass the precondition.
    #[instrument(skip(self, actor, change), fields(actor = %actor.id, to = %change.status))]
    pub fn update_status(
        &self,
        actor: &Actor,
        order_id: &str,
        change: StatusChange,
    ) -> OrderResult<Order> {
        let mut tx = self.storage.begin()?;
        let mut order = tx
            .lock_order(order_id)?
            .ok_or_else(|| OrderError::not_found("order", order_id))?;

        let from = order.status();
        let to = change.status;
        let rule = rule_for(from, to).ok_or(OrderError::InvalidTransition { from, to })?;

        let store = tx
            .store(order.store_id())?
            .ok_or_else(|| OrderError::not_found("store", order.store_id()))?;
        if !rule.authority.permits(actor, &order, &store) {
            return Err(OrderError::Unauthorized(rule.authority.denial().into()));
        }

        if let Some(field) = rule.requires {
            let value = field.supplied(&change).ok_or_else(|| {
                OrderError::invalid_input(field.name(), format!("{} is required for {}", field.name(), to))
            })?;
            field.record(&mut order, value);
        }
        order.set_status(to);

        tx.update_order(&order)?;
        tx.commit()?;

        info!(order = %order_id, %from, %to, "order status changed");
        Ok(order)
    }
}
