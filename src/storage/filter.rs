use std::cmp::Ordering;

use crate::domain::{Order, OrderStatus};

/// Selection of orders for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderFilter {
    Customer(String),
    Store(String),
    Shipper(String),
    /// CONFIRMED orders nobody has claimed yet.
    UnassignedConfirmed,
    StoreWithStatus(String, OrderStatus),
    CustomerWithStatus(String, OrderStatus),
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderFilter::Customer(id) => order.customer_id() == id,
            OrderFilter::Store(id) => order.store_id() == id,
            OrderFilter::Shipper(id) => order.shipper_id() == Some(id.as_str()),
            OrderFilter::UnassignedConfirmed => {
                order.status() == OrderStatus::Confirmed && order.shipper_id().is_none()
            }
            OrderFilter::StoreWithStatus(id, status) => {
                order.store_id() == id && order.status() == *status
            }
            OrderFilter::CustomerWithStatus(id, status) => {
                order.customer_id() == id && order.status() == *status
            }
        }
    }

    /// Pickup queue is oldest-first so early orders get shippers first;
    /// every other listing is newest-first.
    pub fn oldest_first(&self) -> bool {
        matches!(self, OrderFilter::UnassignedConfirmed)
    }

    pub(crate) fn compare(&self, a: &Order, b: &Order) -> Ordering {
        let by_age = a
            .created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(b.id()));
        if self.oldest_first() {
            by_age
        } else {
            by_age.reverse()
        }
    }
}
