use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::model::Model;

/// Lifecycle state of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    PickingUp,
    Delivering,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::PickingUp,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// No transition leaves a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::PickingUp => "PICKING_UP",
            OrderStatus::Delivering => "DELIVERING",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

/// One line of an order. The unit price is a snapshot taken at order time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_unit_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    pub fn new(product_unit_id: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            product_unit_id: product_unit_id.into(),
            quantity,
            unit_price,
        }
    }

    /// `unit_price * quantity`, or `None` if it does not fit a `Decimal`.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Order aggregate: header fields plus its items, persisted as one row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: String,
    customer_id: String,
    store_id: String,
    shipper_id: Option<String>,
    status: OrderStatus,
    total_amount: Decimal,
    shipping_fee: Decimal,
    delivery_address: String,
    pod_image_url: Option<String>,
    cancel_reason: Option<String>,
    created_at: DateTime<Utc>,
    items: Vec<OrderItem>,
}

impl Order {
    /// A new PENDING order. The total is derived from the items.
    ///
    /// Fails with `InvalidInput` when the total, or the total plus shipping,
    /// overflows.
    pub fn place(
        customer_id: impl Into<String>,
        store_id: impl Into<String>,
        delivery_address: impl Into<String>,
        items: Vec<OrderItem>,
        shipping_fee: Decimal,
        created_at: DateTime<Utc>,
    ) -> OrderResult<Self> {
        let overflow = || OrderError::invalid_input("items", "order total is too large");
        let total_amount = items.iter().try_fold(Decimal::ZERO, |total, item| {
            item.subtotal()
                .and_then(|subtotal| total.checked_add(subtotal))
                .ok_or_else(overflow)
        })?;
        total_amount.checked_add(shipping_fee).ok_or_else(overflow)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.into(),
            store_id: store_id.into(),
            shipper_id: None,
            status: OrderStatus::Pending,
            total_amount,
            shipping_fee,
            delivery_address: delivery_address.into(),
            pod_image_url: None,
            cancel_reason: None,
            created_at,
            items,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    pub fn shipper_id(&self) -> Option<&str> {
        self.shipper_id.as_deref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn shipping_fee(&self) -> Decimal {
        self.shipping_fee
    }

    /// Amount the customer pays: goods plus shipping. Not persisted; checked
    /// to fit when the order was placed.
    pub fn grand_total(&self) -> Decimal {
        self.total_amount + self.shipping_fee
    }

    pub fn delivery_address(&self) -> &str {
        &self.delivery_address
    }

    pub fn pod_image_url(&self) -> Option<&str> {
        self.pod_image_url.as_deref()
    }

    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub(crate) fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub(crate) fn set_cancel_reason(&mut self, reason: String) {
        self.cancel_reason = Some(reason);
    }

    pub(crate) fn set_pod_image_url(&mut self, url: String) {
        self.pod_image_url = Some(url);
    }

    pub(crate) fn claim(&mut self, shipper_id: &str) {
        self.shipper_id = Some(shipper_id.to_string());
        self.status = OrderStatus::PickingUp;
    }
}

impl Model for Order {
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> &str {
        &self.id
    }
}
