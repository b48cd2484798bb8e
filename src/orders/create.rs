use chrono::Utc;
use tracing::{debug, info, instrument};

use super::OrderService;
use crate::domain::{Actor, Order, OrderItem, Role};
use crate::error::{OrderError, OrderResult};
use crate::storage::{OrderStorage, StockDecrement, Transaction};

/// One requested line: a sellable unit and how many of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_unit_id: String,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(product_unit_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_unit_id: product_unit_id.into(),
            quantity,
        }
    }
}

/// A customer's order request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub store_id: String,
    pub delivery_address: String,
    pub lines: Vec<OrderLine>,
}

impl NewOrder {
    pub fn new(store_id: impl Into<String>, delivery_address: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            delivery_address: delivery_address.into(),
            lines: Vec::new(),
        }
    }

    pub fn line(mut self, product_unit_id: impl Into<String>, quantity: u32) -> Self {
        self.lines.push(OrderLine::new(product_unit_id, quantity));
        self
    }
}

impl<St: OrderStorage> OrderService<St> {
    /// Place an order for `customer`.
    ///
    /// Validation, price snapshots, stock decrements and the order insert all
    /// happen in one transaction; any failure leaves stock untouched.
    #[instrument(skip(self, customer, request), fields(customer = %customer.id, store = %request.store_id))]
    pub fn create_order(&self, customer: &Actor, request: NewOrder) -> OrderResult<Order> {
        self.validate_request(&request)?;

        let mut tx = self.storage.begin()?;

        let user = tx
            .user(&customer.id)?
            .ok_or_else(|| OrderError::not_found("user", &customer.id))?;
        if !user.has_capability(Role::Customer) {
            return Err(OrderError::Forbidden(
                "only customers can place orders".into(),
            ));
        }

        let store = tx
            .store(&request.store_id)?
            .ok_or_else(|| OrderError::not_found("store", &request.store_id))?;
        if !store.is_open {
            return Err(OrderError::InvalidState(format!(
                "store '{}' is not open",
                store.name
            )));
        }

        let unit_ids: Vec<String> = request
            .lines
            .iter()
            .map(|line| line.product_unit_id.clone())
            .collect();
        tx.lock_units(&unit_ids)?;

        let mut items = Vec::with_capacity(request.lines.len());
        for line in &request.lines {
            let unit = tx
                .unit(&line.product_unit_id)?
                .ok_or_else(|| OrderError::not_found("product unit", &line.product_unit_id))?;
            let product = tx
                .product(&unit.product_id)?
                .ok_or_else(|| OrderError::not_found("product", &unit.product_id))?;

            if product.store_id != store.id {
                return Err(OrderError::invalid_input(
                    "items",
                    format!("product '{}' is not sold by this store", product.name),
                ));
            }

            match tx.decrement_stock(&unit.id, line.quantity)? {
                StockDecrement::Applied { remaining } => {
                    debug!(
                        unit = %unit.id,
                        product = %product.name,
                        quantity = line.quantity,
                        remaining,
                        "stock decremented"
                    );
                }
                StockDecrement::Insufficient {
                    available,
                    requested,
                } => {
                    return Err(OrderError::InsufficientStock {
                        product: product.name,
                        unit: unit.unit_name,
                        available,
                        requested,
                    });
                }
            }

            items.push(OrderItem::new(unit.id, line.quantity, unit.price));
        }

        let order = Order::place(
            &user.id,
            &store.id,
            request.delivery_address,
            items,
            self.config.shipping_fee,
            Utc::now(),
        )?;
        tx.insert_order(&order)?;
        tx.commit()?;

        info!(
            order = %order.id(),
            total = %order.total_amount(),
            grand_total = %order.grand_total(),
            "order created"
        );
        Ok(order)
    }

    fn validate_request(&self, request: &NewOrder) -> OrderResult<()> {
        if request.delivery_address.trim().is_empty() {
            return Err(OrderError::invalid_input(
                "delivery_address",
                "delivery address is required",
            ));
        }
        if request.lines.is_empty() {
            return Err(OrderError::invalid_input(
                "items",
                "an order needs at least one item",
            ));
        }
        if request.lines.len() > self.config.max_items_per_order {
            return Err(OrderError::invalid_input(
                "items",
                format!(
                    "at most {} lines per order",
                    self.config.max_items_per_order
                ),
            ));
        }
        if let Some(line) = request.lines.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::invalid_input(
                "quantity",
                format!("quantity for {} must be positive", line.product_unit_id),
            ));
        }
        Ok(())
    }
}
