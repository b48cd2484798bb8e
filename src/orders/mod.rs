//! Order lifecycle engine.
//!
//! [`OrderService`] owns the three mutating workflows:
//!
//! - **creation**: validate customer, store and lines, snapshot prices,
//!   decrement stock and persist the order in one transaction
//! - **status transitions**: driven by the [`TRANSITIONS`] table, which maps
//!   each allowed `(from, to)` pair to who may apply it and which field it needs
//! - **shipper assignment**: first-to-claim CONFIRMED → PICKING_UP
//!
//! plus read-only listings.

mod assignment;
mod create;
mod queries;
mod service;
mod transitions;

pub use create::{NewOrder, OrderLine};
pub use service::OrderService;
pub use transitions::{rule_for, Authority, RequiredField, StatusChange, TransitionRule, TRANSITIONS};
