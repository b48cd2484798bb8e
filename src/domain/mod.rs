//! Domain entities of the marketplace.
//!
//! Users, stores, products and sellable units belong to the catalog and
//! account services; this crate only reads them, except for the stock count
//! of a [`ProductUnit`], which order creation decrements. [`Order`] is owned
//! here.

mod order;
mod product;
mod store;
mod user;

pub use order::{Order, OrderItem, OrderStatus};
pub use product::{Product, ProductUnit};
pub use store::Store;
pub use user::{Actor, Role, User, UserStatus};
