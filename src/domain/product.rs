use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::Model;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub store_id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    pub fn new(id: impl Into<String>, store_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            store_id: store_id.into(),
            name: name.into(),
            image_url: None,
        }
    }
}

impl Model for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A sellable packaging of a product ("300g pack", "1L bottle") with its own
/// price and stock count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductUnit {
    pub id: String,
    pub product_id: String,
    pub unit_name: String,
    pub price: Decimal,
    pub stock_quantity: u32,
}

impl ProductUnit {
    pub fn new(
        id: impl Into<String>,
        product_id: impl Into<String>,
        unit_name: impl Into<String>,
        price: Decimal,
        stock_quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            unit_name: unit_name.into(),
            price,
            stock_quantity,
        }
    }
}

impl Model for ProductUnit {
    const COLLECTION: &'static str = "product_units";

    fn id(&self) -> &str {
        &self.id
    }
}
