use serde::{Deserialize, Serialize};

use crate::model::Model;

/// A shop on the marketplace, owned by exactly one store-owner account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub is_open: bool,
}

impl Store {
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            name: name.into(),
            address: String::new(),
            is_open: true,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

impl Model for Store {
    const COLLECTION: &'static str = "stores";

    fn id(&self) -> &str {
        &self.id
    }
}
