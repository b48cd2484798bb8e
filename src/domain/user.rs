use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Model;

/// Role of a marketplace account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Shipper,
    StoreOwner,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Customer => "customer",
            Role::Shipper => "shipper",
            Role::StoreOwner => "store owner",
            Role::Admin => "admin",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
    Banned,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub phone_number: String,
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
}

impl User {
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            phone_number: String::new(),
            role,
            status: UserStatus::Active,
        }
    }

    /// Whether this account may act as `role`. Banned accounts hold no capability.
    pub fn has_capability(&self, role: Role) -> bool {
        self.status == UserStatus::Active && self.role == role
    }
}

impl Model for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}

/// The authenticated caller of an operation.
///
/// Resolved by the transport layer and passed explicitly into every core
/// operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn customer(id: impl Into<String>) -> Self {
        Self::new(id, Role::Customer)
    }

    pub fn shipper(id: impl Into<String>) -> Self {
        Self::new(id, Role::Shipper)
    }

    pub fn store_owner(id: impl Into<String>) -> Self {
        Self::new(id, Role::StoreOwner)
    }

    pub fn is(&self, role: Role) -> bool {
        self.role == role
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Actor::new(user.id.clone(), user.role)
    }
}
