use std::fmt;

use crate::domain::OrderStatus;
use crate::lock::LockError;
use crate::model::ModelError;

/// Errors surfaced by the order lifecycle operations.
///
/// Every variant carries enough context for a user-facing message. Storage
/// failures are flattened to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// A referenced entity does not exist.
    NotFound { entity: &'static str, id: String },
    /// The actor lacks the capability the operation requires.
    Forbidden(String),
    /// The actor lacks the relationship to this order that the transition requires.
    Unauthorized(String),
    /// A required field is missing or malformed.
    InvalidInput { field: &'static str, message: String },
    /// The operation is not allowed in the current state of an order or store.
    InvalidState(String),
    /// The requested status change is not in the transition table.
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    /// Not enough stock left for a requested line.
    InsufficientStock {
        product: String,
        unit: String,
        available: u32,
        requested: u32,
    },
    /// The backing store failed.
    Storage(String),
}

impl OrderError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        OrderError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub(crate) fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        OrderError::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::NotFound { entity, id } => write!(f, "{} not found: {}", entity, id),
            OrderError::Forbidden(msg) => write!(f, "forbidden: {}", msg),
            OrderError::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            OrderError::InvalidInput { field, message } => {
                write!(f, "invalid {}: {}", field, message)
            }
            OrderError::InvalidState(msg) => write!(f, "invalid state: {}", msg),
            OrderError::InvalidTransition { from, to } => {
                write!(f, "cannot move order from {} to {}", from, to)
            }
            OrderError::InsufficientStock {
                product,
                unit,
                available,
                requested,
            } => write!(
                f,
                "insufficient stock for '{} - {}': {} left, {} requested",
                product, unit, available, requested
            ),
            OrderError::Storage(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for OrderError {}

impl From<ModelError> for OrderError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::ConcurrencyConflict { .. } => {
                OrderError::InvalidState("record was modified concurrently, retry".into())
            }
            other => OrderError::Storage(other.to_string()),
        }
    }
}

impl From<LockError> for OrderError {
    fn from(err: LockError) -> Self {
        OrderError::Storage(err.to_string())
    }
}

/// Result type for order operations.
pub type OrderResult<T> = Result<T, OrderError>;
