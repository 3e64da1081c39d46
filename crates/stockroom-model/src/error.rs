//! Domain error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by the inventory domain layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// SKU has no entry in the product catalog.
    #[error("Unknown SKU: {0}")]
    UnknownSku(String),

    /// Candidate record failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Warehouse id outside the known set.
    #[error("Invalid warehouse: {0}")]
    InvalidWarehouse(String),

    /// Timestamp not in the backend's `%m/%d/%Y, %H:%M:%S` format.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Quantity outside `0..=QUANTITY_MAX`.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
}
