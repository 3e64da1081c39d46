//! Candidate record validation.
//!
//! The console validates operator input before anything is sent. The check
//! is purely syntactic on the three required fields: it does not consult the
//! product catalog and does not range-check the warehouse, both of which are
//! constrained by the input widgets instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::RecordPayload;

/// Largest quantity a record may hold (a signed 32-bit column).
pub const QUANTITY_MAX: i64 = 2_147_483_647;

/// Longest SKU the backend stores.
pub const SKU_MAX_LEN: usize = 8;

/// Reasons a candidate record is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("warehouse id is required")]
    MissingWarehouse,

    #[error("SKU is required")]
    MissingSku,

    #[error("quantity is required")]
    MissingQuantity,

    #[error("quantity is not a whole number: {0}")]
    QuantityNotInteger(String),

    #[error("quantity must not be negative: {0}")]
    QuantityNegative(i64),

    #[error("quantity exceeds {max}: {0}", max = QUANTITY_MAX)]
    QuantityTooLarge(String),
}

/// Raw operator input for a create or update, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub warehouse_id: String,
    pub sku: String,
    pub quantity: String,
    pub description: String,
}

impl Candidate {
    /// Create a candidate from raw field values.
    pub fn new(
        warehouse_id: impl Into<String>,
        sku: impl Into<String>,
        quantity: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            warehouse_id: warehouse_id.into(),
            sku: sku.into(),
            quantity: quantity.into(),
            description: description.into(),
        }
    }

    /// Run the validation rule, reporting the first failing field.
    pub fn check(&self) -> Result<i64, ValidationError> {
        check_fields(&self.warehouse_id, &self.sku, &self.quantity)
    }

    /// Validate and convert into the request body the backend expects.
    pub fn into_payload(self) -> Result<RecordPayload, ValidationError> {
        self.check()?;
        Ok(RecordPayload {
            warehouse_id: self.warehouse_id.trim().to_string(),
            sku: self.sku.trim().to_string(),
            quantity: self.quantity.trim().to_string(),
            description: self.description,
        })
    }
}

/// Validate the three required fields of a candidate record.
///
/// Returns `false` if any field is empty, or the quantity is not a whole
/// number in `[0, 2147483647]`.
pub fn validate(warehouse_id: &str, sku: &str, quantity: &str) -> bool {
    check_fields(warehouse_id, sku, quantity).is_ok()
}

/// Like [`validate`], but names the failing rule and returns the parsed quantity.
pub fn check_fields(warehouse_id: &str, sku: &str, quantity: &str) -> Result<i64, ValidationError> {
    if warehouse_id.trim().is_empty() {
        return Err(ValidationError::MissingWarehouse);
    }
    if sku.trim().is_empty() {
        return Err(ValidationError::MissingSku);
    }
    parse_quantity(quantity)
}

fn parse_quantity(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingQuantity);
    }

    let (negative, digits) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::QuantityNotInteger(raw.to_string()));
    }

    // Digits only: a parse failure can only be overflow.
    let magnitude: i64 = match digits.parse() {
        Ok(n) => n,
        Err(_) if negative => return Err(ValidationError::QuantityNegative(i64::MIN)),
        Err(_) => return Err(ValidationError::QuantityTooLarge(raw.to_string())),
    };

    if negative && magnitude != 0 {
        return Err(ValidationError::QuantityNegative(-magnitude));
    }
    if magnitude > QUANTITY_MAX {
        return Err(ValidationError::QuantityTooLarge(raw.to_string()));
    }
    Ok(magnitude)
}

/// The backend's own field check, which is stricter than [`validate`]:
/// warehouse and quantity must be plain digits and the SKU alphanumeric
/// with at most eight characters.
pub fn backend_accepts(warehouse_id: &str, sku: &str, quantity: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    if !all_digits(warehouse_id) || !all_digits(quantity) {
        return false;
    }
    if sku.is_empty() || sku.chars().count() > SKU_MAX_LEN || !sku.chars().all(char::is_alphanumeric) {
        return false;
    }
    matches!(quantity.parse::<i64>(), Ok(q) if q <= QUANTITY_MAX)
}
