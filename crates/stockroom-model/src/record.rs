//! Inventory records and their wire representation.
//!
//! The backend speaks snake_case (`inventory_id`, `warehouse_id`) and
//! formats timestamps as text; request bodies use camelCase. All mapping
//! between the two happens here so the rest of the console only ever sees
//! [`InventoryRecord`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::catalog::ProductCatalog;
use crate::error::ModelError;
use crate::ids::InventoryId;
use crate::validation::QUANTITY_MAX;

/// Timestamp format used by the backend.
pub const WIRE_TIMESTAMP_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";

/// An inventory row as held in the console's snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRecord {
    /// Server-assigned id, immutable.
    pub id: InventoryId,
    /// Warehouse holding the stock.
    pub warehouse_id: i64,
    /// Product SKU.
    pub sku: String,
    /// Free-text description (may be empty).
    pub description: String,
    /// Units on hand, `0..=2147483647`.
    pub quantity: i64,
    /// Soft-delete flag.
    pub deleted: bool,
    /// Deletion comments; set when the record is soft-deleted.
    pub comments: Option<String>,
    /// Creation time as reported by the backend.
    pub created: Option<NaiveDateTime>,
    /// Last update time as reported by the backend.
    pub updated: Option<NaiveDateTime>,
}

impl InventoryRecord {
    /// Resolve `(product name, unit)` from the catalog.
    pub fn product(&self) -> Result<(&'static str, &'static str), ModelError> {
        ProductCatalog::global().lookup(&self.sku)
    }

    /// Whether the record is active (not soft-deleted).
    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    /// Comments, treating an absent value as empty.
    pub fn comments_or_empty(&self) -> &str {
        self.comments.as_deref().unwrap_or("")
    }
}

/// An inventory row exactly as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    pub inventory_id: i64,
    pub warehouse_id: i64,
    pub sku: String,
    pub quantity: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub comments: Option<String>,
}

impl TryFrom<WireRecord> for InventoryRecord {
    type Error = ModelError;

    fn try_from(wire: WireRecord) -> Result<Self, Self::Error> {
        if !(0..=QUANTITY_MAX).contains(&wire.quantity) {
            return Err(ModelError::InvalidQuantity(wire.quantity));
        }

        Ok(Self {
            id: InventoryId::new(wire.inventory_id),
            warehouse_id: wire.warehouse_id,
            sku: wire.sku,
            description: wire.description.unwrap_or_default(),
            quantity: wire.quantity,
            deleted: wire.deleted,
            comments: wire.comments,
            created: parse_timestamp(wire.created.as_deref())?,
            updated: parse_timestamp(wire.updated.as_deref())?,
        })
    }
}

impl From<&InventoryRecord> for WireRecord {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            inventory_id: record.id.get(),
            warehouse_id: record.warehouse_id,
            sku: record.sku.clone(),
            quantity: record.quantity,
            description: Some(record.description.clone()),
            created: record.created.map(format_timestamp),
            updated: record.updated.map(format_timestamp),
            deleted: record.deleted,
            comments: record.comments.clone(),
        }
    }
}

fn parse_timestamp(raw: Option<&str>) -> Result<Option<NaiveDateTime>, ModelError> {
    match raw {
        None => Ok(None),
        Some(s) => NaiveDateTime::parse_from_str(s, WIRE_TIMESTAMP_FORMAT)
            .map(Some)
            .map_err(|_| ModelError::InvalidTimestamp(s.to_string())),
    }
}

/// Format a timestamp the way the backend does.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(WIRE_TIMESTAMP_FORMAT).to_string()
}

/// Body of a create or update request.
///
/// Fields travel as the strings the operator typed; the backend re-checks
/// them as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    #[serde(rename = "warehouseId")]
    pub warehouse_id: String,
    pub sku: String,
    pub quantity: String,
    pub description: String,
}

/// Body of a soft-delete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePayload {
    pub comments: String,
}
