//! Newtype IDs for type-safe identifiers.
//!
//! Inventory ids are assigned by the backend and never minted locally;
//! warehouse ids come from a fixed set of ten sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Server-assigned identifier of an inventory row.
///
/// Opaque to the console: it is only ever compared, displayed and
/// interpolated back into request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryId(i64);

impl InventoryId {
    /// Wrap a raw backend id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw backend id.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for InventoryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for InventoryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// One of the ten warehouses stock can be held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WarehouseId(u8);

impl WarehouseId {
    /// Lowest warehouse number.
    pub const MIN: u8 = 1;
    /// Highest warehouse number.
    pub const MAX: u8 = 10;

    /// Create a warehouse id, checking it is in `1..=10`.
    pub fn new(id: u8) -> Result<Self, ModelError> {
        if (Self::MIN..=Self::MAX).contains(&id) {
            Ok(Self(id))
        } else {
            Err(ModelError::InvalidWarehouse(id.to_string()))
        }
    }

    /// All warehouses in ascending order, as offered by the input widget.
    pub fn all() -> impl Iterator<Item = WarehouseId> {
        (Self::MIN..=Self::MAX).map(WarehouseId)
    }

    /// Get the warehouse number.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for WarehouseId {
    type Error = ModelError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<WarehouseId> for u8 {
    fn from(id: WarehouseId) -> Self {
        id.0
    }
}

impl FromStr for WarehouseId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u8 = s
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidWarehouse(s.to_string()))?;
        Self::new(id)
    }
}
