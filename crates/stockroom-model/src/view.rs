//! View modes over the inventory list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which subset of inventory rows is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Rows with `deleted = false`.
    #[default]
    Active,
    /// Soft-deleted rows.
    Deleted,
    /// Every row.
    All,
}

impl ViewMode {
    /// All view modes, in navigation order.
    pub const ALL: [ViewMode; 3] = [ViewMode::Active, ViewMode::Deleted, ViewMode::All];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Active => "active",
            ViewMode::Deleted => "deleted",
            ViewMode::All => "all",
        }
    }

    /// Backend path listing this subset.
    pub fn list_path(&self) -> &'static str {
        match self {
            ViewMode::Active => "/api/inventory/status:0",
            ViewMode::Deleted => "/api/inventory/status:1",
            ViewMode::All => "/api/inventory",
        }
    }

    /// Heading shown above the table.
    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::Active => "Active Inventory",
            ViewMode::Deleted => "Deleted Inventory",
            ViewMode::All => "All Inventory",
        }
    }

    /// Whether a record with the given deletion flag belongs to this view.
    pub fn includes(&self, deleted: bool) -> bool {
        match self {
            ViewMode::Active => !deleted,
            ViewMode::Deleted => deleted,
            ViewMode::All => true,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(ViewMode::Active),
            "deleted" => Ok(ViewMode::Deleted),
            "all" => Ok(ViewMode::All),
            other => Err(format!("unknown view '{}' (expected active, deleted or all)", other)),
        }
    }
}
