//! Inventory domain types for Stockroom.
//!
//! This crate holds everything about the inventory console that does not
//! touch the network:
//!
//! - **Catalog**: the fixed SKU → (product name, unit) mapping
//! - **Records**: inventory rows and their wire representation
//! - **Validation**: the syntactic check run before any mutation is sent
//! - **Views**: the active / deleted / all subset selector
//! - **Presentation**: per-row display data and available actions
//!
//! # Example
//!
//! ```rust
//! use stockroom_model::prelude::*;
//!
//! let (name, unit) = ProductCatalog::global().lookup("52KN0DZE").unwrap();
//! assert_eq!((name, unit), ("Milk Tea", "box"));
//!
//! assert!(validate("3", "52KN0DZE", "10"));
//! assert!(!validate("3", "52KN0DZE", "3.5"));
//! ```

pub mod catalog;
pub mod error;
pub mod ids;
pub mod presenter;
pub mod record;
pub mod validation;
pub mod view;

pub use catalog::{ProductCatalog, ProductEntry};
pub use error::ModelError;
pub use ids::{InventoryId, WarehouseId};
pub use presenter::{present_table, RowAction, RowPresenter, RowStatus, RowView, TableView};
pub use record::{format_timestamp, DeletePayload, InventoryRecord, RecordPayload, WireRecord};
pub use validation::{backend_accepts, check_fields, validate, Candidate, ValidationError, QUANTITY_MAX};
pub use view::ViewMode;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{ProductCatalog, ProductEntry};
    pub use crate::error::ModelError;
    pub use crate::ids::{InventoryId, WarehouseId};
    pub use crate::presenter::{
        present_table, RowAction, RowPresenter, RowStatus, RowView, TableView,
    };
    pub use crate::record::{DeletePayload, InventoryRecord, RecordPayload, WireRecord};
    pub use crate::validation::{validate, Candidate, ValidationError, QUANTITY_MAX};
    pub use crate::view::ViewMode;
}
