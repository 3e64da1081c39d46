//! Inventory view store and mutation forms for Stockroom.
//!
//! [`InventoryStore`] owns the current view and the rows loaded for it.
//! Forms capture operator input, validate it, and hand it to the store,
//! which sends it to the backend and then re-reads the current view in
//! full. The backend is always the source of truth; nothing is predicted
//! locally.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockroom_console::{CreateForm, InventoryStore};
//! use stockroom_fetch::MemoryInventoryApi;
//!
//! let store = InventoryStore::new(MemoryInventoryApi::with_example_data());
//! store.load_active().await?;
//!
//! let form = CreateForm {
//!     warehouse_id: "2".into(),
//!     sku: "87OQ4BZR".into(),
//!     quantity: "5".into(),
//!     description: "x".into(),
//! };
//! form.submit(&store).await?;
//! ```

pub mod error;
pub mod forms;
pub mod observer;
pub mod store;

pub use error::ConsoleError;
pub use forms::{CreateForm, DeleteForm, RestoreAction, UpdateForm};
pub use observer::{EventLog, MutationKind, StoreEvent, StoreObserver};
pub use store::{InventoryStore, LoadOutcome, MutationOutcome, Snapshot};
