//! Mutation forms.
//!
//! Each form holds the operator's in-progress input for one interaction.
//! Update and delete forms are seeded once from the target row at the
//! moment they are opened and are never re-synchronized: if the row changes
//! elsewhere before submit, the form still submits its own values.

use stockroom_fetch::InventoryApi;
use stockroom_model::{
    Candidate, InventoryId, InventoryRecord, ModelError, ProductCatalog, RowAction, RowPresenter,
    ViewMode,
};

use crate::error::ConsoleError;
use crate::observer::MutationKind;
use crate::store::{InventoryStore, MutationOutcome};

/// Look up a loaded row and check the current view offers `action` on it.
fn target<A: InventoryApi>(
    store: &InventoryStore<A>,
    id: InventoryId,
    action: RowAction,
    kind: MutationKind,
) -> Result<(InventoryRecord, ViewMode), ConsoleError> {
    let snapshot = store.snapshot();
    let record = snapshot
        .records
        .into_iter()
        .find(|r| r.id == id)
        .ok_or(ConsoleError::RecordNotLoaded(id))?;

    if !RowPresenter::actions_for(snapshot.view, record.deleted).contains(&action) {
        return Err(ConsoleError::ActionNotAllowed {
            id,
            action: kind,
            view: snapshot.view,
        });
    }
    Ok((record, snapshot.view))
}

/// The "Add Inventory" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub warehouse_id: String,
    pub sku: String,
    pub quantity: String,
    pub description: String,
}

impl CreateForm {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// The input as a candidate record.
    pub fn candidate(&self) -> Candidate {
        Candidate::new(
            self.warehouse_id.clone(),
            self.sku.clone(),
            self.quantity.clone(),
            self.description.clone(),
        )
    }

    /// Validate, then create the record through the store.
    ///
    /// Invalid input is reported without contacting the backend. The form
    /// keeps its input either way.
    pub async fn submit<A: InventoryApi>(
        &self,
        store: &InventoryStore<A>,
    ) -> Result<MutationOutcome, ConsoleError> {
        let candidate = self.candidate();
        candidate.check()?;
        store.create(candidate).await
    }

    /// Clear all fields.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The "Update Inventory Row" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateForm {
    id: InventoryId,
    /// Row as it was when the form was opened.
    base: InventoryRecord,
    pub warehouse_id: String,
    pub sku: String,
    pub quantity: String,
    pub description: String,
}

impl UpdateForm {
    /// Open the form for a loaded row the current view lets the operator edit.
    pub fn open<A: InventoryApi>(
        store: &InventoryStore<A>,
        id: InventoryId,
    ) -> Result<Self, ConsoleError> {
        let (record, _) = target(store, id, RowAction::Edit, MutationKind::Update)?;
        Ok(Self::from_record(record))
    }

    /// Seed the form from a row.
    pub fn from_record(record: InventoryRecord) -> Self {
        Self {
            id: record.id,
            warehouse_id: record.warehouse_id.to_string(),
            sku: record.sku.clone(),
            quantity: record.quantity.to_string(),
            description: record.description.clone(),
            base: record,
        }
    }

    pub fn id(&self) -> InventoryId {
        self.id
    }

    /// The row as seeded; not refreshed by later reloads.
    pub fn base(&self) -> &InventoryRecord {
        &self.base
    }

    /// Product name and unit of the row being edited.
    pub fn product(&self) -> Result<(&'static str, &'static str), ModelError> {
        ProductCatalog::global().lookup(&self.base.sku)
    }

    /// Whether any field differs from the seeded row.
    pub fn is_dirty(&self) -> bool {
        self.warehouse_id != self.base.warehouse_id.to_string()
            || self.sku != self.base.sku
            || self.quantity != self.base.quantity.to_string()
            || self.description != self.base.description
    }

    pub fn candidate(&self) -> Candidate {
        Candidate::new(
            self.warehouse_id.clone(),
            self.sku.clone(),
            self.quantity.clone(),
            self.description.clone(),
        )
    }

    /// Validate, then update the row through the store.
    pub async fn submit<A: InventoryApi>(
        &self,
        store: &InventoryStore<A>,
    ) -> Result<MutationOutcome, ConsoleError> {
        let candidate = self.candidate();
        candidate.check()?;
        store.update(self.id, candidate).await
    }
}

/// The "Delete Inventory Row" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteForm {
    id: InventoryId,
    pub comments: String,
}

impl DeleteForm {
    /// Open the form for a loaded row the current view lets the operator delete.
    pub fn open<A: InventoryApi>(
        store: &InventoryStore<A>,
        id: InventoryId,
    ) -> Result<Self, ConsoleError> {
        target(store, id, RowAction::Delete, MutationKind::Delete)?;
        Ok(Self {
            id,
            comments: String::new(),
        })
    }

    pub fn id(&self) -> InventoryId {
        self.id
    }

    /// Soft-delete the row. Comments are not validated and may be empty.
    pub async fn submit<A: InventoryApi>(
        &self,
        store: &InventoryStore<A>,
    ) -> Result<MutationOutcome, ConsoleError> {
        store.soft_delete(self.id, &self.comments).await
    }
}

/// The restore button on a deleted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreAction {
    id: InventoryId,
}

impl RestoreAction {
    /// Bind to a loaded row the current view lets the operator restore.
    pub fn open<A: InventoryApi>(
        store: &InventoryStore<A>,
        id: InventoryId,
    ) -> Result<Self, ConsoleError> {
        target(store, id, RowAction::Restore, MutationKind::Restore)?;
        Ok(Self { id })
    }

    pub fn id(&self) -> InventoryId {
        self.id
    }

    pub async fn submit<A: InventoryApi>(
        &self,
        store: &InventoryStore<A>,
    ) -> Result<MutationOutcome, ConsoleError> {
        store.restore(self.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_fetch::MemoryInventoryApi;

    async fn active_store() -> InventoryStore<MemoryInventoryApi> {
        let store = InventoryStore::new(MemoryInventoryApi::with_example_data());
        store.load_active().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_update_form_seeds_from_row() {
        let store = active_store().await;
        let form = UpdateForm::open(&store, InventoryId::new(4)).unwrap();

        assert_eq!(form.warehouse_id, "1");
        assert_eq!(form.sku, "84QZ3GVS");
        assert_eq!(form.quantity, "75");
        assert_eq!(form.product().unwrap(), ("Kiwi Tea", "box"));
        assert!(!form.is_dirty());
    }

    #[tokio::test]
    async fn test_open_requires_loaded_row() {
        let store = active_store().await;
        let err = UpdateForm::open(&store, InventoryId::new(5)).unwrap_err();
        assert_eq!(err, ConsoleError::RecordNotLoaded(InventoryId::new(5)));
    }

    #[tokio::test]
    async fn test_open_checks_view_actions() {
        let store = InventoryStore::new(MemoryInventoryApi::with_example_data());
        store.load_all().await.unwrap();

        assert!(RestoreAction::open(&store, InventoryId::new(5)).is_ok());
        let err = DeleteForm::open(&store, InventoryId::new(5)).unwrap_err();
        assert!(matches!(err, ConsoleError::ActionNotAllowed { .. }));
        let err = RestoreAction::open(&store, InventoryId::new(1)).unwrap_err();
        assert!(matches!(err, ConsoleError::ActionNotAllowed { .. }));
    }

    #[tokio::test]
    async fn test_invalid_create_is_local() {
        let store = active_store().await;
        let calls = store.api().call_count();

        let form = CreateForm {
            warehouse_id: String::new(),
            sku: "52KN0DZE".to_string(),
            quantity: "10".to_string(),
            description: String::new(),
        };
        let err = form.submit(&store).await.unwrap_err();

        assert!(matches!(err, ConsoleError::Validation(_)));
        assert_eq!(store.api().call_count(), calls);
    }

    #[tokio::test]
    async fn test_clear_resets_fields() {
        let mut form = CreateForm {
            warehouse_id: "2".to_string(),
            sku: "87OQ4BZR".to_string(),
            quantity: "5".to_string(),
            description: "x".to_string(),
        };
        form.clear();
        assert_eq!(form, CreateForm::new());
    }
}
