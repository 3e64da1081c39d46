//! Row presentation.
//!
//! Turns a record plus the current view into what a table row shows: the
//! resolved product name and unit, the status label, comments, and which
//! actions the operator may take. Pure; no state and no I/O.

use serde::Serialize;

use crate::catalog::ProductCatalog;
use crate::error::ModelError;
use crate::ids::InventoryId;
use crate::record::InventoryRecord;
use crate::view::ViewMode;

/// An action a row offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAction {
    Edit,
    Delete,
    Restore,
}

impl RowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowAction::Edit => "edit",
            RowAction::Delete => "delete",
            RowAction::Restore => "restore",
        }
    }
}

/// Status label shown in the "all" view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowStatus {
    Active,
    Deleted,
}

impl RowStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RowStatus::Active => "Active",
            RowStatus::Deleted => "Deleted",
        }
    }
}

/// Display data for one table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: InventoryId,
    pub warehouse_id: i64,
    pub sku: String,
    pub product_name: &'static str,
    pub unit: &'static str,
    pub description: String,
    pub quantity: i64,
    /// Only set in the "all" view.
    pub status: Option<RowStatus>,
    /// Shown for deleted rows in the "deleted" and "all" views.
    pub comments: Option<String>,
    pub actions: Vec<RowAction>,
}

impl RowView {
    /// Whether the row offers an action.
    pub fn allows(&self, action: RowAction) -> bool {
        self.actions.contains(&action)
    }
}

/// Derives [`RowView`]s from records.
#[derive(Debug, Clone, Copy)]
pub struct RowPresenter<'a> {
    catalog: &'a ProductCatalog,
}

impl Default for RowPresenter<'static> {
    fn default() -> Self {
        Self::new(ProductCatalog::global())
    }
}

impl<'a> RowPresenter<'a> {
    pub fn new(catalog: &'a ProductCatalog) -> Self {
        Self { catalog }
    }

    /// Present one record under the given view.
    ///
    /// Fails with [`ModelError::UnknownSku`] when the SKU is not in the catalog.
    pub fn present(&self, record: &InventoryRecord, view: ViewMode) -> Result<RowView, ModelError> {
        let (product_name, unit) = self.catalog.lookup(&record.sku)?;

        let (status, comments) = match view {
            ViewMode::Active => (None, None),
            ViewMode::Deleted => (None, Some(record.comments_or_empty().to_string())),
            ViewMode::All if record.deleted => (
                Some(RowStatus::Deleted),
                Some(record.comments_or_empty().to_string()),
            ),
            ViewMode::All => (Some(RowStatus::Active), None),
        };
        let actions = Self::actions_for(view, record.deleted);

        Ok(RowView {
            id: record.id,
            warehouse_id: record.warehouse_id,
            sku: record.sku.clone(),
            product_name,
            unit,
            description: record.description.clone(),
            quantity: record.quantity,
            status,
            comments,
            actions,
        })
    }

    /// Actions a row offers, without resolving its product.
    ///
    /// The active and deleted views offer their actions regardless of the
    /// flag, since the backend only returns matching rows for them.
    pub fn actions_for(view: ViewMode, deleted: bool) -> Vec<RowAction> {
        match view {
            ViewMode::Active => vec![RowAction::Edit, RowAction::Delete],
            ViewMode::Deleted => vec![RowAction::Restore],
            ViewMode::All if deleted => vec![RowAction::Restore],
            ViewMode::All => vec![RowAction::Edit, RowAction::Delete],
        }
    }

    /// Column headers for a view.
    pub fn headers(view: ViewMode) -> Vec<&'static str> {
        let mut headers = vec![
            "ID",
            "Warehouse",
            "SKU",
            "Product Name",
            "Description",
            "Quantity",
            "Unit",
        ];
        match view {
            ViewMode::Active => headers.extend(["Edit", "Delete"]),
            ViewMode::Deleted => headers.extend(["Comments", "Restore"]),
            ViewMode::All => headers.extend(["Status", "Comments (Deleted)", "Actions"]),
        }
        headers
    }
}

/// A whole table: presented rows plus the rows that could not be presented.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub view: ViewMode,
    pub title: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<RowView>,
    /// One entry per record whose SKU is not in the catalog.
    #[serde(skip)]
    pub errors: Vec<(InventoryId, ModelError)>,
}

/// Present every record, collecting unknown-SKU rows instead of failing the table.
pub fn present_table(records: &[InventoryRecord], view: ViewMode) -> TableView {
    let presenter = RowPresenter::default();
    let mut rows = Vec::with_capacity(records.len());
    let mut errors = Vec::new();

    for record in records {
        match presenter.present(record, view) {
            Ok(row) => rows.push(row),
            Err(e) => errors.push((record.id, e)),
        }
    }

    TableView {
        view,
        title: view.title(),
        headers: RowPresenter::headers(view),
        rows,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, sku: &str, deleted: bool, comments: Option<&str>) -> InventoryRecord {
        InventoryRecord {
            id: InventoryId::new(id),
            warehouse_id: 1,
            sku: sku.to_string(),
            description: String::new(),
            quantity: 50,
            deleted,
            comments: comments.map(str::to_string),
            created: None,
            updated: None,
        }
    }

    #[test]
    fn test_active_view_offers_edit_and_delete() {
        let row = RowPresenter::default()
            .present(&record(1, "52KN0DZE", false, None), ViewMode::Active)
            .unwrap();
        assert_eq!(row.product_name, "Milk Tea");
        assert_eq!(row.unit, "box");
        assert_eq!(row.actions, vec![RowAction::Edit, RowAction::Delete]);
        assert_eq!(row.status, None);
        assert_eq!(row.comments, None);
    }

    #[test]
    fn test_deleted_view_shows_comments_and_restore() {
        let row = RowPresenter::default()
            .present(&record(5, "53HA4DWH", true, Some("damaged")), ViewMode::Deleted)
            .unwrap();
        assert_eq!(row.comments.as_deref(), Some("damaged"));
        assert!(row.allows(RowAction::Restore));
        assert!(!row.allows(RowAction::Edit));
    }

    #[test]
    fn test_all_view_branches_on_deleted_flag() {
        let presenter = RowPresenter::default();

        let active = presenter
            .present(&record(1, "87OQ4BZR", false, None), ViewMode::All)
            .unwrap();
        assert_eq!(active.status, Some(RowStatus::Active));
        assert_eq!(active.actions, vec![RowAction::Edit, RowAction::Delete]);

        let deleted = presenter
            .present(&record(2, "87OQ4BZR", true, None), ViewMode::All)
            .unwrap();
        assert_eq!(deleted.status.map(|s| s.label()), Some("Deleted"));
        assert_eq!(deleted.comments.as_deref(), Some(""));
        assert_eq!(deleted.actions, vec![RowAction::Restore]);
    }

    #[test]
    fn test_unknown_sku_is_reported() {
        let err = RowPresenter::default()
            .present(&record(9, "12345", false, None), ViewMode::Active)
            .unwrap_err();
        assert_eq!(err, ModelError::UnknownSku("12345".to_string()));
    }

    #[test]
    fn test_table_collects_unknown_skus() {
        let records = vec![
            record(1, "52KN0DZE", false, None),
            record(2, "12345", false, None),
            record(3, "87OQ4BZR", false, None),
        ];
        let table = present_table(&records, ViewMode::Active);

        assert_eq!(table.title, "Active Inventory");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.errors.len(), 1);
        assert_eq!(table.errors[0].0, InventoryId::new(2));
    }

    #[test]
    fn test_headers_per_view() {
        assert_eq!(RowPresenter::headers(ViewMode::Active).last(), Some(&"Delete"));
        assert_eq!(RowPresenter::headers(ViewMode::Deleted).last(), Some(&"Restore"));
        assert_eq!(RowPresenter::headers(ViewMode::All).len(), 10);
    }
}
