//! The inventory store.
//!
//! Holds the current view and the rows loaded for it, and is the only place
//! the snapshot changes. Every load replaces the whole list; every mutation
//! is followed by a full reload of the view the operator most recently
//! asked for, even if that load is still in flight. The store never patches rows in place and never
//! retries.
//!
//! Loads are tagged with a generation number. A response is applied only if
//! no newer load was issued while it was in flight, so a slow answer for a
//! view the operator already left cannot overwrite the newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use stockroom_fetch::{FetchError, InventoryApi};
use stockroom_model::{present_table, Candidate, InventoryId, InventoryRecord, TableView, ViewMode};
use tracing::{debug, info, warn};

use crate::error::ConsoleError;
use crate::observer::{MutationKind, StoreEvent, StoreObserver};

/// The store's current state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// View the records were loaded for.
    pub view: ViewMode,
    /// View of the newest load issued. Differs from `view` while a switch is
    /// in flight.
    pub requested: ViewMode,
    /// Rows as returned by the backend for `view`.
    pub records: Vec<InventoryRecord>,
    /// Generation of the load that produced this snapshot (0 before the first).
    pub generation: u64,
    /// Message of the most recent failure, cleared by the next applied load.
    pub last_error: Option<String>,
}

/// What became of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced the snapshot.
    Applied { count: usize, generation: u64 },
    /// A newer load was issued first; the response was dropped.
    Discarded { generation: u64 },
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied { .. })
    }
}

/// Result of a committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    /// The record as the backend answered it.
    pub record: InventoryRecord,
    /// View that was reloaded afterwards.
    pub reloaded: ViewMode,
    /// What became of that reload.
    pub reload: LoadOutcome,
}

/// State/view synchronization over an [`InventoryApi`].
pub struct InventoryStore<A> {
    api: A,
    snapshot: Mutex<Snapshot>,
    issued: AtomicU64,
    observer: Option<Arc<dyn StoreObserver>>,
}

impl<A: InventoryApi> InventoryStore<A> {
    /// Create a store showing an empty active view.
    pub fn new(api: A) -> Self {
        Self {
            api,
            snapshot: Mutex::new(Snapshot::default()),
            issued: AtomicU64::new(0),
            observer: None,
        }
    }

    /// Attach an observer for store events.
    pub fn with_observer(mut self, observer: Arc<dyn StoreObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The backend this store talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, event: StoreEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().clone()
    }

    /// Current view mode.
    pub fn view(&self) -> ViewMode {
        self.lock().view
    }

    /// View of the newest load issued, applied or not.
    pub fn requested_view(&self) -> ViewMode {
        self.lock().requested
    }

    /// Rows currently loaded.
    pub fn records(&self) -> Vec<InventoryRecord> {
        self.lock().records.clone()
    }

    /// Most recent failure message, if the last operation failed.
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    /// Find a loaded row by id.
    pub fn find(&self, id: InventoryId) -> Option<InventoryRecord> {
        self.lock().records.iter().find(|r| r.id == id).cloned()
    }

    /// Present the loaded rows as a table for the current view.
    pub fn table(&self) -> TableView {
        let snapshot = self.lock();
        present_table(&snapshot.records, snapshot.view)
    }

    /// Load the active rows.
    pub async fn load_active(&self) -> Result<LoadOutcome, ConsoleError> {
        self.load(ViewMode::Active).await
    }

    /// Load the soft-deleted rows.
    pub async fn load_deleted(&self) -> Result<LoadOutcome, ConsoleError> {
        self.load(ViewMode::Deleted).await
    }

    /// Load every row.
    pub async fn load_all(&self) -> Result<LoadOutcome, ConsoleError> {
        self.load(ViewMode::All).await
    }

    /// Reload the most recently requested view.
    pub async fn reload(&self) -> Result<LoadOutcome, ConsoleError> {
        self.load(self.requested_view()).await
    }

    /// Issue a generation for a load of `view`.
    fn issue(&self, view: ViewMode) -> u64 {
        let mut snapshot = self.lock();
        snapshot.requested = view;
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Fetch a view and, unless a newer load was issued meanwhile, replace
    /// the snapshot with it. On failure the snapshot is left as it was.
    pub async fn load(&self, view: ViewMode) -> Result<LoadOutcome, ConsoleError> {
        let generation = self.issue(view);
        debug!(%view, generation, "loading view");

        let result = self.api.list(view).await;

        let mut snapshot = self.lock();
        let latest = self.issued.load(Ordering::SeqCst);

        match result {
            Ok(records) if generation == latest => {
                let count = records.len();
                snapshot.view = view;
                snapshot.records = records;
                snapshot.generation = generation;
                snapshot.last_error = None;
                drop(snapshot);

                info!(%view, count, generation, "snapshot replaced");
                self.emit(StoreEvent::Loaded {
                    view,
                    count,
                    generation,
                });
                Ok(LoadOutcome::Applied { count, generation })
            }
            Ok(_) => {
                drop(snapshot);
                warn!(%view, generation, latest, "discarding stale response");
                self.emit(StoreEvent::Discarded { view, generation });
                Ok(LoadOutcome::Discarded { generation })
            }
            Err(e) => {
                if generation == latest {
                    snapshot.last_error = Some(e.to_string());
                    snapshot.requested = snapshot.view;
                }
                drop(snapshot);

                warn!(%view, generation, error = %e, "load failed");
                self.emit(StoreEvent::LoadFailed {
                    view,
                    message: e.to_string(),
                });
                Err(ConsoleError::Transport(e))
            }
        }
    }

    /// Validate and create a record, then reload the current view.
    pub async fn create(&self, candidate: Candidate) -> Result<MutationOutcome, ConsoleError> {
        let payload = candidate.into_payload()?;
        let result = self.api.create(&payload).await;
        let record = self.committed(MutationKind::Create, result)?;
        self.reload_after(MutationKind::Create, record).await
    }

    /// Validate and update a record, then reload the current view.
    pub async fn update(
        &self,
        id: InventoryId,
        candidate: Candidate,
    ) -> Result<MutationOutcome, ConsoleError> {
        let payload = candidate.into_payload()?;
        let result = self.api.update(id, &payload).await;
        let record = self.committed(MutationKind::Update, result)?;
        self.reload_after(MutationKind::Update, record).await
    }

    /// Soft-delete a record with comments (which may be empty), then reload
    /// the current view.
    pub async fn soft_delete(
        &self,
        id: InventoryId,
        comments: &str,
    ) -> Result<MutationOutcome, ConsoleError> {
        let result = self.api.delete(id, comments).await;
        let record = self.committed(MutationKind::Delete, result)?;
        self.reload_after(MutationKind::Delete, record).await
    }

    /// Restore a soft-deleted record, then reload the current view.
    pub async fn restore(&self, id: InventoryId) -> Result<MutationOutcome, ConsoleError> {
        let result = self.api.restore(id).await;
        let record = self.committed(MutationKind::Restore, result)?;
        self.reload_after(MutationKind::Restore, record).await
    }

    fn committed(
        &self,
        action: MutationKind,
        result: Result<InventoryRecord, FetchError>,
    ) -> Result<InventoryRecord, ConsoleError> {
        match result {
            Ok(record) => {
                info!(%action, id = %record.id, "mutation committed");
                Ok(record)
            }
            Err(e) => {
                warn!(%action, error = %e, "mutation failed");
                self.lock().last_error = Some(e.to_string());
                self.emit(StoreEvent::MutationFailed {
                    action,
                    message: e.to_string(),
                });
                Err(ConsoleError::Transport(e))
            }
        }
    }

    /// Reload the most recently requested view, which is not necessarily
    /// the view the mutated record belongs to.
    async fn reload_after(
        &self,
        action: MutationKind,
        record: InventoryRecord,
    ) -> Result<MutationOutcome, ConsoleError> {
        let view = self.requested_view();
        match self.load(view).await {
            Ok(reload) => Ok(MutationOutcome {
                record,
                reloaded: view,
                reload,
            }),
            Err(ConsoleError::Transport(source)) => {
                self.emit(StoreEvent::ReloadFailed {
                    action,
                    view,
                    message: source.to_string(),
                });
                Err(ConsoleError::ReloadFailed { action, source })
            }
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_fetch::MemoryInventoryApi;

    #[tokio::test]
    async fn test_new_store_is_empty_active() {
        let store = InventoryStore::new(MemoryInventoryApi::with_example_data());
        let snapshot = store.snapshot();
        assert_eq!(snapshot.view, ViewMode::Active);
        assert!(snapshot.records.is_empty());
        assert_eq!(snapshot.generation, 0);
    }

    #[tokio::test]
    async fn test_load_sets_view_and_generation() {
        let store = InventoryStore::new(MemoryInventoryApi::with_example_data());

        let outcome = store.load_deleted().await.unwrap();
        assert_eq!(outcome, LoadOutcome::Applied { count: 1, generation: 1 });
        assert_eq!(store.view(), ViewMode::Deleted);

        store.load_all().await.unwrap();
        assert_eq!(store.view(), ViewMode::All);
        assert_eq!(store.records().len(), 5);
        assert_eq!(store.snapshot().generation, 2);
        assert_eq!(store.requested_view(), ViewMode::All);
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let store = InventoryStore::new(MemoryInventoryApi::with_example_data());
        let err = store
            .create(Candidate::new("3", "52KN0DZE", "3.5", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, ConsoleError::Validation(_)));
        assert!(err.is_local());
        assert_eq!(store.api().call_count(), 0);
    }

    #[tokio::test]
    async fn test_table_uses_current_view() {
        let store = InventoryStore::new(MemoryInventoryApi::with_example_data());
        store.load_deleted().await.unwrap();
        let table = store.table();
        assert_eq!(table.title, "Deleted Inventory");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].comments.as_deref(), Some("This batch went bad"));
    }
}
