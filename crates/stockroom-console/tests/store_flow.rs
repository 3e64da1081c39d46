//! End-to-end store behaviour against the in-memory backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use stockroom_console::{
    ConsoleError, CreateForm, DeleteForm, EventLog, InventoryStore, LoadOutcome, MutationKind,
    RestoreAction, StoreEvent, UpdateForm,
};
use stockroom_fetch::{FetchError, InventoryApi, MemoryInventoryApi};
use stockroom_model::{Candidate, InventoryId, InventoryRecord, RecordPayload, ViewMode};

/// Memory backend whose list calls can be held back or failed on demand.
#[derive(Default)]
struct GatedApi {
    inner: MemoryInventoryApi,
    gates: Mutex<HashMap<ViewMode, oneshot::Receiver<()>>>,
    failing_lists: AtomicU32,
}

impl GatedApi {
    fn seeded() -> Self {
        Self {
            inner: MemoryInventoryApi::with_example_data(),
            ..Self::default()
        }
    }

    /// Hold the next list of `view` until the returned sender fires.
    fn hold(&self, view: ViewMode) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(view, rx);
        tx
    }

    fn fail_next_list(&self) {
        self.failing_lists.store(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl InventoryApi for GatedApi {
    async fn list(&self, view: ViewMode) -> Result<Vec<InventoryRecord>, FetchError> {
        let gate = self.gates.lock().unwrap().remove(&view);
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        if self.failing_lists.swap(0, Ordering::SeqCst) > 0 {
            return Err(FetchError::Connection("list unavailable".to_string()));
        }
        self.inner.list(view).await
    }

    async fn create(&self, payload: &RecordPayload) -> Result<InventoryRecord, FetchError> {
        self.inner.create(payload).await
    }

    async fn update(
        &self,
        id: InventoryId,
        payload: &RecordPayload,
    ) -> Result<InventoryRecord, FetchError> {
        self.inner.update(id, payload).await
    }

    async fn delete(&self, id: InventoryId, comments: &str) -> Result<InventoryRecord, FetchError> {
        self.inner.delete(id, comments).await
    }

    async fn restore(&self, id: InventoryId) -> Result<InventoryRecord, FetchError> {
        self.inner.restore(id).await
    }
}

fn seeded_store() -> InventoryStore<MemoryInventoryApi> {
    InventoryStore::new(MemoryInventoryApi::with_example_data())
}

fn ids(records: &[InventoryRecord]) -> Vec<i64> {
    records.iter().map(|r| r.id.get()).collect()
}

#[tokio::test]
async fn create_then_load_active_shows_one_new_row() {
    let store = seeded_store();
    store.load_active().await.unwrap();
    let before = store.records();

    let form = CreateForm {
        warehouse_id: "2".to_string(),
        sku: "87OQ4BZR".to_string(),
        quantity: "5".to_string(),
        description: "x".to_string(),
    };
    let outcome = form.submit(&store).await.unwrap();
    assert_eq!(outcome.reloaded, ViewMode::Active);
    assert!(outcome.reload.is_applied());

    store.load_active().await.unwrap();
    let after = store.records();
    let new: Vec<_> = after
        .iter()
        .filter(|r| !before.iter().any(|b| b.id == r.id))
        .collect();

    assert_eq!(new.len(), 1);
    assert!(!new[0].deleted);
    assert_eq!(new[0].quantity, 5);
    assert_eq!(new[0].warehouse_id, 2);
    assert_eq!(new[0].description, "x");
}

#[tokio::test]
async fn soft_delete_moves_row_to_deleted_view() {
    let store = seeded_store();
    store.load_active().await.unwrap();

    let mut form = DeleteForm::open(&store, InventoryId::new(2)).unwrap();
    form.comments = "damaged".to_string();
    form.submit(&store).await.unwrap();

    store.load_deleted().await.unwrap();
    let deleted = store.find(InventoryId::new(2)).expect("row in deleted view");
    assert_eq!(deleted.comments.as_deref(), Some("damaged"));

    store.load_active().await.unwrap();
    assert!(store.find(InventoryId::new(2)).is_none());
}

#[tokio::test]
async fn restore_moves_row_back_to_active_view() {
    let store = seeded_store();
    store.load_active().await.unwrap();
    store.soft_delete(InventoryId::new(2), "damaged").await.unwrap();

    store.load_deleted().await.unwrap();
    RestoreAction::open(&store, InventoryId::new(2))
        .unwrap()
        .submit(&store)
        .await
        .unwrap();

    store.load_active().await.unwrap();
    let restored = store.find(InventoryId::new(2)).expect("row in active view");
    assert!(!restored.deleted);
    // Comments survive a restore.
    assert_eq!(restored.comments.as_deref(), Some("damaged"));

    store.load_deleted().await.unwrap();
    assert!(store.find(InventoryId::new(2)).is_none());
}

#[tokio::test]
async fn empty_delete_comments_are_accepted() {
    let store = seeded_store();
    store.load_active().await.unwrap();
    let form = DeleteForm::open(&store, InventoryId::new(1)).unwrap();
    let outcome = form.submit(&store).await.unwrap();
    assert!(outcome.record.deleted);
    assert_eq!(outcome.record.comments.as_deref(), Some(""));
}

#[tokio::test]
async fn switching_views_replaces_the_list() {
    let store = seeded_store();

    store.load_active().await.unwrap();
    assert_eq!(ids(&store.records()), vec![1, 2, 3, 4]);
    assert!(store.records().iter().all(|r| !r.deleted));

    store.load_deleted().await.unwrap();
    assert_eq!(ids(&store.records()), vec![5]);

    store.load_all().await.unwrap();
    assert_eq!(ids(&store.records()), vec![1, 2, 3, 4, 5]);
    assert_eq!(store.view(), ViewMode::All);
}

#[tokio::test]
async fn mutation_reloads_the_current_view_not_the_records_view() {
    let store = seeded_store();
    store.load_deleted().await.unwrap();

    let outcome = store
        .create(Candidate::new("3", "52KN0DZE", "10", ""))
        .await
        .unwrap();

    assert_eq!(outcome.reloaded, ViewMode::Deleted);
    assert_eq!(store.view(), ViewMode::Deleted);
    assert!(store.find(outcome.record.id).is_none());

    store.load_active().await.unwrap();
    assert!(store.find(outcome.record.id).is_some());
}

#[tokio::test]
async fn delete_in_all_view_keeps_row_with_deleted_status() {
    let store = seeded_store();
    store.load_all().await.unwrap();

    store.soft_delete(InventoryId::new(3), "expired").await.unwrap();

    let table = store.table();
    let row = table
        .rows
        .iter()
        .find(|r| r.id == InventoryId::new(3))
        .unwrap();
    assert_eq!(row.status.map(|s| s.label()), Some("Deleted"));
    assert_eq!(row.comments.as_deref(), Some("expired"));
}

#[tokio::test]
async fn transport_failure_leaves_snapshot_untouched() {
    let store = seeded_store();
    store.load_active().await.unwrap();
    let before = store.snapshot();

    store.api().fail_next(1);
    let err = store
        .create(Candidate::new("2", "87OQ4BZR", "5", "x"))
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Transport(ref e) if e.is_transport()));

    store.api().fail_next(1);
    assert!(store.soft_delete(InventoryId::new(1), "x").await.is_err());
    store.api().fail_next(1);
    assert!(store.restore(InventoryId::new(5)).await.is_err());
    store.api().fail_next(1);
    assert!(store
        .update(InventoryId::new(1), Candidate::new("1", "53HA4DWH", "1", ""))
        .await
        .is_err());

    let after = store.snapshot();
    assert_eq!(after.view, before.view);
    assert_eq!(after.records, before.records);
    assert_eq!(after.generation, before.generation);
    assert!(store.last_error().is_some());
}

#[tokio::test]
async fn failed_view_switch_keeps_previous_view() {
    let store = seeded_store();
    store.load_active().await.unwrap();
    let before = store.records();

    store.api().fail_next(1);
    assert!(store.load_deleted().await.is_err());

    assert_eq!(store.view(), ViewMode::Active);
    assert_eq!(store.requested_view(), ViewMode::Active);
    assert_eq!(store.records(), before);
    assert!(store.last_error().is_some());

    store.load_deleted().await.unwrap();
    assert_eq!(store.last_error(), None);
}

#[tokio::test]
async fn backend_rejection_is_reported() {
    let store = seeded_store();
    store.load_all().await.unwrap();

    // Passes the console's rule; the backend caps SKUs at eight characters.
    let err = store
        .create(Candidate::new("1", "123456789", "10", ""))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ConsoleError::Transport(FetchError::Rejected {
            status: 400,
            message: "invalid input".to_string()
        })
    );
    assert_eq!(store.records().len(), 5);
}

#[tokio::test]
async fn stale_response_does_not_overwrite_newer_view() {
    let store = InventoryStore::new(GatedApi::seeded());
    let release = store.api().hold(ViewMode::Active);

    let slow = store.load_active();
    let fast = async {
        let outcome = store.load_deleted().await;
        release.send(()).unwrap();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(fast.unwrap(), LoadOutcome::Applied { count: 1, generation: 2 });
    assert_eq!(slow.unwrap(), LoadOutcome::Discarded { generation: 1 });
    assert_eq!(store.view(), ViewMode::Deleted);
    assert_eq!(ids(&store.records()), vec![5]);
}

#[tokio::test]
async fn mutation_during_view_switch_reloads_the_requested_view() {
    let store = InventoryStore::new(GatedApi::seeded());
    store.load_active().await.unwrap();
    let release = store.api().hold(ViewMode::Deleted);

    let switch = store.load_deleted();
    let create = async {
        let outcome = store
            .create(Candidate::new("2", "87OQ4BZR", "12", "loading dock"))
            .await;
        release.send(()).unwrap();
        outcome
    };
    let (switch, create) = tokio::join!(switch, create);

    let outcome = create.unwrap();
    assert_eq!(outcome.reloaded, ViewMode::Deleted);
    assert_eq!(outcome.reload, LoadOutcome::Applied { count: 1, generation: 3 });
    assert_eq!(switch.unwrap(), LoadOutcome::Discarded { generation: 2 });
    assert_eq!(store.view(), ViewMode::Deleted);
    assert_eq!(ids(&store.records()), vec![5]);
}

#[tokio::test]
async fn reload_failure_after_commit_is_distinguished() {
    let log = Arc::new(EventLog::new());
    let store = InventoryStore::new(GatedApi::seeded()).with_observer(log.clone());
    store.load_active().await.unwrap();
    let before = store.records();

    store.api().fail_next_list();
    let err = store
        .update(InventoryId::new(1), Candidate::new("4", "53HA4DWH", "20", ""))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ConsoleError::ReloadFailed {
            action: MutationKind::Update,
            ..
        }
    ));
    // The write landed; the list on screen predates it.
    assert_eq!(store.records(), before);
    assert!(log.events().iter().any(|e| matches!(
        e,
        StoreEvent::ReloadFailed {
            view: ViewMode::Active,
            ..
        }
    )));

    store.reload().await.unwrap();
    assert_eq!(store.find(InventoryId::new(1)).unwrap().quantity, 20);
}

#[tokio::test]
async fn stale_update_form_submits_its_seeded_values() {
    let store = seeded_store();
    store.load_active().await.unwrap();

    let form = UpdateForm::open(&store, InventoryId::new(1)).unwrap();
    store
        .update(InventoryId::new(1), Candidate::new("1", "53HA4DWH", "99", "recount"))
        .await
        .unwrap();

    // The form was seeded before the recount and does not see it.
    assert_eq!(form.base().quantity, 50);
    form.submit(&store).await.unwrap();
    let row = store.find(InventoryId::new(1)).unwrap();
    assert_eq!(row.quantity, 50);
    assert_eq!(row.description, "");
}

#[tokio::test]
async fn observer_sees_loads_and_failures() {
    let log = Arc::new(EventLog::new());
    let store = seeded_store().with_observer(log.clone());

    store.load_active().await.unwrap();
    store.api().fail_next(1);
    let _ = store.restore(InventoryId::new(5)).await;

    let events = log.events();
    assert_eq!(
        events[0],
        StoreEvent::Loaded {
            view: ViewMode::Active,
            count: 4,
            generation: 1
        }
    );
    assert!(matches!(
        events[1],
        StoreEvent::MutationFailed {
            action: MutationKind::Restore,
            ..
        }
    ));
    assert!(events[1].is_error());
}
