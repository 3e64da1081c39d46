//! In-process inventory backend.
//!
//! Applies the same rules and answers with the same rejections as the HTTP
//! backend, without a network. Used by the test suite and by the CLI's
//! offline mode. Failures can be injected to exercise transport-error paths.

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime, Timelike};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use stockroom_model::validation::backend_accepts;
use stockroom_model::{InventoryId, InventoryRecord, RecordPayload, ViewMode};

use crate::api::{paths, InventoryApi};
use crate::FetchError;

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<InventoryId, InventoryRecord>,
    next_id: i64,
    fail_next: u32,
    calls: Vec<String>,
}

/// [`InventoryApi`] backed by an in-memory table.
#[derive(Debug, Default)]
pub struct MemoryInventoryApi {
    state: Mutex<MemoryState>,
}

fn rejected(message: &str) -> FetchError {
    FetchError::Rejected {
        status: 400,
        message: message.to_string(),
    }
}

fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

impl MemoryInventoryApi {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend holding the standard example rows: four active rows
    /// in warehouse 1 and one deleted row.
    pub fn with_example_data() -> Self {
        let api = Self::new();
        {
            let mut state = api.lock();
            for (sku, quantity) in [
                ("53HA4DWH", 50),
                ("65SH4FGF", 50),
                ("69DI1HCU", 50),
                ("84QZ3GVS", 75),
            ] {
                insert(&mut state, 1, sku, quantity, "", false, None);
            }
            insert(
                &mut state,
                1,
                "53HA4DWH",
                10,
                "",
                true,
                Some("This batch went bad".to_string()),
            );
        }
        api
    }

    /// Make the next `count` calls fail with a connection error.
    pub fn fail_next(&self, count: u32) {
        self.lock().fail_next = count;
    }

    /// Requests received so far, as `"METHOD path"`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Current contents of the table, ordered by id.
    pub fn rows(&self) -> Vec<InventoryRecord> {
        self.lock().rows.values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A panic while holding the lock leaves the table itself consistent.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the call and consume an injected failure if one is pending.
    fn begin(&self, method: &str, path: &str) -> Result<MutexGuard<'_, MemoryState>, FetchError> {
        let mut state = self.lock();
        state.calls.push(format!("{} {}", method, path));
        if state.fail_next > 0 {
            state.fail_next -= 1;
            tracing::debug!(method, path, "injected failure");
            return Err(FetchError::Connection("injected failure".to_string()));
        }
        Ok(state)
    }
}

fn insert(
    state: &mut MemoryState,
    warehouse_id: i64,
    sku: &str,
    quantity: i64,
    description: &str,
    deleted: bool,
    comments: Option<String>,
) -> InventoryRecord {
    state.next_id += 1;
    let stamp = now();
    let record = InventoryRecord {
        id: InventoryId::new(state.next_id),
        warehouse_id,
        sku: sku.to_string(),
        description: description.to_string(),
        quantity,
        deleted,
        comments,
        created: Some(stamp),
        updated: Some(stamp),
    };
    state.rows.insert(record.id, record.clone());
    record
}

/// Parse a payload the backend has already accepted.
fn parse_payload(payload: &RecordPayload) -> Result<(i64, i64), FetchError> {
    if !backend_accepts(&payload.warehouse_id, &payload.sku, &payload.quantity) {
        return Err(rejected("invalid input"));
    }
    let warehouse = payload
        .warehouse_id
        .parse()
        .map_err(|_| rejected("invalid input"))?;
    let quantity = payload
        .quantity
        .parse()
        .map_err(|_| rejected("invalid input"))?;
    Ok((warehouse, quantity))
}

#[async_trait]
impl InventoryApi for MemoryInventoryApi {
    async fn list(&self, view: ViewMode) -> Result<Vec<InventoryRecord>, FetchError> {
        let state = self.begin("GET", view.list_path())?;
        Ok(state
            .rows
            .values()
            .filter(|r| view.includes(r.deleted))
            .cloned()
            .collect())
    }

    async fn create(&self, payload: &RecordPayload) -> Result<InventoryRecord, FetchError> {
        let mut state = self.begin("POST", paths::CREATE)?;
        let (warehouse, quantity) = parse_payload(payload)?;
        Ok(insert(
            &mut state,
            warehouse,
            &payload.sku,
            quantity,
            &payload.description,
            false,
            None,
        ))
    }

    async fn update(
        &self,
        id: InventoryId,
        payload: &RecordPayload,
    ) -> Result<InventoryRecord, FetchError> {
        let mut state = self.begin("PUT", &paths::update(id))?;
        let (warehouse, quantity) = parse_payload(payload)?;

        let row = state
            .rows
            .get_mut(&id)
            .ok_or_else(|| rejected("item does not exist"))?;
        if row.deleted {
            return Err(rejected("cannot update deleted item"));
        }

        row.warehouse_id = warehouse;
        row.sku = payload.sku.clone();
        row.quantity = quantity;
        row.description = payload.description.clone();
        row.updated = Some(now());
        Ok(row.clone())
    }

    async fn delete(&self, id: InventoryId, comments: &str) -> Result<InventoryRecord, FetchError> {
        let mut state = self.begin("PUT", &paths::delete(id))?;

        let row = state
            .rows
            .get_mut(&id)
            .ok_or_else(|| rejected("item does not exist"))?;
        if row.deleted {
            return Err(rejected("item is already deleted"));
        }

        row.comments = Some(comments.to_string());
        row.deleted = true;
        row.updated = Some(now());
        Ok(row.clone())
    }

    async fn restore(&self, id: InventoryId) -> Result<InventoryRecord, FetchError> {
        let mut state = self.begin("PUT", &paths::restore(id))?;

        let row = state
            .rows
            .get_mut(&id)
            .ok_or_else(|| rejected("item does not exist"))?;
        if !row.deleted {
            return Err(rejected("item is already active"));
        }

        // Comments stay attached; only the flag flips.
        row.deleted = false;
        row.updated = Some(now());
        Ok(row.clone())
    }
}
