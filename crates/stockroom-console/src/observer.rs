//! Store events for the UI layer.

use std::fmt;
use std::sync::Mutex;

use stockroom_model::ViewMode;

/// The four mutations the console can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    Restore,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
            MutationKind::Restore => "restore",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that happened to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A fresh snapshot replaced the list.
    Loaded {
        view: ViewMode,
        count: usize,
        generation: u64,
    },
    /// A response arrived after a newer request was issued and was dropped.
    Discarded { view: ViewMode, generation: u64 },
    /// Loading a view failed; the previous snapshot is kept.
    LoadFailed { view: ViewMode, message: String },
    /// A mutation was refused or could not be sent.
    MutationFailed {
        action: MutationKind,
        message: String,
    },
    /// A mutation landed but the reload after it failed.
    ReloadFailed {
        action: MutationKind,
        view: ViewMode,
        message: String,
    },
}

impl StoreEvent {
    /// Whether the operator should be shown an error.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            StoreEvent::LoadFailed { .. }
                | StoreEvent::MutationFailed { .. }
                | StoreEvent::ReloadFailed { .. }
        )
    }
}

/// Receives store events.
pub trait StoreObserver: Send + Sync {
    /// Called after each store transition.
    fn on_event(&self, event: &StoreEvent);
}

/// Observer that keeps every event, in order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<StoreEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far.
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl StoreObserver for EventLog {
    fn on_event(&self, event: &StoreEvent) {
        let mut events = self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        events.push(event.clone());
    }
}
