//! Console error types.

use stockroom_fetch::FetchError;
use stockroom_model::{InventoryId, ModelError, ValidationError, ViewMode};
use thiserror::Error;

use crate::observer::MutationKind;

/// Errors surfaced to the operator by the store and forms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// Input rejected before anything was sent.
    #[error("Please enter valid input: {0}")]
    Validation(#[from] ValidationError),

    /// Domain lookup failed (e.g. a SKU with no catalog entry).
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The request failed; the snapshot is unchanged.
    #[error("Request failed: {0}")]
    Transport(#[from] FetchError),

    /// The mutation was committed but the follow-up reload failed, so the
    /// list on screen predates it.
    #[error("{action} succeeded but reloading failed: {source}")]
    ReloadFailed {
        action: MutationKind,
        source: FetchError,
    },

    /// The record is not part of the loaded snapshot.
    #[error("Inventory row {0} is not loaded")]
    RecordNotLoaded(InventoryId),

    /// The row does not offer this action in the current view.
    #[error("Cannot {action} row {id} in the {view} view")]
    ActionNotAllowed {
        id: InventoryId,
        action: MutationKind,
        view: ViewMode,
    },
}

impl ConsoleError {
    /// Whether anything reached the backend before the failure.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ConsoleError::Validation(_)
                | ConsoleError::Model(_)
                | ConsoleError::RecordNotLoaded(_)
                | ConsoleError::ActionNotAllowed { .. }
        )
    }
}
