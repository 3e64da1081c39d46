//! CLI command implementations.

pub mod add;
pub mod catalog;
pub mod config;
pub mod delete;
pub mod list;
pub mod restore;
pub mod update;

use anyhow::Result;
use clap::{Args, Subcommand};
use stockroom_console::{ConsoleError, MutationOutcome};
use stockroom_model::{InventoryId, ViewMode, WarehouseId, WireRecord};

use crate::context::{Context, Store};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// View to show (default: display.default_view).
    #[arg(long)]
    pub view: Option<ViewMode>,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Warehouse (1-10).
    #[arg(short, long)]
    pub warehouse: WarehouseId,

    /// Product SKU.
    #[arg(short, long)]
    pub sku: String,

    /// Quantity on hand.
    #[arg(short, long, allow_hyphen_values = true)]
    pub quantity: String,

    /// Free-text description.
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// View to reload afterwards (default: display.default_view).
    #[arg(long)]
    pub view: Option<ViewMode>,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Row ID.
    pub id: InventoryId,

    /// New warehouse (1-10).
    #[arg(short, long)]
    pub warehouse: Option<WarehouseId>,

    /// New SKU.
    #[arg(short, long)]
    pub sku: Option<String>,

    /// New quantity.
    #[arg(short, long, allow_hyphen_values = true)]
    pub quantity: Option<String>,

    /// New description.
    #[arg(short, long)]
    pub description: Option<String>,

    /// View the row is loaded from (default: display.default_view).
    #[arg(long)]
    pub view: Option<ViewMode>,
}

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Row ID.
    pub id: InventoryId,

    /// Reason for deleting; may be empty.
    #[arg(short = 'm', long)]
    pub comments: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// View the row is loaded from (default: display.default_view).
    #[arg(long)]
    pub view: Option<ViewMode>,
}

/// Arguments for the restore command.
#[derive(Args)]
pub struct RestoreArgs {
    /// Row ID.
    pub id: InventoryId,

    /// View the row is loaded from (default: deleted).
    #[arg(long)]
    pub view: Option<ViewMode>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default config file.
    Init {
        /// File to write (default: ./stockroom.toml). A `.json` path writes JSON.
        #[arg(short, long)]
        path: Option<String>,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Open a store and load `view`, falling back to the configured default.
pub(crate) async fn open_store(ctx: &Context, view: Option<ViewMode>) -> Result<Store> {
    let view = view.unwrap_or(ctx.config.display.default_view);
    let store = ctx.store()?;

    let spinner = ctx.output.spinner(&format!("Loading {}", view.title()));
    let result = store.load(view).await;
    spinner.finish_and_clear();
    result?;

    Ok(store)
}

/// Print the store's current table.
pub(crate) fn print_table(ctx: &Context, store: &Store) {
    ctx.output.inventory(&store.table());
}

/// Report a mutation and show the reloaded view.
///
/// A failed reload after a committed write is reported as a warning with
/// the write's result, then returned as an error so the exit status shows it.
pub(crate) fn report(
    ctx: &Context,
    store: &Store,
    verb: &str,
    result: Result<MutationOutcome, ConsoleError>,
) -> Result<()> {
    match result {
        Ok(outcome) => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "record": WireRecord::from(&outcome.record),
                    "table": store.table(),
                }));
                return Ok(());
            }
            ctx.output
                .success(&format!("{} row {}", verb, outcome.record.id));
            if !outcome.reload.is_applied() {
                ctx.output
                    .debug("A newer load replaced the reload; showing the newer view");
            }
            print_table(ctx, store);
            Ok(())
        }
        Err(e @ ConsoleError::ReloadFailed { .. }) => {
            ctx.output
                .warn("The change was saved, but the list could not be refreshed");
            print_table(ctx, store);
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
