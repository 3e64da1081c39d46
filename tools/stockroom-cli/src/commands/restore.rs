//! Restore a deleted inventory row.

use anyhow::Result;
use stockroom_console::RestoreAction;
use stockroom_model::ViewMode;

use super::{open_store, report, RestoreArgs};
use crate::context::Context;

/// Run the restore command.
pub async fn run(args: RestoreArgs, ctx: &Context) -> Result<()> {
    // Only the deleted and all views offer restore, so the configured
    // default view is not used here.
    let view = args.view.unwrap_or(ViewMode::Deleted);
    let store = open_store(ctx, Some(view)).await?;

    let action = RestoreAction::open(&store, args.id)?;

    let spinner = ctx.output.spinner(&format!("Restoring row {}", action.id()));
    let result = action.submit(&store).await;
    spinner.finish_and_clear();

    report(ctx, &store, "Restored", result)
}
