//! Soft-delete an inventory row.

use anyhow::Result;
use dialoguer::Confirm;
use stockroom_console::DeleteForm;

use super::{open_store, report, DeleteArgs};
use crate::context::Context;

/// Run the delete command.
pub async fn run(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let store = open_store(ctx, args.view).await?;

    let mut form = DeleteForm::open(&store, args.id)?;
    form.comments = args.comments.unwrap_or_default();

    if !args.yes {
        if let Some(row) = store.find(form.id()) {
            ctx.output.kv("SKU", &row.sku);
            ctx.output.kv("Quantity", &row.quantity.to_string());
        }
        if form.comments.is_empty() {
            ctx.output.warn("No comments given");
        }

        let confirmed = Confirm::new()
            .with_prompt(format!("Delete row {}?", form.id()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Delete cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner(&format!("Deleting row {}", form.id()));
    let result = form.submit(&store).await;
    spinner.finish_and_clear();

    report(ctx, &store, "Deleted", result)
}
