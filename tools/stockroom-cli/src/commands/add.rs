//! Add an inventory row.

use anyhow::Result;
use stockroom_console::CreateForm;
use stockroom_model::ProductCatalog;

use super::{open_store, report, AddArgs};
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let store = open_store(ctx, args.view).await?;

    let form = CreateForm {
        warehouse_id: args.warehouse.to_string(),
        sku: args.sku,
        quantity: args.quantity,
        description: args.description,
    };

    match ProductCatalog::global().lookup(form.sku.trim()) {
        Ok((name, unit)) => ctx.output.debug(&format!("{} ({})", name, unit)),
        Err(e) => ctx.output.warn(&format!("{}; the row will not display", e)),
    }

    let spinner = ctx.output.spinner("Adding row");
    let result = form.submit(&store).await;
    spinner.finish_and_clear();

    report(ctx, &store, "Added", result)
}
