//! Edit an active inventory row.

use anyhow::Result;
use stockroom_console::UpdateForm;

use super::{open_store, report, UpdateArgs};
use crate::context::Context;

/// Run the update command.
pub async fn run(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let store = open_store(ctx, args.view).await?;

    // Seeded from the row as just loaded; flags override individual fields.
    let mut form = UpdateForm::open(&store, args.id)?;
    if let Some(warehouse) = args.warehouse {
        form.warehouse_id = warehouse.to_string();
    }
    if let Some(sku) = args.sku {
        form.sku = sku;
    }
    if let Some(quantity) = args.quantity {
        form.quantity = quantity;
    }
    if let Some(description) = args.description {
        form.description = description;
    }

    if !form.is_dirty() {
        ctx.output.info(&format!("Row {} unchanged", form.id()));
        return Ok(());
    }

    if let Ok((name, unit)) = form.product() {
        ctx.output.debug(&format!(
            "Editing {} ({}) in warehouse {}",
            name,
            unit,
            form.base().warehouse_id
        ));
    }

    let spinner = ctx.output.spinner(&format!("Updating row {}", form.id()));
    let result = form.submit(&store).await;
    spinner.finish_and_clear();

    report(ctx, &store, "Updated", result)
}
