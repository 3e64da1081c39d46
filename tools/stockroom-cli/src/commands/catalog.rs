//! Print the product catalog.

use anyhow::Result;
use stockroom_model::ProductCatalog;

use crate::context::Context;

/// Run the catalog command.
pub async fn run(ctx: &Context) -> Result<()> {
    let catalog = ProductCatalog::global();

    if ctx.output.is_json() {
        ctx.output.json(&catalog.entries());
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", catalog.len()));
    let rows: Vec<Vec<String>> = catalog
        .entries()
        .iter()
        .map(|p| vec![p.sku.to_string(), p.product_name.to_string(), p.unit.to_string()])
        .collect();
    ctx.output.table(&["SKU", "Product Name", "Unit"], &rows);

    Ok(())
}
