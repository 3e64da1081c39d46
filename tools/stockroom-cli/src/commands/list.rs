//! Show the inventory for a view.

use anyhow::Result;

use super::{open_store, print_table, ListArgs};
use crate::context::Context;

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let store = open_store(ctx, args.view).await?;
    print_table(ctx, &store);
    Ok(())
}
