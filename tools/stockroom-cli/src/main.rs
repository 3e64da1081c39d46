//! Stockroom CLI - operator console for the inventory backend.
//!
//! Commands:
//! - `stockroom list` - Show the active, deleted or full inventory
//! - `stockroom add` - Add an inventory row
//! - `stockroom update` - Edit an active row
//! - `stockroom delete` - Soft-delete a row with comments
//! - `stockroom restore` - Restore a deleted row
//! - `stockroom catalog` - Print the product catalog
//! - `stockroom config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AddArgs, ConfigArgs, DeleteArgs, ListArgs, RestoreArgs, UpdateArgs};
use logging::LogFormat;

/// Stockroom - manage warehouse inventory rows
#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Work against built-in example data instead of the backend
    #[arg(long, global = true)]
    offline: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show inventory rows for a view
    List(ListArgs),

    /// Add an inventory row
    Add(AddArgs),

    /// Edit an active inventory row
    Update(UpdateArgs),

    /// Soft-delete an inventory row
    Delete(DeleteArgs),

    /// Restore a deleted inventory row
    Restore(RestoreArgs),

    /// Print the product catalog
    Catalog,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_format);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, cli.offline, output)?;

    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Add(args) => commands::add::run(args, &ctx).await,
        Commands::Update(args) => commands::update::run(args, &ctx).await,
        Commands::Delete(args) => commands::delete::run(args, &ctx).await,
        Commands::Restore(args) => commands::restore::run(args, &ctx).await,
        Commands::Catalog => commands::catalog::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
