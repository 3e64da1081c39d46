//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, BASE_URL_ENV};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { path, force } => init_config(path.as_deref(), force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }
    if std::env::var_os(BASE_URL_ENV).is_some() {
        ctx.output
            .info(&format!("server.base_url taken from {}", BASE_URL_ENV));
    }

    ctx.output.info("[server]");
    ctx.output.kv("base_url", &ctx.config.server.base_url);

    ctx.output.info("[http]");
    ctx.output.kv(
        "connect_timeout_ms",
        &ctx.config.http.connect_timeout_ms.to_string(),
    );
    ctx.output.kv(
        "total_timeout_ms",
        &ctx.config.http.total_timeout_ms.to_string(),
    );

    ctx.output.info("[display]");
    ctx.output
        .kv("default_view", ctx.config.display.default_view.as_str());

    if ctx.offline {
        ctx.output.info("Offline: commands run against example data");
    }

    Ok(())
}

fn init_config(path: Option<&str>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = match path {
        Some(path) => ctx.resolve_path(path),
        None => ctx.default_config_path(),
    };

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if config_path.extension().map_or(false, |e| e == "json") {
        CliConfig::default().save(&config_path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
