//! Configuration management commands.

use std::collections::HashSet;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
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

    let store = &ctx.config.store;
    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("display_name", &store.display_name);
    ctx.output.kv("currency", store.currency.code());
    ctx.output.kv(
        "free_shipping_threshold",
        &store.free_shipping_threshold().display(),
    );
    ctx.output
        .kv("flat_shipping_cost", &store.flat_shipping_cost().display());
    ctx.output.kv("storage_key", &store.storage_key);

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_str());
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output
        .kv("dir", &ctx.storage_dir().display().to_string());

    ctx.output.info("");
    ctx.output.info("[sandbox]");
    ctx.output
        .kv("enabled", &ctx.config.sandbox.enabled.to_string());
    ctx.output
        .kv("latency_ms", &ctx.config.sandbox.latency_ms.to_string());

    if !ctx.config.catalog.is_empty() {
        ctx.output.header("Catalog");
        for card in &ctx.config.catalog {
            ctx.output
                .kv(card.id.as_str(), &card.price(store.currency).display());
        }
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = generate_default_config(&ctx.config.store.display_name);
    std::fs::write(&config_path, content)?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

/// Problems found in a configuration.
#[derive(Debug, Default)]
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn check(config: &CliConfig) -> Findings {
    let mut findings = Findings::default();
    let store = &config.store;

    if store.display_name.trim().is_empty() {
        findings
            .errors
            .push("store.display_name is required".to_string());
    }
    if let Err(e) = store.validate() {
        findings.errors.push(e.to_string());
    }
    if store.free_shipping_threshold_cents == 0 {
        findings
            .warnings
            .push("store.free_shipping_threshold is 0; every order ships free".to_string());
    }
    if !config.sandbox.enabled {
        findings
            .warnings
            .push("sandbox.enabled is false; checkout will be unavailable".to_string());
    }

    let mut seen = HashSet::new();
    for (i, card) in config.catalog.iter().enumerate() {
        if !seen.insert(&card.id) {
            findings
                .errors
                .push(format!("catalog[{}]: duplicate id '{}'", i, card.id));
        }
        if card.price < 0.0 || !card.price.is_finite() {
            findings
                .errors
                .push(format!("catalog[{}].price must be a non-negative number", i));
        }
        if card.name.trim().is_empty() {
            findings
                .warnings
                .push(format!("catalog[{}] ('{}') has no name", i, card.id));
        }
    }

    findings
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let Findings { errors, warnings } = check(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
