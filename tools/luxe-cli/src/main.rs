//! Luxe CLI - Terminal storefront for the Luxe Nails cart.
//!
//! Commands:
//! - `luxe cart` - Show and edit the cart
//! - `luxe checkout` - Pay through the sandbox payment widget
//! - `luxe products` - List products, optionally filtered by category
//! - `luxe subscribe` - Sign up for the newsletter
//! - `luxe config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod presenter;
mod sandbox;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use luxe_observability::LogLevel;

use commands::{CartArgs, CheckoutArgs, ConfigArgs, ProductsArgs, SubscribeArgs};

/// Luxe CLI - Shop the Luxe Nails catalog from the terminal
#[derive(Parser)]
#[command(name = "luxe")]
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
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and edit the cart
    Cart(CartArgs),

    /// Check out through the payment sandbox
    Checkout(CheckoutArgs),

    /// List catalog products
    Products(ProductsArgs),

    /// Subscribe to the newsletter
    Subscribe(SubscribeArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let mut logging = ctx.config.logging.clone();
    if cli.verbose {
        logging.level = logging.level.min(LogLevel::Debug);
    }
    if let Err(e) = logging.init() {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Subscribe(args) => commands::subscribe::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
