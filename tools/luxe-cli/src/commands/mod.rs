//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod products;
pub mod subscribe;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its totals.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product ID.
        id: String,

        /// Display name (defaults to the catalog name).
        #[arg(short, long)]
        name: Option<String>,

        /// Unit price as a decimal, e.g. 18.50 (defaults to the catalog price).
        #[arg(short, long)]
        price: Option<f64>,
    },
    /// Remove a product's line.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Change a line's quantity by a signed amount.
    Qty {
        /// Product ID.
        id: String,

        /// Amount to add; negative to subtract.
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// How the sandbox shopper responds to the checkout button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Outcome {
    /// Approve; the payment is captured.
    Approve,
    /// Approve, but the capture is declined.
    Decline,
    /// Dismiss the payment window.
    Cancel,
    /// The widget reports an error.
    Error,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Shopper response; prompts when omitted.
    #[arg(short, long, value_enum)]
    pub outcome: Option<Outcome>,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Filter label, e.g. "Gel" or "All".
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the subscribe command.
#[derive(Args)]
pub struct SubscribeArgs {
    /// Email address.
    pub email: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
