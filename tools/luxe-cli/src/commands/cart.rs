//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use luxe_commerce::catalog;
use luxe_commerce::{Money, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::{Context, Storefront};

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show(ctx),
        CartCommand::Add { id, name, price } => add(&id, name, price, ctx),
        CartCommand::Remove { id } => remove(&id, ctx),
        CartCommand::Qty { id, delta } => update_quantity(&id, delta, ctx),
        CartCommand::Clear { yes } => clear(yes, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    storefront.presenter().print_panel();
    free_shipping_hint(&storefront, ctx);
    Ok(())
}

fn free_shipping_hint(storefront: &Storefront, ctx: &Context) {
    if storefront.cart().is_empty() {
        return;
    }
    let subtotal = storefront.compute_totals().subtotal;
    if let Some(remaining) = storefront
        .config()
        .shipping_policy()
        .remaining_for_free(&subtotal)
    {
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            remaining.display()
        ));
    }
}

fn add(id: &str, name: Option<String>, price: Option<f64>, ctx: &Context) -> Result<()> {
    let (name, price) = resolve_product(id, name, price, ctx)?;
    ctx.output
        .debug(&format!("Adding {} ({}) at {}", id, name, price.display()));

    let mut storefront = ctx.storefront()?;
    storefront.add(id, name, price);
    storefront.presenter().print_panel();
    free_shipping_hint(&storefront, ctx);
    Ok(())
}

/// Fill in name and price from the catalog where the caller left them out.
fn resolve_product(
    id: &str,
    name: Option<String>,
    price: Option<f64>,
    ctx: &Context,
) -> Result<(String, Money)> {
    let currency = ctx.config.store.currency;
    let card = catalog::find(&ctx.config.catalog, &ProductId::new(id));

    let price = match (price, card) {
        (Some(price), _) if price < 0.0 || !price.is_finite() => {
            bail!("Price must be a non-negative number, got {}", price)
        }
        (Some(price), _) => Money::from_decimal(price, currency),
        (None, Some(card)) => card.price(currency),
        (None, None) => bail!(
            "Product '{}' is not in the catalog; pass --price to add it anyway",
            id
        ),
    };

    let name = name
        .or_else(|| card.map(|c| c.name.clone()))
        .unwrap_or_else(|| id.to_string());

    Ok((name, price))
}

fn remove(id: &str, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.storefront()?;
    let id = ProductId::new(id);
    if storefront.cart().get(&id).is_none() {
        ctx.output.debug(&format!("{} is not in the cart", id));
    }

    storefront.remove(&id);
    storefront.presenter().print_panel();
    Ok(())
}

fn update_quantity(id: &str, delta: i64, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.storefront()?;
    let change = storefront.update_quantity(&ProductId::new(id), delta);
    ctx.output.debug(&format!("{}: {:?}", id, change));

    storefront.presenter().print_panel();
    Ok(())
}

fn clear(yes: bool, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.storefront()?;
    if storefront.cart().is_empty() {
        ctx.output.info("Cart is already empty.");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} item(s) from the cart?",
                storefront.count()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    storefront.clear();
    ctx.output.success("Cart cleared");
    storefront.presenter().print_panel();
    Ok(())
}
