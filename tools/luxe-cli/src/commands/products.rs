//! List catalog products.

use anyhow::Result;
use luxe_commerce::catalog::CategoryFilter;

use super::ProductsArgs;
use crate::context::Context;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let filter = args
        .category
        .as_deref()
        .map(CategoryFilter::from_label)
        .unwrap_or_default();
    let visible = filter.apply(&ctx.config.catalog);

    if ctx.output.is_json() {
        ctx.output.json(&visible);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", filter.label()));
    if ctx.config.catalog.is_empty() {
        ctx.output
            .warn("No products configured. Run `luxe config init` for a sample catalog.");
        return Ok(());
    }
    if visible.is_empty() {
        ctx.output.info("No products match this filter.");
        return Ok(());
    }

    let currency = ctx.config.store.currency;
    let rows: Vec<Vec<String>> = visible
        .iter()
        .map(|card| {
            vec![
                card.id.to_string(),
                card.name.clone(),
                card.category.clone().unwrap_or_else(|| "-".to_string()),
                card.price(currency).display(),
            ]
        })
        .collect();
    ctx.output
        .table(&["ID", "NAME", "CATEGORY", "PRICE"], &rows, &[18, 28, 16, 10]);

    Ok(())
}
