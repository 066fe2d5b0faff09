//! Checkout against the payment sandbox.

use std::time::Duration;

use anyhow::{bail, Result};
use dialoguer::Select;
use luxe_commerce::checkout::{CheckoutControl, CheckoutStatus, PaymentError};

use super::{CheckoutArgs, Outcome};
use crate::context::Context;
use crate::output::status_badge;
use crate::sandbox::SandboxApproval;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.storefront()?;

    match storefront.checkout_control() {
        CheckoutControl::Hidden => {
            ctx.output.info("Your cart is empty. Add something first.");
            return Ok(());
        }
        CheckoutControl::ConfigurationNeeded => {
            bail!("Checkout is unavailable: the payment widget is not configured. Set [sandbox] enabled = true.");
        }
        CheckoutControl::Button(_) => {}
    }

    let order = storefront.order_descriptor();
    ctx.output.header(&format!("Checkout: {}", order.store_name));
    ctx.output.kv("Items", &order.item_count().to_string());
    ctx.output
        .totals(&order.subtotal, &order.shipping, &order.total);
    if let Ok(payload) = serde_json::to_string(&order.to_provider_payload()) {
        ctx.output.debug(&format!("Provider payload: {}", payload));
    }

    let spinner = ctx.output.spinner("Creating order...");
    let created = storefront.create_order().await;
    spinner.finish_and_clear();

    let handle = match created {
        Ok(handle) => handle,
        Err(e) => {
            // The widget reports creation failures through its error callback.
            let status = storefront.on_error(e.clone());
            report(status, ctx);
            bail!("Could not create order: {}", e);
        }
    };
    ctx.output.kv("Order", handle.id.as_str());

    let outcome = match args.outcome {
        Some(outcome) => outcome,
        None if ctx.output.is_json() => bail!("--outcome is required with --json"),
        None => prompt_outcome()?,
    };

    let latency = Duration::from_millis(ctx.config.sandbox.latency_ms);
    let status = match outcome {
        Outcome::Approve | Outcome::Decline => {
            let mut approval = SandboxApproval::new(handle.id.clone(), order.total, latency);
            if outcome == Outcome::Decline {
                approval = approval.declined();
            }

            let spinner = ctx.output.spinner("Capturing payment...");
            let status = storefront.on_approve(&approval).await;
            spinner.finish_and_clear();
            status
        }
        Outcome::Cancel => storefront.on_cancel(),
        Outcome::Error => storefront.on_error(PaymentError::Provider(
            "sandbox widget reported an error".to_string(),
        )),
    };

    report(status, ctx);
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "order_id": handle.id,
            "status": status,
            "total": order.total.display_amount(),
            "currency": order.currency.code(),
        }));
    } else {
        storefront.presenter().print_panel();
    }

    Ok(())
}

fn report(status: CheckoutStatus, ctx: &Context) {
    ctx.output
        .info(&format!("Checkout {}", status_badge(status)));
}

fn prompt_outcome() -> Result<Outcome> {
    let choices = [
        ("Approve payment", Outcome::Approve),
        ("Approve, but decline the card", Outcome::Decline),
        ("Close the payment window", Outcome::Cancel),
        ("Simulate a widget error", Outcome::Error),
    ];
    let labels: Vec<&str> = choices.iter().map(|(label, _)| *label).collect();

    let selection = Select::new()
        .with_prompt("Sandbox shopper")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(choices[selection].1)
}
