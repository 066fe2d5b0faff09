//! Checkout callback flow.
//!
//! The widget drives checkout through three terminal callbacks: approval
//! (followed by a capture), error and cancel. Each becomes a
//! [`CheckoutEvent`] that the cart manager applies.

use serde::{Deserialize, Serialize};

use crate::checkout::{ApprovedOrder, ButtonStyle, CaptureReceipt, PaymentError};

/// What the presentation layer should show where the checkout button goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutControl {
    /// Cart is empty; render nothing.
    Hidden,
    /// No payment widget; show a static configuration notice.
    ConfigurationNeeded,
    /// The widget renders its button with this style.
    Button(ButtonStyle),
}

/// Terminal outcome reported by the payment widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutEvent {
    /// Approval was captured successfully.
    Captured(CaptureReceipt),
    /// The widget reported an error, or capture failed.
    Failed(PaymentError),
    /// The shopper dismissed the widget.
    Cancelled,
}

impl CheckoutEvent {
    /// Status this event settles the checkout into.
    pub fn status(&self) -> CheckoutStatus {
        match self {
            CheckoutEvent::Captured(_) => CheckoutStatus::Completed,
            CheckoutEvent::Failed(_) => CheckoutStatus::Failed,
            CheckoutEvent::Cancelled => CheckoutStatus::Cancelled,
        }
    }
}

/// Final status of a checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStatus {
    Completed,
    Failed,
    Cancelled,
}

impl CheckoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::Completed => "completed",
            CheckoutStatus::Failed => "failed",
            CheckoutStatus::Cancelled => "cancelled",
        }
    }
}

/// Capture an approved order.
///
/// Borrows nothing from the cart, so the cart stays usable while the
/// provider round-trip is in flight. Feed the result to
/// [`CartManager::apply_checkout_event`](crate::cart::CartManager::apply_checkout_event).
pub async fn capture(approval: &dyn ApprovedOrder) -> CheckoutEvent {
    let order_id = approval.order_id().clone();
    tracing::debug!(%order_id, "capturing approved order");

    match approval.capture().await {
        Ok(receipt) => {
            tracing::info!(
                %order_id,
                capture_id = %receipt.capture_id,
                amount = %receipt.amount,
                "payment captured"
            );
            CheckoutEvent::Captured(receipt)
        }
        Err(e) => {
            tracing::warn!(%order_id, error = %e, "capture failed");
            CheckoutEvent::Failed(e)
        }
    }
}
