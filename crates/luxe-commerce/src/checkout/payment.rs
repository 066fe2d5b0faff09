//! Payment widget capability.
//!
//! The storefront never processes payments itself. A third-party widget
//! renders the checkout button, creates provider-side orders from an
//! [`OrderDescriptor`] and, once the shopper approves, hands back an
//! [`ApprovedOrder`] that can capture the funds.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checkout::OrderDescriptor;
use crate::ids::{CaptureId, OrderId};
use crate::money::Money;

/// Errors reported by, or about, the payment widget.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// No widget is loaded or configured.
    #[error("Payment widget is not configured")]
    Unavailable,

    /// Checkout was requested for an empty cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// The provider declined the payment.
    #[error("Payment declined: {0}")]
    Declined(String),

    /// The provider reported an error.
    #[error("Payment provider error: {0}")]
    Provider(String),

    /// The provider could not be reached.
    #[error("Network error: {0}")]
    Network(String),
}

/// Provider-side order created from the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHandle {
    /// Provider order ID.
    pub id: OrderId,
}

impl OrderHandle {
    pub fn new(id: impl Into<OrderId>) -> Self {
        Self { id: id.into() }
    }
}

/// Result of a successful capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureReceipt {
    /// Order that was captured.
    pub order_id: OrderId,
    /// Provider capture reference.
    pub capture_id: CaptureId,
    /// Amount captured.
    pub amount: Money,
    /// When the provider confirmed the capture.
    pub captured_at: DateTime<Utc>,
    /// Payer name, when the provider shares it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_name: Option<String>,
}

/// Button layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonLayout {
    #[default]
    Vertical,
    Horizontal,
}

/// Button color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonColor {
    #[default]
    Gold,
    Blue,
    Silver,
    White,
    Black,
}

/// Button shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonShape {
    Rect,
    #[default]
    Pill,
}

/// Button label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonLabel {
    #[default]
    Checkout,
    Pay,
    Buynow,
}

/// Style options passed to the widget's button renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ButtonStyle {
    #[serde(default)]
    pub layout: ButtonLayout,
    #[serde(default)]
    pub color: ButtonColor,
    #[serde(default)]
    pub shape: ButtonShape,
    #[serde(default)]
    pub label: ButtonLabel,
}

/// Third-party payment widget.
///
/// Implementations wrap whatever SDK is present at runtime. The cart manager
/// holds one as an optional capability; when it is absent the storefront
/// shows a configuration notice instead of a checkout button.
#[async_trait]
pub trait PaymentWidget: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Render (or re-render) the checkout button.
    fn render_button(&self, style: &ButtonStyle);

    /// Create a provider-side order for the given cart snapshot.
    async fn create_order(&self, order: &OrderDescriptor) -> Result<OrderHandle, PaymentError>;
}

/// An order the shopper approved in the widget, ready to capture.
#[async_trait]
pub trait ApprovedOrder: Send + Sync {
    /// Provider order ID.
    fn order_id(&self) -> &OrderId;

    /// Capture the approved payment.
    async fn capture(&self) -> Result<CaptureReceipt, PaymentError>;
}
