//! Payment sandbox.
//!
//! Stands in for the hosted payment widget: issues fake order IDs after a
//! simulated round-trip and captures or declines on request. No money moves.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use luxe_commerce::checkout::{
    ApprovedOrder, ButtonStyle, CaptureReceipt, OrderDescriptor, OrderHandle, PaymentError,
    PaymentWidget,
};
use luxe_commerce::{CaptureId, Money, OrderId};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::debug;

fn reference(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("{}-{}", prefix, suffix)
}

/// Sandbox payment widget.
pub struct SandboxWidget {
    latency: Duration,
}

impl SandboxWidget {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl PaymentWidget for SandboxWidget {
    fn name(&self) -> &str {
        "sandbox"
    }

    fn render_button(&self, style: &ButtonStyle) {
        debug!(?style, "sandbox button rendered");
    }

    async fn create_order(&self, order: &OrderDescriptor) -> Result<OrderHandle, PaymentError> {
        tokio::time::sleep(self.latency).await;
        if order.total.is_negative() {
            return Err(PaymentError::Provider(
                "order total must not be negative".to_string(),
            ));
        }
        Ok(OrderHandle::new(reference("SBX")))
    }
}

/// An order the sandbox shopper approved.
pub struct SandboxApproval {
    order_id: OrderId,
    amount: Money,
    latency: Duration,
    decline: bool,
}

impl SandboxApproval {
    pub fn new(order_id: OrderId, amount: Money, latency: Duration) -> Self {
        Self {
            order_id,
            amount,
            latency,
            decline: false,
        }
    }

    /// Make the capture fail as a card decline.
    pub fn declined(mut self) -> Self {
        self.decline = true;
        self
    }
}

#[async_trait]
impl ApprovedOrder for SandboxApproval {
    fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    async fn capture(&self) -> Result<CaptureReceipt, PaymentError> {
        tokio::time::sleep(self.latency).await;
        if self.decline {
            return Err(PaymentError::Declined(
                "sandbox card was declined".to_string(),
            ));
        }

        Ok(CaptureReceipt {
            order_id: self.order_id.clone(),
            capture_id: CaptureId::new(reference("CAP")),
            amount: self.amount,
            captured_at: Utc::now(),
            payer_name: Some("Sandbox Shopper".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxe_commerce::cart::Cart;
    use luxe_commerce::{Currency, StoreConfig};

    #[tokio::test]
    async fn test_create_order_issues_reference() {
        let widget = SandboxWidget::new(Duration::ZERO);
        let mut cart = Cart::new();
        cart.add("a", "Gel", 1200);
        let order = OrderDescriptor::from_cart(&cart, &StoreConfig::default());

        let handle = widget.create_order(&order).await.unwrap();
        assert!(handle.id.as_str().starts_with("SBX-"));
        assert_eq!(handle.id.as_str().len(), 16);
    }

    #[tokio::test]
    async fn test_capture_and_decline() {
        let amount = Money::new(1799, Currency::USD);
        let approval = SandboxApproval::new(OrderId::new("SBX-1"), amount, Duration::ZERO);
        let receipt = approval.capture().await.unwrap();
        assert_eq!(receipt.amount, amount);
        assert!(receipt.capture_id.as_str().starts_with("CAP-"));

        let declined =
            SandboxApproval::new(OrderId::new("SBX-2"), amount, Duration::ZERO).declined();
        assert!(matches!(
            declined.capture().await,
            Err(PaymentError::Declined(_))
        ));
    }
}
