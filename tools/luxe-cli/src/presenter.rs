//! Terminal presentation layer.
//!
//! Notifications print as they happen. Panel renders are buffered, since a
//! single command can trigger several; commands print the final panel once.

use luxe_commerce::cart::{CartItem, Totals};
use luxe_commerce::checkout::CheckoutControl;
use luxe_commerce::presentation::{Notification, NotificationKind, Presenter};

use crate::output::Output;

/// Last rendered cart panel.
#[derive(Debug, Clone)]
pub struct PanelView {
    pub items: Vec<CartItem>,
    pub totals: Totals,
}

pub struct TerminalPresenter {
    output: Output,
    panel: Option<PanelView>,
    badge: u64,
    control: CheckoutControl,
}

impl TerminalPresenter {
    pub fn new(output: Output) -> Self {
        Self {
            output,
            panel: None,
            badge: 0,
            control: CheckoutControl::Hidden,
        }
    }

    /// Print the buffered panel.
    pub fn print_panel(&self) {
        let Some(panel) = &self.panel else {
            return;
        };

        let currency = panel.totals.subtotal.currency;
        if self.output.is_json() {
            let items: Vec<_> = panel
                .items
                .iter()
                .map(|item| {
                    serde_json::json!({
                        "id": item.id,
                        "name": item.name,
                        "price": item.unit_price(currency).display_amount(),
                        "quantity": item.quantity,
                        "line_total": item.line_total(currency).display_amount(),
                    })
                })
                .collect();
            self.output.json(&serde_json::json!({
                "count": self.badge,
                "items": items,
                "subtotal": panel.totals.subtotal.display_amount(),
                "shipping": panel.totals.shipping.display_amount(),
                "total": panel.totals.total.display_amount(),
                "currency": panel.totals.total.currency.code(),
                "checkout": control_label(&self.control),
            }));
            return;
        }

        self.output.header(&format!("Cart ({})", self.badge));
        if panel.items.is_empty() {
            self.output.info("Your cart is empty.");
            return;
        }

        let rows: Vec<Vec<String>> = panel
            .items
            .iter()
            .map(|item| {
                vec![
                    item.id.to_string(),
                    item.name.clone(),
                    item.quantity.to_string(),
                    item.unit_price(currency).display(),
                    item.line_total(currency).display(),
                ]
            })
            .collect();
        self.output.table(
            &["ID", "NAME", "QTY", "PRICE", "LINE"],
            &rows,
            &[18, 28, 5, 10, 10],
        );

        let totals = &panel.totals;
        println!();
        self.output
            .totals(&totals.subtotal, &totals.shipping, &totals.total);
        self.output.kv("Checkout", control_label(&self.control));
    }
}

fn control_label(control: &CheckoutControl) -> &'static str {
    match control {
        CheckoutControl::Hidden => "hidden",
        CheckoutControl::ConfigurationNeeded => "payment widget not configured",
        CheckoutControl::Button(_) => "ready",
    }
}

impl Presenter for TerminalPresenter {
    fn render_cart_panel(&mut self, items: &[CartItem], totals: &Totals) {
        self.panel = Some(PanelView {
            items: items.to_vec(),
            totals: *totals,
        });
    }

    fn set_badge_count(&mut self, count: u64) {
        self.badge = count;
    }

    fn set_checkout_control(&mut self, control: &CheckoutControl) {
        self.control = *control;
    }

    fn show_notification(&mut self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => self.output.success(&notification.message),
            NotificationKind::Error => self.output.error(&notification.message),
            NotificationKind::Info => self.output.info(&notification.message),
        }
    }

    fn open_panel(&mut self) {
        self.output.debug("cart panel opened");
    }

    fn close_panel(&mut self) {
        self.output.debug("cart panel closed");
    }
}
