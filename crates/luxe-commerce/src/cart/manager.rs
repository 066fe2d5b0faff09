//! Cart manager.
//!
//! Owns the authoritative cart, mirrors it to durable storage after every
//! mutation, and keeps the presentation layer and checkout control in sync.

use std::sync::Arc;

use luxe_cache::{Cache, KeyValueStore};
use tracing::{debug, info, warn};

use crate::cart::{Cart, QuantityChange, StoredLine, Totals};
use crate::checkout::{
    self, ApprovedOrder, CheckoutControl, CheckoutEvent, CheckoutStatus, OrderDescriptor,
    OrderHandle, PaymentError, PaymentWidget,
};
use crate::config::StoreConfig;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::presentation::{Notification, Presenter};

const PAYMENT_SUCCESS: &str = "Payment complete! Thank you for your order.";
const PAYMENT_FAILED: &str = "Payment failed. Your cart has been kept so you can try again.";
const PAYMENT_CANCELLED: &str = "Checkout cancelled.";

/// Stateful cart controller.
///
/// Every mutation follows the same order: change the in-memory cart,
/// write it through to storage, then render. Storage failures are logged
/// and never surface to the caller; the in-memory cart stays the working
/// copy for the session.
pub struct CartManager<S, P> {
    cart: Cart,
    config: StoreConfig,
    cache: Cache<S>,
    presenter: P,
    widget: Option<Arc<dyn PaymentWidget>>,
    panel_open: bool,
}

impl<S: KeyValueStore, P: Presenter> CartManager<S, P> {
    /// Load the persisted cart and render the initial state.
    ///
    /// Missing, unreadable or invalid data yields an empty cart.
    pub fn load(
        config: StoreConfig,
        store: S,
        presenter: P,
        widget: Option<Arc<dyn PaymentWidget>>,
    ) -> Self {
        let cache = Cache::new(store);
        let stored = cache
            .get::<Vec<StoredLine>>(&config.storage_key)
            .map_err(CommerceError::from)
            .and_then(|lines| {
                lines
                    .map(|lines| Cart::from_stored(lines, config.currency))
                    .transpose()
            });
        let cart = match stored {
            Ok(Some(cart)) => {
                debug!(key = %config.storage_key, items = cart.len(), "cart loaded");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %config.storage_key, error = %e, "discarding unreadable cart");
                Cart::new()
            }
        };

        if widget.is_none() {
            warn!("no payment widget configured; checkout disabled");
        }

        let mut manager = Self {
            cart,
            config,
            cache,
            presenter,
            widget,
            panel_open: false,
        };
        manager.render();
        manager
    }

    /// Add one unit of a product and open the panel.
    ///
    /// The price is trusted as given. Adding an existing product keeps the
    /// price it was first added at.
    pub fn add(&mut self, id: impl Into<ProductId>, name: impl Into<String>, price: Money) {
        let id = id.into();
        let name = name.into();
        if price.currency != self.config.currency {
            warn!(
                %id,
                expected = self.config.currency.code(),
                got = price.currency.code(),
                "price currency differs from store currency; using amount as-is"
            );
        }

        let quantity = self.cart.add(id.clone(), name.clone(), price.amount_cents);
        debug!(%id, quantity, "item added");

        self.persist();
        self.render();
        self.presenter
            .show_notification(&Notification::success(format!("{} added to cart", name)));
        self.open_panel();
    }

    /// Remove a product's line. Unknown IDs are ignored.
    pub fn remove(&mut self, id: &ProductId) {
        let removed = self.cart.remove(id);
        debug!(%id, removed, "item removed");

        self.persist();
        self.render();
    }

    /// Change a line's quantity by `delta`; at zero or below the line is removed.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> QuantityChange {
        let change = self.cart.update_quantity(id, delta);
        debug!(%id, delta, ?change, "quantity updated");

        self.persist();
        self.render();
        change
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        debug!("cart cleared");

        self.persist();
        self.render();
    }

    /// Current totals.
    pub fn compute_totals(&self) -> Totals {
        self.cart.totals(&self.config)
    }

    /// Total units in the cart.
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    /// Snapshot of the cart for the payment widget.
    pub fn order_descriptor(&self) -> OrderDescriptor {
        OrderDescriptor::from_cart(&self.cart, &self.config)
    }

    /// Order-creation hook for the payment widget.
    pub async fn create_order(&self) -> Result<OrderHandle, PaymentError> {
        let widget = self.widget.clone().ok_or(PaymentError::Unavailable)?;
        if self.cart.is_empty() {
            return Err(PaymentError::EmptyCart);
        }

        let order = self.order_descriptor();
        debug!(
            provider = widget.name(),
            total = %order.total,
            items = order.item_count(),
            "creating order"
        );
        let handle = widget.create_order(&order).await?;
        info!(provider = widget.name(), order_id = %handle.id, "order created");
        Ok(handle)
    }

    /// Approval callback: capture, then apply the outcome.
    pub async fn on_approve(&mut self, approval: &dyn ApprovedOrder) -> CheckoutStatus {
        let event = checkout::capture(approval).await;
        self.apply_checkout_event(event)
    }

    /// Error callback from the widget.
    pub fn on_error(&mut self, error: PaymentError) -> CheckoutStatus {
        self.apply_checkout_event(CheckoutEvent::Failed(error))
    }

    /// Cancel callback from the widget.
    pub fn on_cancel(&mut self) -> CheckoutStatus {
        self.apply_checkout_event(CheckoutEvent::Cancelled)
    }

    /// Apply a terminal checkout outcome.
    ///
    /// Applied whatever the panel state: a capture that lands after the
    /// panel was closed still clears the cart.
    pub fn apply_checkout_event(&mut self, event: CheckoutEvent) -> CheckoutStatus {
        let status = event.status();
        match event {
            CheckoutEvent::Captured(receipt) => {
                info!(
                    order_id = %receipt.order_id,
                    capture_id = %receipt.capture_id,
                    "checkout completed"
                );
                self.close_panel();
                self.presenter
                    .show_notification(&Notification::success(PAYMENT_SUCCESS));
                self.clear();
            }
            CheckoutEvent::Failed(error) => {
                warn!(error = %error, items = self.cart.len(), "checkout failed; cart kept");
                self.presenter
                    .show_notification(&Notification::error(PAYMENT_FAILED));
            }
            CheckoutEvent::Cancelled => {
                info!("checkout cancelled");
                self.presenter
                    .show_notification(&Notification::info(PAYMENT_CANCELLED));
            }
        }
        status
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
        self.presenter.open_panel();
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
        self.presenter.close_panel();
    }

    /// Flip the panel and return whether it is now open.
    pub fn toggle_panel(&mut self) -> bool {
        if self.panel_open {
            self.close_panel();
        } else {
            self.open_panel();
        }
        self.panel_open
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// What belongs where the checkout button goes.
    pub fn checkout_control(&self) -> CheckoutControl {
        if self.cart.is_empty() {
            CheckoutControl::Hidden
        } else if self.widget.is_none() {
            CheckoutControl::ConfigurationNeeded
        } else {
            CheckoutControl::Button(self.config.button)
        }
    }

    /// Push the current state to the presenter and widget.
    pub fn render(&mut self) {
        let totals = self.compute_totals();
        self.presenter.render_cart_panel(self.cart.items(), &totals);
        self.presenter.set_badge_count(self.cart.count());

        let control = self.checkout_control();
        self.presenter.set_checkout_control(&control);
        if let (CheckoutControl::Button(style), Some(widget)) = (&control, &self.widget) {
            widget.render_button(style);
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn has_widget(&self) -> bool {
        self.widget.is_some()
    }

    fn persist(&self) {
        let lines = self.cart.to_stored(self.config.currency);
        if let Err(e) = self.cache.set(&self.config.storage_key, &lines) {
            warn!(key = %self.config.storage_key, error = %e, "failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::presentation::NotificationKind;
    use crate::testkit::{FailingStore, RecordingPresenter, StubWidget};
    use luxe_cache::MemoryStore;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn manager(
        store: Arc<MemoryStore>,
    ) -> (CartManager<Arc<MemoryStore>, RecordingPresenter>, RecordingPresenter) {
        let presenter = RecordingPresenter::new();
        let widget: Arc<dyn PaymentWidget> = Arc::new(StubWidget::new());
        let manager = CartManager::load(
            StoreConfig::default(),
            store,
            presenter.clone(),
            Some(widget),
        );
        (manager, presenter)
    }

    #[test]
    fn test_load_renders_empty_cart() {
        let (manager, presenter) = manager(Arc::new(MemoryStore::new()));
        assert!(manager.cart().is_empty());

        let log = presenter.log();
        let log = log.lock().unwrap();
        assert_eq!(log.renders.len(), 1);
        assert_eq!(log.last_badge(), Some(0));
        assert_eq!(log.last_control(), Some(&CheckoutControl::Hidden));
    }

    #[test]
    fn test_add_persists_before_render() {
        let store = Arc::new(MemoryStore::new());
        let (mut manager, presenter) = manager(Arc::clone(&store));

        manager.add("sku1", "Red Gel", usd(1200));

        let lines: Vec<StoredLine> = Cache::new(Arc::clone(&store))
            .get("luxe-nails:cart")
            .unwrap()
            .unwrap();
        let persisted = Cart::from_stored(lines, Currency::USD).unwrap();
        assert_eq!(&persisted, manager.cart());

        let log = presenter.log();
        let log = log.lock().unwrap();
        assert_eq!(log.last_badge(), Some(1));
        assert_eq!(log.panel_opens, 1);
        assert_eq!(
            log.notifications_of(NotificationKind::Success)[0].message,
            "Red Gel added to cart"
        );
        assert!(manager.is_panel_open());
    }

    #[test]
    fn test_failing_store_keeps_in_memory_cart() {
        let presenter = RecordingPresenter::new();
        let mut manager =
            CartManager::load(StoreConfig::default(), FailingStore, presenter.clone(), None);

        manager.add("sku1", "Red Gel", usd(1200));
        manager.update_quantity(&ProductId::new("sku1"), 2);

        assert_eq!(manager.count(), 3);
        assert_eq!(presenter.log().lock().unwrap().last_badge(), Some(3));
    }

    #[test]
    fn test_toggle_panel() {
        let (mut manager, presenter) = manager(Arc::new(MemoryStore::new()));
        assert!(manager.toggle_panel());
        assert!(!manager.toggle_panel());

        let log = presenter.log();
        let log = log.lock().unwrap();
        assert_eq!(log.panel_opens, 1);
        assert_eq!(log.panel_closes, 1);
    }

    #[test]
    fn test_checkout_control_without_widget() {
        let presenter = RecordingPresenter::new();
        let mut manager = CartManager::load(
            StoreConfig::default(),
            MemoryStore::new(),
            presenter.clone(),
            None,
        );
        assert_eq!(manager.checkout_control(), CheckoutControl::Hidden);

        manager.add("sku1", "Red Gel", usd(1200));
        assert_eq!(
            manager.checkout_control(),
            CheckoutControl::ConfigurationNeeded
        );
    }

    #[test]
    fn test_foreign_currency_price_uses_amount() {
        let (mut manager, _) = manager(Arc::new(MemoryStore::new()));
        manager.add("sku1", "Red Gel", Money::new(1500, Currency::EUR));

        let item = manager.cart().get(&ProductId::new("sku1")).unwrap();
        assert_eq!(item.price_cents, 1500);
    }
}
