//! Checkout callbacks driven through the cart manager.

use std::sync::Arc;

use luxe_cache::{Cache, MemoryStore};
use luxe_commerce::checkout;
use luxe_commerce::prelude::*;
use luxe_commerce::testkit::{RecordingPresenter, StubApproval, StubWidget};

type Manager = CartManager<Arc<MemoryStore>, RecordingPresenter>;

struct Harness {
    manager: Manager,
    presenter: RecordingPresenter,
    widget: Arc<StubWidget>,
    store: Arc<MemoryStore>,
}

fn harness_with(widget: StubWidget) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let widget = Arc::new(widget);
    let presenter = RecordingPresenter::new();
    let dyn_widget: Arc<dyn PaymentWidget> = widget.clone();
    let mut manager = CartManager::load(
        StoreConfig::default(),
        Arc::clone(&store),
        presenter.clone(),
        Some(dyn_widget),
    );
    manager.add("sku1", "Red Gel", Money::new(1200, Currency::USD));
    manager.add("sku2", "Cuticle Oil", Money::new(850, Currency::USD));

    Harness {
        manager,
        presenter,
        widget,
        store,
    }
}

fn harness() -> Harness {
    harness_with(StubWidget::new())
}

fn persisted(store: &Arc<MemoryStore>) -> Cart {
    let lines: Vec<StoredLine> = Cache::new(Arc::clone(store))
        .get("luxe-nails:cart")
        .unwrap()
        .unwrap_or_default();
    Cart::from_stored(lines, Currency::USD).unwrap()
}

#[tokio::test]
async fn create_order_hands_current_cart_to_widget() {
    let h = harness();

    let handle = h.manager.create_order().await.unwrap();
    assert_eq!(handle.id.as_str(), "ORDER-1");

    let orders = h.widget.orders.lock().unwrap();
    let order = &orders[0];
    assert_eq!(order.subtotal.amount_cents, 2050);
    assert_eq!(order.shipping.amount_cents, 599);
    assert_eq!(order.total.amount_cents, 2649);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.store_name, "Luxe Nails");
}

#[tokio::test]
async fn create_order_reflects_latest_mutation() {
    let mut h = harness();
    h.manager.update_quantity(&ProductId::new("sku1"), 3);

    h.manager.create_order().await.unwrap();

    let orders = h.widget.orders.lock().unwrap();
    assert_eq!(orders[0].items[0].quantity, 4);
    assert_eq!(orders[0].subtotal.amount_cents, 4 * 1200 + 850);
}

#[tokio::test]
async fn approval_clears_cart_and_notifies_once() {
    let mut h = harness();
    let closes_before = h.presenter.log().lock().unwrap().panel_closes;

    let status = h
        .manager
        .on_approve(&StubApproval::succeeding("ORDER-1", 2649))
        .await;

    assert_eq!(status, CheckoutStatus::Completed);
    assert!(h.manager.cart().is_empty());
    assert!(persisted(&h.store).is_empty());
    assert!(!h.manager.is_panel_open());

    let log = h.presenter.log();
    let log = log.lock().unwrap();
    let successes: Vec<_> = log
        .notifications_of(NotificationKind::Success)
        .into_iter()
        .filter(|n| n.message.starts_with("Payment complete"))
        .collect();
    assert_eq!(successes.len(), 1);
    assert_eq!(log.panel_closes, closes_before + 1);
    assert_eq!(log.last_badge(), Some(0));
    assert_eq!(log.last_control(), Some(&CheckoutControl::Hidden));
}

#[tokio::test]
async fn failed_capture_keeps_cart() {
    let mut h = harness();
    let before = h.manager.cart().clone();

    let approval = StubApproval::failing("ORDER-1", PaymentError::Declined("card expired".into()));
    let status = h.manager.on_approve(&approval).await;

    assert_eq!(status, CheckoutStatus::Failed);
    assert_eq!(h.manager.cart(), &before);
    assert_eq!(persisted(&h.store), before);
    assert!(h.manager.is_panel_open());
}

#[test]
fn error_callback_keeps_cart_and_panel() {
    let mut h = harness();
    let before = h.manager.cart().clone();
    let closes_before = h.presenter.log().lock().unwrap().panel_closes;

    let status = h
        .manager
        .on_error(PaymentError::Network("connection reset".into()));

    assert_eq!(status, CheckoutStatus::Failed);
    assert_eq!(h.manager.cart(), &before);

    let log = h.presenter.log();
    let log = log.lock().unwrap();
    assert_eq!(log.notifications_of(NotificationKind::Error).len(), 1);
    assert_eq!(log.panel_closes, closes_before);
}

#[test]
fn cancel_is_neutral() {
    let mut h = harness();
    let before = h.manager.cart().clone();

    assert_eq!(h.manager.on_cancel(), CheckoutStatus::Cancelled);
    assert_eq!(h.manager.cart(), &before);

    let log = h.presenter.log();
    let log = log.lock().unwrap();
    assert_eq!(log.notifications_of(NotificationKind::Info).len(), 1);
    assert!(log.notifications_of(NotificationKind::Error).is_empty());
}

#[tokio::test]
async fn capture_after_panel_closed_still_completes() {
    let mut h = harness();
    let approval = StubApproval::succeeding("ORDER-9", 2649);

    let event = checkout::capture(&approval).await;
    h.manager.close_panel();
    h.manager.add("sku3", "Top Coat", Money::new(900, Currency::USD));
    h.manager.close_panel();
    assert!(!h.manager.is_panel_open());

    let status = h.manager.apply_checkout_event(event);

    assert_eq!(status, CheckoutStatus::Completed);
    assert!(h.manager.cart().is_empty());
    let log = h.presenter.log();
    let log = log.lock().unwrap();
    let completions = log
        .notifications
        .iter()
        .filter(|n| n.message.starts_with("Payment complete"))
        .count();
    assert_eq!(completions, 1);
}

#[tokio::test]
async fn empty_cart_cannot_create_order() {
    let mut h = harness();
    h.manager.clear();

    assert_eq!(
        h.manager.create_order().await,
        Err(PaymentError::EmptyCart)
    );
    assert!(h.widget.orders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn widget_errors_propagate_from_create_order() {
    let h = harness_with(StubWidget::failing(PaymentError::Provider(
        "sandbox offline".into(),
    )));

    assert_eq!(
        h.manager.create_order().await,
        Err(PaymentError::Provider("sandbox offline".into()))
    );
}

#[tokio::test]
async fn no_widget_shows_configuration_notice() {
    let presenter = RecordingPresenter::new();
    let mut manager = CartManager::load(
        StoreConfig::default(),
        MemoryStore::new(),
        presenter.clone(),
        None,
    );
    manager.add("sku1", "Red Gel", Money::new(1200, Currency::USD));

    assert_eq!(manager.create_order().await, Err(PaymentError::Unavailable));
    assert_eq!(
        presenter.log().lock().unwrap().last_control(),
        Some(&CheckoutControl::ConfigurationNeeded)
    );
}

#[test]
fn button_rendered_only_with_items() {
    let h = harness();
    let renders_with_items = h.widget.button_render_count();
    assert!(renders_with_items >= 2);

    let mut h = h;
    h.manager.clear();
    assert_eq!(h.widget.button_render_count(), renders_with_items);
}
