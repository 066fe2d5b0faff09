//! Test doubles for the cart manager's collaborators.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use luxe_cache::{CacheError, KeyValueStore};

use crate::cart::{CartItem, Totals};
use crate::checkout::{
    ApprovedOrder, ButtonStyle, CaptureReceipt, CheckoutControl, OrderDescriptor, OrderHandle,
    PaymentError, PaymentWidget,
};
use crate::ids::{CaptureId, OrderId};
use crate::money::{Currency, Money};
use crate::presentation::{Notification, NotificationKind, Presenter};

/// Everything a [`RecordingPresenter`] has been asked to do.
#[derive(Debug, Default)]
pub struct PresenterLog {
    /// Items passed to each render, most recent last.
    pub renders: Vec<(Vec<CartItem>, Totals)>,
    pub badge_counts: Vec<u64>,
    pub controls: Vec<CheckoutControl>,
    pub notifications: Vec<Notification>,
    pub panel_opens: usize,
    pub panel_closes: usize,
}

impl PresenterLog {
    /// Notifications of one kind.
    pub fn notifications_of(&self, kind: NotificationKind) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| n.kind == kind).collect()
    }

    pub fn last_control(&self) -> Option<&CheckoutControl> {
        self.controls.last()
    }

    pub fn last_badge(&self) -> Option<u64> {
        self.badge_counts.last().copied()
    }
}

/// Presenter that records every call into a shared log.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    log: Arc<Mutex<PresenterLog>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the log; stays valid after the presenter moves into a manager.
    pub fn log(&self) -> Arc<Mutex<PresenterLog>> {
        Arc::clone(&self.log)
    }

    fn record(&self, f: impl FnOnce(&mut PresenterLog)) {
        if let Ok(mut log) = self.log.lock() {
            f(&mut *log);
        }
    }
}

impl Presenter for RecordingPresenter {
    fn render_cart_panel(&mut self, items: &[CartItem], totals: &Totals) {
        self.record(|log| log.renders.push((items.to_vec(), *totals)));
    }

    fn set_badge_count(&mut self, count: u64) {
        self.record(|log| log.badge_counts.push(count));
    }

    fn set_checkout_control(&mut self, control: &CheckoutControl) {
        self.record(|log| log.controls.push(*control));
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.record(|log| log.notifications.push(notification.clone()));
    }

    fn open_panel(&mut self) {
        self.record(|log| log.panel_opens += 1);
    }

    fn close_panel(&mut self) {
        self.record(|log| log.panel_closes += 1);
    }
}

/// Payment widget double that records button renders and created orders.
#[derive(Debug, Default)]
pub struct StubWidget {
    pub button_renders: AtomicUsize,
    pub orders: Mutex<Vec<OrderDescriptor>>,
    /// When set, `create_order` fails with this error.
    pub create_error: Option<PaymentError>,
}

impl StubWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: PaymentError) -> Self {
        Self {
            create_error: Some(error),
            ..Self::default()
        }
    }

    pub fn button_render_count(&self) -> usize {
        self.button_renders.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentWidget for StubWidget {
    fn name(&self) -> &str {
        "stub"
    }

    fn render_button(&self, _style: &ButtonStyle) {
        self.button_renders.fetch_add(1, Ordering::SeqCst);
    }

    async fn create_order(&self, order: &OrderDescriptor) -> Result<OrderHandle, PaymentError> {
        if let Some(error) = &self.create_error {
            return Err(error.clone());
        }
        let mut orders = self
            .orders
            .lock()
            .map_err(|e| PaymentError::Provider(e.to_string()))?;
        orders.push(order.clone());
        Ok(OrderHandle::new(format!("ORDER-{}", orders.len())))
    }
}

/// Approved order whose capture resolves to a scripted result.
#[derive(Debug)]
pub struct StubApproval {
    pub order_id: OrderId,
    pub amount: Money,
    pub result: Result<(), PaymentError>,
}

impl StubApproval {
    pub fn succeeding(order_id: &str, amount_cents: i64) -> Self {
        Self {
            order_id: OrderId::new(order_id),
            amount: Money::new(amount_cents, Currency::USD),
            result: Ok(()),
        }
    }

    pub fn failing(order_id: &str, error: PaymentError) -> Self {
        Self {
            order_id: OrderId::new(order_id),
            amount: Money::zero(Currency::USD),
            result: Err(error),
        }
    }
}

#[async_trait]
impl ApprovedOrder for StubApproval {
    fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    async fn capture(&self) -> Result<CaptureReceipt, PaymentError> {
        self.result.clone()?;
        Ok(CaptureReceipt {
            order_id: self.order_id.clone(),
            capture_id: CaptureId::new(format!("CAP-{}", self.order_id)),
            amount: self.amount,
            captured_at: Utc::now(),
            payer_name: Some("Test Shopper".to_string()),
        })
    }
}

/// Store whose every operation fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Err(CacheError::StoreError("storage unavailable".to_string()))
    }

    fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
        Err(CacheError::StoreError("quota exceeded".to_string()))
    }

    fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::StoreError("storage unavailable".to_string()))
    }
}
