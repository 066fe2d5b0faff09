//! Presentation layer seam.
//!
//! The cart manager calls into a [`Presenter`] after every change and never
//! touches a UI toolkit directly.

use serde::{Deserialize, Serialize};

use crate::cart::{CartItem, Totals};
use crate::checkout::CheckoutControl;

/// Tone of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A short message shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }
}

/// Render hooks the cart manager drives.
pub trait Presenter: Send {
    /// Redraw the cart panel contents.
    fn render_cart_panel(&mut self, items: &[CartItem], totals: &Totals);

    /// Update the item-count badge.
    fn set_badge_count(&mut self, count: u64);

    /// Show, hide or replace the checkout control.
    fn set_checkout_control(&mut self, control: &CheckoutControl);

    /// Show a toast.
    fn show_notification(&mut self, notification: &Notification);

    /// Slide the cart panel open.
    fn open_panel(&mut self);

    /// Close the cart panel.
    fn close_panel(&mut self);
}
