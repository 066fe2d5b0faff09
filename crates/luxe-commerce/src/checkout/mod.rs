//! Checkout module.
//!
//! Contains the shipping rule, the order descriptor handed to the payment
//! widget, the widget capability traits and the checkout event flow.

mod flow;
mod order;
mod payment;
mod shipping;

pub use flow::{capture, CheckoutControl, CheckoutEvent, CheckoutStatus};
pub use order::{OrderDescriptor, OrderLine};
pub use payment::{
    ApprovedOrder, ButtonColor, ButtonLabel, ButtonLayout, ButtonShape, ButtonStyle,
    CaptureReceipt, OrderHandle, PaymentError, PaymentWidget,
};
pub use shipping::ShippingPolicy;
