//! Static shipping and payment catalogs.
//!
//! Both catalogs are read-only reference data, enumerable at runtime and
//! never user-mutable. Option IDs are namespaced per courier / per payment
//! method, so an option ID alone identifies its parent too.

mod payment;
mod shipping;

pub use payment::{PaymentMethod, PaymentOption, find_payment_method, payment_methods};
pub use shipping::{ShippingCourier, ShippingOption, couriers, find_courier, shipping_option};
