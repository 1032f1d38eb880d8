//! Integration tests for the Nexu checkout core.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nexu-integration-tests
//! ```
//!
//! Everything runs in-process: storage is in-memory or a temp directory, and
//! the regional directory service is a local mock server. No credentials or
//! external services are required.
//!
//! # Test Categories
//!
//! - `checkout_flow` - full cart-to-completion wizard scenarios
//! - `regional_cascade` - cascading address selection against a mock
//!   directory service

use std::collections::BTreeMap;
use std::sync::Once;

use nexu_checkout::address::Address;
use nexu_checkout::cart::NewLineItem;
use nexu_core::{Price, ProductId};

/// Initialize tracing once for the whole test binary.
///
/// Honors `RUST_LOG`; silent by default.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// A cart line fixture with the given product, price, and quantity.
#[must_use]
pub fn line_item(product: i64, name: &str, price: i64, quantity: u32) -> NewLineItem {
    NewLineItem {
        product_id: ProductId::new(product),
        name: name.to_string(),
        unit_price: Price::idr(price),
        image: format!("/images/{name}.jpg"),
        quantity,
        options: BTreeMap::new(),
        seller_name: "Toko Maju".to_string(),
        seller_slug: "toko-maju".to_string(),
        category: Some("fashion".to_string()),
    }
}

/// An address with every required field filled in.
#[must_use]
pub fn complete_address() -> Address {
    Address {
        full_name: "Budi Santoso".to_string(),
        phone_number: "081234567890".to_string(),
        village: "Menteng".to_string(),
        district: "Menteng".to_string(),
        city: "Jakarta Pusat".to_string(),
        province: "DKI Jakarta".to_string(),
        postal_code: "10310".to_string(),
        ..Address::default()
    }
}
