//! Shipping courier catalog: Indonesian couriers and their service tiers.

use std::sync::LazyLock;

use serde::Serialize;

use nexu_core::Price;

/// A priced, named service tier offered by a courier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingOption {
    pub id: &'static str,
    pub name: &'static str,
    pub price: Price,
}

/// A delivery provider with one or more service tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingCourier {
    pub id: &'static str,
    pub name: &'static str,
    pub options: Vec<ShippingOption>,
}

impl ShippingCourier {
    /// Look up one of this courier's options by ID.
    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&ShippingOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

static COURIERS: LazyLock<Vec<ShippingCourier>> = LazyLock::new(|| {
    vec![
        ShippingCourier {
            id: "jne",
            name: "JNE",
            options: vec![
                ShippingOption {
                    id: "jne-reg",
                    name: "REG (2-3 days)",
                    price: Price::idr(22_000),
                },
                ShippingOption {
                    id: "jne-yes",
                    name: "YES (1-2 days)",
                    price: Price::idr(38_000),
                },
            ],
        },
        ShippingCourier {
            id: "j&t",
            name: "J&T Express",
            options: vec![
                ShippingOption {
                    id: "jt-reg",
                    name: "Regular (2-3 days)",
                    price: Price::idr(20_000),
                },
                ShippingOption {
                    id: "jt-fast",
                    name: "Fast (1-2 days)",
                    price: Price::idr(35_000),
                },
            ],
        },
        ShippingCourier {
            id: "sicepat",
            name: "SiCepat",
            options: vec![
                ShippingOption {
                    id: "sicepat-reg",
                    name: "REG (2-3 days)",
                    price: Price::idr(21_000),
                },
                ShippingOption {
                    id: "sicepat-best",
                    name: "BEST (1 day)",
                    price: Price::idr(40_000),
                },
            ],
        },
        ShippingCourier {
            id: "pos",
            name: "POS Indonesia",
            options: vec![
                ShippingOption {
                    id: "pos-biasa",
                    name: "Biasa (3-5 days)",
                    price: Price::idr(18_000),
                },
                ShippingOption {
                    id: "pos-kilat",
                    name: "Kilat (2-3 days)",
                    price: Price::idr(25_000),
                },
            ],
        },
    ]
});

/// All couriers, in display order.
#[must_use]
pub fn couriers() -> &'static [ShippingCourier] {
    &COURIERS
}

/// Look up a courier by ID.
#[must_use]
pub fn find_courier(courier_id: &str) -> Option<&'static ShippingCourier> {
    couriers().iter().find(|courier| courier.id == courier_id)
}

/// Resolve a (courier, option) pair, if the option belongs to that courier.
#[must_use]
pub fn shipping_option(courier_id: &str, option_id: &str) -> Option<&'static ShippingOption> {
    find_courier(courier_id)?.option(option_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_courier_has_priced_options() {
        assert_eq!(couriers().len(), 4);
        for courier in couriers() {
            assert!(!courier.options.is_empty());
            for option in &courier.options {
                assert!(option.price > Price::ZERO);
            }
        }
    }

    #[test]
    fn test_option_ids_are_unique_across_couriers() {
        let mut seen = std::collections::HashSet::new();
        for courier in couriers() {
            for option in &courier.options {
                assert!(seen.insert(option.id), "duplicate option id {}", option.id);
            }
        }
    }

    #[test]
    fn test_lookup_by_pair() {
        let option = shipping_option("jne", "jne-yes").unwrap();
        assert_eq!(option.price, Price::idr(38_000));

        // An option only resolves under its own courier.
        assert!(shipping_option("pos", "jne-yes").is_none());
        assert!(shipping_option("unknown", "jne-yes").is_none());
    }
}
