//! Payment method catalog: payment categories and their instruments.

use std::sync::LazyLock;

use serde::Serialize;

/// A concrete payment instrument.
///
/// Bank-transfer instruments carry the destination account used to render
/// manual payment instructions; e-wallet, virtual-account, and pay-later
/// instruments do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentOption {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<&'static str>,
}

/// A payment category with one or more instruments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMethod {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<PaymentOption>,
}

impl PaymentMethod {
    /// Look up one of this method's instruments by ID.
    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&PaymentOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

const BANK_ACCOUNT_NAME: &str = "PT NEXU INDONESIA";

static PAYMENT_METHODS: LazyLock<Vec<PaymentMethod>> = LazyLock::new(|| {
    vec![
        PaymentMethod {
            id: "bank-transfer",
            name: "Bank Transfer",
            description: "Manual verification (1x24 hours)",
            options: vec![
                PaymentOption {
                    id: "bca",
                    name: "BCA",
                    account_number: Some("0123456789"),
                    account_name: Some(BANK_ACCOUNT_NAME),
                },
                PaymentOption {
                    id: "mandiri",
                    name: "Mandiri",
                    account_number: Some("9876543210"),
                    account_name: Some(BANK_ACCOUNT_NAME),
                },
                PaymentOption {
                    id: "bni",
                    name: "BNI",
                    account_number: Some("0987654321"),
                    account_name: Some(BANK_ACCOUNT_NAME),
                },
            ],
        },
        PaymentMethod {
            id: "e-wallet",
            name: "E-Wallet",
            description: "Instant verification",
            options: vec![
                PaymentOption {
                    id: "gopay",
                    name: "GoPay",
                    account_number: None,
                    account_name: None,
                },
                PaymentOption {
                    id: "ovo",
                    name: "OVO",
                    account_number: None,
                    account_name: None,
                },
                PaymentOption {
                    id: "dana",
                    name: "DANA",
                    account_number: None,
                    account_name: None,
                },
                PaymentOption {
                    id: "linkaja",
                    name: "LinkAja",
                    account_number: None,
                    account_name: None,
                },
            ],
        },
        PaymentMethod {
            id: "virtual-account",
            name: "Virtual Account",
            description: "Automatic verification",
            options: vec![
                PaymentOption {
                    id: "va-bca",
                    name: "BCA Virtual Account",
                    account_number: None,
                    account_name: None,
                },
                PaymentOption {
                    id: "va-mandiri",
                    name: "Mandiri Virtual Account",
                    account_number: None,
                    account_name: None,
                },
                PaymentOption {
                    id: "va-bni",
                    name: "BNI Virtual Account",
                    account_number: None,
                    account_name: None,
                },
            ],
        },
        PaymentMethod {
            id: "paylater",
            name: "Pay Later",
            description: "Pay with credit",
            options: vec![
                PaymentOption {
                    id: "kredivo",
                    name: "Kredivo",
                    account_number: None,
                    account_name: None,
                },
                PaymentOption {
                    id: "akulaku",
                    name: "Akulaku",
                    account_number: None,
                    account_name: None,
                },
            ],
        },
    ]
});

/// All payment methods, in display order.
#[must_use]
pub fn payment_methods() -> &'static [PaymentMethod] {
    &PAYMENT_METHODS
}

/// Look up a payment method by ID.
#[must_use]
pub fn find_payment_method(method_id: &str) -> Option<&'static PaymentMethod> {
    payment_methods().iter().find(|method| method.id == method_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(payment_methods().len(), 4);
        for method in payment_methods() {
            assert!(!method.options.is_empty());
        }
    }

    #[test]
    fn test_only_bank_transfer_carries_account_metadata() {
        for method in payment_methods() {
            for option in &method.options {
                if method.id == "bank-transfer" {
                    assert!(option.account_number.is_some());
                    assert_eq!(option.account_name, Some("PT NEXU INDONESIA"));
                } else {
                    assert!(option.account_number.is_none());
                    assert!(option.account_name.is_none());
                }
            }
        }
    }

    #[test]
    fn test_lookup() {
        let method = find_payment_method("e-wallet").unwrap();
        assert!(method.option("dana").is_some());
        assert!(method.option("bca").is_none());
        assert!(find_payment_method("crypto").is_none());
    }
}
