//! Unified error type for the checkout flow.
//!
//! Guard failures are *validation* errors: they are recovered locally, shown
//! to the user as an inline or toast message, and leave the flow state
//! unchanged. Their `Display` text is the user-facing message.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by checkout transitions and selections.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout entered with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The address step's completeness predicate does not hold.
    #[error("Please complete your shipping address")]
    IncompleteAddress,

    /// `shipping -> payment` attempted without a shipping option.
    #[error("Please select a shipping method")]
    ShippingNotSelected,

    /// `payment -> complete` attempted without a payment option.
    #[error("Please select a payment method")]
    PaymentNotSelected,

    /// Courier ID not present in the shipping catalog.
    #[error("Unknown shipping courier: {0}")]
    UnknownCourier(String),

    /// Shipping option not offered by the selected courier.
    #[error("Courier {courier} has no shipping option {option}")]
    UnknownShippingOption { courier: String, option: String },

    /// Payment method ID not present in the payment catalog.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Payment option not offered by the selected payment method.
    #[error("Payment method {method} has no option {option}")]
    UnknownPaymentOption { method: String, option: String },

    /// Transition attempted after the order was placed.
    #[error("This order has already been completed")]
    AlreadyComplete,

    /// Persisting state to client storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `CheckoutError`.
pub type Result<T> = std::result::Result<T, CheckoutError>;
