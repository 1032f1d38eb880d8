//! Checkout wizard: the address -> shipping -> payment -> complete state
//! machine.
//!
//! Steps advance forward only when the current step's guard holds; backward
//! navigation is explicit and never discards entered data. The terminal
//! `Complete` step has no outgoing transitions - the user is expected to
//! navigate away.
//!
//! Completing the order generates a display order number and removes the
//! selected lines from the cart. No durable order record is created; see
//! [`order_history`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use nexu_core::{LineItemId, Price};

use crate::address::Address;
use crate::cart::{CartLineItem, CartStore};
use crate::catalog;
use crate::error::{CheckoutError, Result};
use crate::pricing::PriceBreakdown;
use crate::storage::{self, ClientStorage, keys};

/// Literal prefix of every generated order number.
pub const ORDER_NUMBER_PREFIX: &str = "ORD";

/// One stage of the checkout wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    Address,
    Shipping,
    Payment,
    Complete,
}

impl CheckoutStep {
    /// Stable string form, as persisted and displayed.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Shipping => "shipping",
            Self::Payment => "payment",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a completed order.
///
/// In-memory only: this system has no server-side order persistence, so the
/// snapshot exists for the completion screen and nothing else.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    /// `ORD` followed by nine random digits.
    pub number: String,
    pub placed_at: DateTime<Utc>,
    /// The selected lines, as they were at completion.
    pub items: Vec<CartLineItem>,
    pub breakdown: PriceBreakdown,
    pub address: Address,
    pub courier_id: String,
    pub shipping_option_id: String,
    pub payment_method_id: String,
    pub payment_option_id: String,
}

/// Order history for the current account.
///
/// Always empty: orders are never persisted anywhere in this system. This is
/// a documented limitation, kept explicit here rather than hidden behind a
/// stub endpoint.
#[must_use]
pub fn order_history() -> Vec<PlacedOrder> {
    Vec::new()
}

/// Generate a fresh order number: the literal prefix plus nine random
/// digits.
fn generate_order_number() -> String {
    let digits = rand::rng().random_range(100_000_000..1_000_000_000u64);
    format!("{ORDER_NUMBER_PREFIX}{digits}")
}

/// A single checkout attempt over the current cart.
///
/// Holds the wizard step, the selected-line subset, the address being
/// edited, and the shipping/payment selections. The address and the
/// selected-line IDs persist to client storage; the rest lives only as long
/// as the session.
#[derive(Debug)]
pub struct CheckoutSession<S> {
    storage: S,
    step: CheckoutStep,
    selected: BTreeSet<LineItemId>,
    address: Address,
    courier_id: String,
    shipping_option_id: String,
    payment_method_id: String,
    payment_option_id: String,
    order: Option<PlacedOrder>,
}

impl<S: ClientStorage> CheckoutSession<S> {
    /// Start checkout over the current cart.
    ///
    /// All cart lines start selected; a previously saved address is
    /// restored. The selection is written to the `checkoutItems` key as the
    /// cart -> checkout handoff.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::EmptyCart`] if the cart has no lines - the caller
    /// shows the empty-cart view instead of the wizard.
    pub fn begin<C: ClientStorage>(storage: S, cart: &CartStore<C>) -> Result<Self> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let selected: BTreeSet<LineItemId> = cart.items().iter().map(|item| item.id).collect();
        let address: Address =
            storage::read_json(&storage, keys::USER_ADDRESS).unwrap_or_default();
        let session = Self {
            storage,
            step: CheckoutStep::Address,
            selected,
            address,
            courier_id: String::new(),
            shipping_option_id: String::new(),
            payment_method_id: String::new(),
            payment_option_id: String::new(),
            order: None,
        };
        session.persist_selection()?;
        Ok(session)
    }

    /// Re-mount checkout mid-flow at a persisted step.
    ///
    /// Idempotent: the saved address and the persisted selection are
    /// restored (the selection pruned to lines still in the cart, defaulting
    /// to all lines), and the wizard renders at `step` without requiring
    /// re-entry.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::EmptyCart`] if the cart has no lines and the flow is
    /// not already complete.
    pub fn resume<C: ClientStorage>(
        storage: S,
        cart: &CartStore<C>,
        step: CheckoutStep,
    ) -> Result<Self> {
        if cart.is_empty() && step != CheckoutStep::Complete {
            return Err(CheckoutError::EmptyCart);
        }
        let in_cart: BTreeSet<LineItemId> = cart.items().iter().map(|item| item.id).collect();
        let selected = storage::read_json::<_, Vec<LineItemId>>(&storage, keys::CHECKOUT_ITEMS)
            .map_or_else(
                || in_cart.clone(),
                |saved| saved.into_iter().filter(|id| in_cart.contains(id)).collect(),
            );
        let address: Address =
            storage::read_json(&storage, keys::USER_ADDRESS).unwrap_or_default();
        Ok(Self {
            storage,
            step,
            selected,
            address,
            courier_id: String::new(),
            shipping_option_id: String::new(),
            payment_method_id: String::new(),
            payment_option_id: String::new(),
            order: None,
        })
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// Current wizard step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// The address being edited.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Mutable access to the address form.
    pub const fn address_mut(&mut self) -> &mut Address {
        &mut self.address
    }

    /// IDs of the lines included in this checkout.
    #[must_use]
    pub const fn selected(&self) -> &BTreeSet<LineItemId> {
        &self.selected
    }

    /// Selected courier ID, empty if none.
    #[must_use]
    pub fn courier_id(&self) -> &str {
        &self.courier_id
    }

    /// Selected shipping option ID, empty if none.
    #[must_use]
    pub fn shipping_option_id(&self) -> &str {
        &self.shipping_option_id
    }

    /// Selected payment method ID, empty if none.
    #[must_use]
    pub fn payment_method_id(&self) -> &str {
        &self.payment_method_id
    }

    /// Selected payment option ID, empty if none.
    #[must_use]
    pub fn payment_option_id(&self) -> &str {
        &self.payment_option_id
    }

    /// The placed order, present once the flow is complete.
    #[must_use]
    pub const fn order(&self) -> Option<&PlacedOrder> {
        self.order.as_ref()
    }

    /// The selected cart lines, in cart order.
    pub fn selected_items<'a, C: ClientStorage>(
        &'a self,
        cart: &'a CartStore<C>,
    ) -> impl Iterator<Item = &'a CartLineItem> {
        cart.items()
            .iter()
            .filter(|item| self.selected.contains(&item.id))
    }

    /// Current price breakdown over the selected lines.
    ///
    /// Computed fresh on every call; a cart mutation or selection change is
    /// reflected immediately.
    #[must_use]
    pub fn breakdown<C: ClientStorage>(&self, cart: &CartStore<C>) -> PriceBreakdown {
        let shipping = catalog::shipping_option(&self.courier_id, &self.shipping_option_id)
            .map(|option| option.price);
        PriceBreakdown::compute(self.selected_items(cart), shipping, Price::ZERO, Price::ZERO)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Include or exclude a cart line from this checkout.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the selection cannot be persisted.
    pub fn set_line_selected(&mut self, id: LineItemId, include: bool) -> Result<()> {
        if include {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
        self.persist_selection()
    }

    fn persist_selection(&self) -> Result<()> {
        let ids: Vec<LineItemId> = self.selected.iter().copied().collect();
        storage::write_json(&self.storage, keys::CHECKOUT_ITEMS, &ids)?;
        Ok(())
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// `address -> shipping`: save the address and advance.
    ///
    /// Persists the address to the `userAddress` key as a side effect of the
    /// transition.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::IncompleteAddress`] if any required field is empty;
    /// the step does not change.
    pub fn save_address(&mut self) -> Result<()> {
        self.ensure_not_complete()?;
        if !self.address.is_complete() {
            return Err(CheckoutError::IncompleteAddress);
        }
        storage::write_json(&self.storage, keys::USER_ADDRESS, &self.address)?;
        tracing::debug!("Address saved");
        self.step = CheckoutStep::Shipping;
        Ok(())
    }

    /// Select a courier, keeping the shipping option only if the new
    /// courier also offers it.
    ///
    /// Option IDs are namespaced per courier, so in practice every courier
    /// change resets the chosen option.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::UnknownCourier`] if the ID is not in the catalog.
    pub fn select_courier(&mut self, courier_id: &str) -> Result<()> {
        let courier = catalog::find_courier(courier_id)
            .ok_or_else(|| CheckoutError::UnknownCourier(courier_id.to_string()))?;
        if courier.option(&self.shipping_option_id).is_none() {
            self.shipping_option_id.clear();
        }
        self.courier_id = courier.id.to_string();
        Ok(())
    }

    /// Select a courier and one of its shipping options.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::UnknownCourier`] or
    /// [`CheckoutError::UnknownShippingOption`] if the pair is not in the
    /// catalog.
    pub fn select_shipping(&mut self, courier_id: &str, option_id: &str) -> Result<()> {
        let courier = catalog::find_courier(courier_id)
            .ok_or_else(|| CheckoutError::UnknownCourier(courier_id.to_string()))?;
        let option =
            courier
                .option(option_id)
                .ok_or_else(|| CheckoutError::UnknownShippingOption {
                    courier: courier_id.to_string(),
                    option: option_id.to_string(),
                })?;
        self.courier_id = courier.id.to_string();
        self.shipping_option_id = option.id.to_string();
        Ok(())
    }

    /// `shipping -> payment`.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::ShippingNotSelected`] if no shipping option is
    /// chosen; the step does not change.
    pub fn proceed_to_payment(&mut self) -> Result<()> {
        self.ensure_not_complete()?;
        if self.shipping_option_id.is_empty() {
            return Err(CheckoutError::ShippingNotSelected);
        }
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Select a payment method and one of its options.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::UnknownPaymentMethod`] or
    /// [`CheckoutError::UnknownPaymentOption`] if the pair is not in the
    /// catalog.
    pub fn select_payment(&mut self, method_id: &str, option_id: &str) -> Result<()> {
        let method = catalog::find_payment_method(method_id)
            .ok_or_else(|| CheckoutError::UnknownPaymentMethod(method_id.to_string()))?;
        let option =
            method
                .option(option_id)
                .ok_or_else(|| CheckoutError::UnknownPaymentOption {
                    method: method_id.to_string(),
                    option: option_id.to_string(),
                })?;
        self.payment_method_id = method.id.to_string();
        self.payment_option_id = option.id.to_string();
        Ok(())
    }

    /// Step back one stage without discarding entered data.
    ///
    /// From `address` this is a no-op (the UI navigates back to the cart).
    ///
    /// # Errors
    ///
    /// [`CheckoutError::AlreadyComplete`] from the terminal step.
    pub fn back(&mut self) -> Result<()> {
        self.step = match self.step {
            CheckoutStep::Address | CheckoutStep::Shipping => CheckoutStep::Address,
            CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Complete => return Err(CheckoutError::AlreadyComplete),
        };
        Ok(())
    }

    /// Jump back to the address step from the order summary's edit action.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::AlreadyComplete`] from the terminal step.
    pub fn edit_address(&mut self) -> Result<()> {
        self.ensure_not_complete()?;
        self.step = CheckoutStep::Address;
        Ok(())
    }

    /// Jump back to the shipping step from the order summary's edit action.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::AlreadyComplete`] from the terminal step.
    pub fn edit_shipping(&mut self) -> Result<()> {
        self.ensure_not_complete()?;
        self.step = CheckoutStep::Shipping;
        Ok(())
    }

    /// `payment -> complete`: finalize the order.
    ///
    /// Generates the order number, snapshots the selected lines and their
    /// breakdown, removes exactly those lines from the cart (one persist,
    /// one cart-changed notification), and clears the checkout handoff key.
    /// Unselected lines stay in the cart untouched.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::PaymentNotSelected`] if no payment option is chosen;
    /// the step stays at `payment` and no order number is produced.
    /// [`CheckoutError::EmptyCart`] if no selected line remains in the cart.
    pub fn complete<C: ClientStorage>(&mut self, cart: &mut CartStore<C>) -> Result<&PlacedOrder> {
        self.ensure_not_complete()?;
        if self.payment_option_id.is_empty() {
            return Err(CheckoutError::PaymentNotSelected);
        }
        let items: Vec<CartLineItem> = self.selected_items(cart).cloned().collect();
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let breakdown = self.breakdown(cart);
        let number = generate_order_number();
        tracing::info!(order = %number, lines = items.len(), "Order placed");

        let ids: Vec<LineItemId> = items.iter().map(|item| item.id).collect();
        cart.remove_many(&ids)?;
        self.storage.remove(keys::CHECKOUT_ITEMS)?;

        self.step = CheckoutStep::Complete;
        Ok(self.order.insert(PlacedOrder {
            number,
            placed_at: Utc::now(),
            items,
            breakdown,
            address: self.address.clone(),
            courier_id: self.courier_id.clone(),
            shipping_option_id: self.shipping_option_id.clone(),
            payment_method_id: self.payment_method_id.clone(),
            payment_option_id: self.payment_option_id.clone(),
        }))
    }

    fn ensure_not_complete(&self) -> Result<()> {
        if matches!(self.step, CheckoutStep::Complete) {
            return Err(CheckoutError::AlreadyComplete);
        }
        Ok(())
    }
}
