//! Price breakdown calculator.
//!
//! A breakdown is a pure function of the selected line items and the chosen
//! shipping option. It is recomputed on demand wherever it is shown; nothing
//! here caches a total across a cart mutation.

use serde::Serialize;

use nexu_core::Price;

use crate::cart::CartLineItem;

/// Derived price summary for a set of selected cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Sum of `unit_price * quantity` over the selected lines.
    pub subtotal: Price,
    /// Price of the selected shipping option, or zero if none selected.
    pub shipping_cost: Price,
    /// Always zero: no promotion engine exists in this system.
    pub discount: Price,
    /// Always zero: no tax engine exists in this system.
    pub tax: Price,
    /// `subtotal - discount + tax + shipping_cost`.
    pub total: Price,
}

impl PriceBreakdown {
    /// Compute a breakdown over `items` with the given adjustments.
    pub fn compute<'a>(
        items: impl IntoIterator<Item = &'a CartLineItem>,
        shipping_cost: Option<Price>,
        discount: Price,
        tax: Price,
    ) -> Self {
        let subtotal: Price = items.into_iter().map(CartLineItem::line_total).sum();
        let shipping_cost = shipping_cost.unwrap_or(Price::ZERO);
        Self {
            subtotal,
            shipping_cost,
            discount,
            tax,
            total: subtotal - discount + tax + shipping_cost,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use nexu_core::{LineItemId, ProductId};

    use super::*;

    fn line(price: i64, quantity: u32) -> CartLineItem {
        CartLineItem {
            id: LineItemId::generate(),
            product_id: ProductId::new(1),
            name: "item".to_string(),
            unit_price: Price::idr(price),
            image: String::new(),
            quantity,
            options: BTreeMap::new(),
            seller_name: String::new(),
            seller_slug: String::new(),
            category: None,
        }
    }

    #[test]
    fn test_subtotal_sums_selected_lines_only() {
        let items = [line(100_000, 2), line(50_000, 1)];
        let breakdown = PriceBreakdown::compute(&items, None, Price::ZERO, Price::ZERO);
        assert_eq!(breakdown.subtotal, Price::idr(250_000));
        assert_eq!(breakdown.shipping_cost, Price::ZERO);
        assert_eq!(breakdown.total, Price::idr(250_000));

        let first_only = PriceBreakdown::compute(
            items.first(),
            None,
            Price::ZERO,
            Price::ZERO,
        );
        assert_eq!(first_only.subtotal, Price::idr(200_000));
    }

    #[test]
    fn test_shipping_applied_once_regardless_of_item_count() {
        let items = [line(100_000, 2), line(50_000, 1)];
        let breakdown =
            PriceBreakdown::compute(&items, Some(Price::idr(20_000)), Price::ZERO, Price::ZERO);
        assert_eq!(breakdown.total, Price::idr(270_000));
    }

    #[test]
    fn test_empty_selection_is_all_zero() {
        let breakdown = PriceBreakdown::compute([], None, Price::ZERO, Price::ZERO);
        assert_eq!(breakdown.subtotal, Price::ZERO);
        assert_eq!(breakdown.total, Price::ZERO);
    }

    #[test]
    fn test_discount_and_tax_enter_the_total() {
        let items = [line(100_000, 1)];
        let breakdown = PriceBreakdown::compute(
            &items,
            Some(Price::idr(20_000)),
            Price::idr(10_000),
            Price::idr(11_000),
        );
        assert_eq!(breakdown.total, Price::idr(121_000));
    }
}
