//! "You may also like" product suggestions for the cart view.
//!
//! Pure in-memory filtering over a product listing the caller already has;
//! no ranking model and no network access.

use nexu_core::{Price, ProductId, SellerId};
use serde::{Deserialize, Serialize};

use crate::cart::CartLineItem;

/// Default number of suggestions shown under the cart.
pub const DEFAULT_RELATED_LIMIT: usize = 6;

/// A product as it appears in a listing, enough to render a suggestion card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub seller_id: Option<SellerId>,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub seller_slug: String,
}

/// Products related to the current cart contents.
///
/// A product qualifies when its category matches the category of any cart
/// line and it is not itself already in the cart. Listing order is
/// preserved; at most `limit` products are returned. Cart lines without a
/// category contribute nothing, so an uncategorized cart yields no
/// suggestions.
#[must_use]
pub fn related_products<'a>(
    cart_items: &[CartLineItem],
    listing: &'a [ProductSummary],
    limit: usize,
) -> Vec<&'a ProductSummary> {
    let categories: Vec<&str> = cart_items
        .iter()
        .filter_map(|item| item.category.as_deref())
        .collect();
    if categories.is_empty() {
        return Vec::new();
    }
    let in_cart: Vec<ProductId> = cart_items.iter().map(|item| item.product_id).collect();

    listing
        .iter()
        .filter(|product| {
            product
                .category
                .as_deref()
                .is_some_and(|category| categories.contains(&category))
        })
        .filter(|product| !in_cart.contains(&product.id))
        .take(limit)
        .collect()
}
