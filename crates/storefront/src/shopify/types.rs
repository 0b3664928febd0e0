//! Domain types for the Shopify Storefront API.
//!
//! These provide a flat, ergonomic view separate from the raw connection
//! (`edges`/`node`) shapes on the wire.

use serde::{Deserialize, Serialize};

/// Monetary amount with currency code.
///
/// The amount stays a string here to preserve Shopify's decimal precision;
/// the enrichment engine parses it where a numeric value is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

/// Product image with optional alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub alt_text: Option<String>,
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID, passed to checkout creation.
    pub id: String,
    pub title: String,
    /// Current selling price.
    pub price: Money,
    /// Pre-discount price, when the variant is on sale.
    pub compare_at_price: Option<Money>,
    pub available_for_sale: bool,
    /// Sellable quantity for this variant, when inventory is tracked.
    pub quantity_available: Option<i64>,
}

/// A product fetched live from the Storefront API. Never persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Shopify's durable product ID (a `gid://` URI).
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description: String,
    /// Ordered display images.
    pub images: Vec<ProductImage>,
    /// Ordered variants; the first acts as the default selection.
    pub variants: Vec<ProductVariant>,
    /// Whether any variant is available for sale.
    pub available_for_sale: bool,
    /// Aggregate inventory across variants.
    pub total_inventory: i64,
}

/// A hosted checkout session created for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkout {
    /// Opaque checkout session ID.
    pub id: String,
    /// Redirect URL for the hosted checkout page.
    pub web_url: String,
}
