//! Deal enrichment: merging local deal records with live Shopify data.
//!
//! Enrichment is strictly best-effort. A deal renders fine from its own
//! fields; the Shopify snapshot only improves it. The engine therefore
//! never returns an error and never blocks past its lookup budget - any
//! failure (no linkage, no match, timeout, transport error, zero variants,
//! unparsable price) degrades to the plain deal.

use std::str::FromStr;
use std::time::Duration;

use futures::future::join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{instrument, warn};

use doorbuster_core::Deal;

use crate::shopify::types::{Product, ProductImage};
use crate::shopify::{ShopifyError, StorefrontClient};

/// Live product data merged onto a deal. Request-scoped, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ShopifySnapshot {
    /// Shopify product ID.
    pub product_id: String,
    pub title: String,
    pub description: String,
    /// Display images; falls back to the deal's own image when Shopify has
    /// none.
    pub images: Vec<ProductImage>,
    /// Variant's current selling price.
    pub current_price: Decimal,
    /// Variant's pre-discount price, when Shopify reports one.
    pub compare_at_price: Option<Decimal>,
    pub available_for_sale: bool,
    pub total_inventory: i64,
    /// Variant to use for checkout creation.
    pub variant_id: String,
}

/// A deal plus its optional Shopify snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedDeal {
    #[serde(flatten)]
    pub deal: Deal,
    /// Present only when a matching product with at least one variant was
    /// found within the lookup budget.
    pub shopify_product: Option<ShopifySnapshot>,
}

impl EnrichedDeal {
    /// A deal with no snapshot attached.
    #[must_use]
    pub const fn plain(deal: Deal) -> Self {
        Self {
            deal,
            shopify_product: None,
        }
    }

    /// Canonical display price: the live variant price when a snapshot
    /// exists, else the locally stored sale price.
    #[must_use]
    pub fn current_price(&self) -> Decimal {
        self.shopify_product
            .as_ref()
            .map_or(self.deal.sale_price, |s| s.current_price)
    }

    /// Canonical strike-through price: the live compare-at price when
    /// present, else the locally stored regular price.
    #[must_use]
    pub fn original_price(&self) -> Decimal {
        self.shopify_product
            .as_ref()
            .and_then(|s| s.compare_at_price)
            .unwrap_or(self.deal.regular_price)
    }

    /// Variant ID to hand to checkout: the snapshot's resolved variant
    /// first, else the deal's stored variant.
    #[must_use]
    pub fn checkout_variant_id(&self) -> Option<&str> {
        self.shopify_product
            .as_ref()
            .map(|s| s.variant_id.as_str())
            .or(self.deal.shopify_variant_id.as_deref())
    }
}

/// Merges deals with live Shopify product data.
#[derive(Clone)]
pub struct DealEnricher {
    client: StorefrontClient,
    timeout: Duration,
}

impl DealEnricher {
    /// Create an enricher with a per-lookup budget.
    #[must_use]
    pub const fn new(client: StorefrontClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Enrich a single deal. Infallible from the caller's perspective: on
    /// any failure the deal comes back unchanged with no snapshot.
    #[instrument(skip(self, deal), fields(deal_id = %deal.id))]
    pub async fn enrich(&self, deal: Deal) -> EnrichedDeal {
        if !deal.has_shopify_linkage() {
            return EnrichedDeal::plain(deal);
        }

        // The lookup races a timer; an elapsed timer counts as "no product
        // found", not an error. The abandoned lookup future is dropped here
        // and cannot touch the returned value afterwards.
        let product = match tokio::time::timeout(self.timeout, self.lookup(&deal)).await {
            Ok(Ok(Some(product))) => product,
            Ok(Ok(None)) => {
                warn!(deal_id = %deal.id, "no Shopify product found, using basic deal data");
                return EnrichedDeal::plain(deal);
            }
            Ok(Err(error)) => {
                warn!(deal_id = %deal.id, %error, "Shopify lookup failed, using basic deal data");
                return EnrichedDeal::plain(deal);
            }
            Err(_elapsed) => {
                warn!(deal_id = %deal.id, "Shopify lookup timed out, using basic deal data");
                return EnrichedDeal::plain(deal);
            }
        };

        match build_snapshot(&deal, product) {
            Some(snapshot) => EnrichedDeal {
                deal,
                shopify_product: Some(snapshot),
            },
            None => EnrichedDeal::plain(deal),
        }
    }

    /// Enrich a batch concurrently. All lookups are issued together so total
    /// latency is bounded by the slowest single lookup; result order always
    /// matches input order.
    pub async fn enrich_all(&self, deals: Vec<Deal>) -> Vec<EnrichedDeal> {
        join_all(deals.into_iter().map(|deal| self.enrich(deal))).await
    }

    async fn lookup(&self, deal: &Deal) -> Result<Option<Product>, ShopifyError> {
        if let Some(handle) = deal.shopify_handle.as_deref() {
            return self.client.get_product_by_handle(handle).await;
        }
        if let Some(id) = deal.shopify_product_id.as_deref() {
            return self.client.get_product_by_id(id).await;
        }
        Ok(None)
    }
}

/// Build the snapshot for a fetched product, or `None` when the product is
/// unusable (no variants, unparsable price).
fn build_snapshot(deal: &Deal, product: Product) -> Option<ShopifySnapshot> {
    let variant = deal
        .shopify_variant_id
        .as_ref()
        .and_then(|wanted| product.variants.iter().find(|v| &v.id == wanted))
        .or_else(|| product.variants.first())?;

    let current_price = Decimal::from_str(&variant.price.amount).ok()?;
    let compare_at_price = variant
        .compare_at_price
        .as_ref()
        .and_then(|money| Decimal::from_str(&money.amount).ok());

    let images = if product.images.is_empty() {
        vec![ProductImage {
            url: deal.image_url.clone(),
            alt_text: Some(deal.title.clone()),
        }]
    } else {
        product.images.clone()
    };

    Some(ShopifySnapshot {
        product_id: product.id,
        title: product.title,
        description: product.description,
        images,
        current_price,
        compare_at_price,
        available_for_sale: variant.available_for_sale,
        total_inventory: product.total_inventory,
        variant_id: variant.id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};
    use doorbuster_core::DealId;

    use crate::shopify::types::{Money, ProductVariant};

    fn deal() -> Deal {
        let now = Utc::now();
        Deal {
            id: DealId::generate(),
            title: "Half-price waffle iron".to_string(),
            description: "One day only".to_string(),
            image_url: "https://cdn.example.com/waffle.jpg".to_string(),
            regular_price: Decimal::new(4999, 2),
            sale_price: Decimal::new(2499, 2),
            quantity_total: 100,
            quantity_remaining: 40,
            start_date: now - ChronoDuration::hours(1),
            end_date: now + ChronoDuration::hours(23),
            shopify_handle: Some("waffle-iron".to_string()),
            shopify_product_id: None,
            shopify_variant_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn variant(id: &str, price: &str) -> ProductVariant {
        ProductVariant {
            id: id.to_string(),
            title: "Default".to_string(),
            price: Money {
                amount: price.to_string(),
                currency_code: "USD".to_string(),
            },
            compare_at_price: Some(Money {
                amount: "49.99".to_string(),
                currency_code: "USD".to_string(),
            }),
            available_for_sale: true,
            quantity_available: Some(12),
        }
    }

    fn product(variants: Vec<ProductVariant>) -> Product {
        Product {
            id: "gid://shopify/Product/1".to_string(),
            handle: "waffle-iron".to_string(),
            title: "Waffle Iron".to_string(),
            description: "Crispy".to_string(),
            images: vec![ProductImage {
                url: "https://cdn.shopify.com/waffle.jpg".to_string(),
                alt_text: None,
            }],
            variants,
            available_for_sale: true,
            total_inventory: 12,
        }
    }

    #[test]
    fn snapshot_uses_first_variant_by_default() {
        let snapshot = build_snapshot(&deal(), product(vec![variant("v1", "24.99"), variant("v2", "19.99")]))
            .expect("snapshot");
        assert_eq!(snapshot.variant_id, "v1");
        assert_eq!(snapshot.current_price, Decimal::new(2499, 2));
        assert_eq!(snapshot.compare_at_price, Some(Decimal::new(4999, 2)));
    }

    #[test]
    fn snapshot_prefers_the_deals_variant() {
        let mut d = deal();
        d.shopify_variant_id = Some("v2".to_string());
        let snapshot =
            build_snapshot(&d, product(vec![variant("v1", "24.99"), variant("v2", "19.99")]))
                .expect("snapshot");
        assert_eq!(snapshot.variant_id, "v2");
        assert_eq!(snapshot.current_price, Decimal::new(1999, 2));
    }

    #[test]
    fn unknown_variant_falls_back_to_first() {
        let mut d = deal();
        d.shopify_variant_id = Some("missing".to_string());
        let snapshot = build_snapshot(&d, product(vec![variant("v1", "24.99")])).expect("snapshot");
        assert_eq!(snapshot.variant_id, "v1");
    }

    #[test]
    fn product_without_variants_yields_no_snapshot() {
        assert!(build_snapshot(&deal(), product(vec![])).is_none());
    }

    #[test]
    fn unparsable_price_yields_no_snapshot() {
        assert!(build_snapshot(&deal(), product(vec![variant("v1", "not-a-price")])).is_none());
    }

    #[test]
    fn empty_image_list_synthesizes_from_the_deal() {
        let d = deal();
        let mut p = product(vec![variant("v1", "24.99")]);
        p.images.clear();
        let snapshot = build_snapshot(&d, p).expect("snapshot");
        assert_eq!(snapshot.images.len(), 1);
        assert_eq!(snapshot.images[0].url, d.image_url);
        assert_eq!(snapshot.images[0].alt_text.as_deref(), Some(d.title.as_str()));
    }

    #[test]
    fn price_precedence_prefers_the_snapshot() {
        let d = deal();
        let enriched = EnrichedDeal {
            deal: d.clone(),
            shopify_product: build_snapshot(&d, product(vec![variant("v1", "21.50")])),
        };
        assert_eq!(enriched.current_price(), Decimal::new(2150, 2));
        assert_eq!(enriched.original_price(), Decimal::new(4999, 2));

        let plain = EnrichedDeal::plain(d);
        assert_eq!(plain.current_price(), Decimal::new(2499, 2));
        assert_eq!(plain.original_price(), Decimal::new(4999, 2));
    }
}
