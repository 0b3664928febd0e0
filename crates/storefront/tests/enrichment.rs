//! Integration tests for `DealEnricher` against a mock Shopify endpoint.
//!
//! The engine's contract is that it never fails: whatever the endpoint
//! does (missing products, server errors, timeouts), every deal comes back,
//! at worst without a snapshot.

use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doorbuster_core::{Deal, DealId};
use doorbuster_storefront::enrichment::DealEnricher;
use doorbuster_storefront::shopify::StorefrontClient;

fn enricher(server: &MockServer, timeout: Duration) -> DealEnricher {
    let client = StorefrontClient::with_endpoint(
        format!("{}/graphql.json", server.uri()),
        "test-token".to_string(),
    );
    DealEnricher::new(client, timeout)
}

fn deal(handle: Option<&str>) -> Deal {
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
        shopify_handle: handle.map(str::to_string),
        shopify_product_id: None,
        shopify_variant_id: None,
        created_at: now,
        updated_at: now,
    }
}

fn product_response(handle: &str, price: &str) -> serde_json::Value {
    json!({
        "data": { "product": {
            "id": "gid://shopify/Product/1",
            "title": "Waffle Iron Deluxe",
            "description": "Crispy",
            "handle": handle,
            "availableForSale": true,
            "totalInventory": 7,
            "images": { "edges": [
                { "node": { "url": "https://cdn.shopify.com/waffle.jpg", "altText": "Waffles" } }
            ] },
            "variants": { "edges": [
                { "node": {
                    "id": "gid://shopify/ProductVariant/101",
                    "title": "Default Title",
                    "price": { "amount": price, "currencyCode": "USD" },
                    "compareAtPrice": null,
                    "availableForSale": true,
                    "quantityAvailable": 7
                } }
            ] }
        } }
    })
}

#[tokio::test]
async fn a_linked_deal_gains_a_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_response("waffle-iron", "21.50")))
        .mount(&server)
        .await;

    let enriched = enricher(&server, Duration::from_secs(5))
        .enrich(deal(Some("waffle-iron")))
        .await;

    let snapshot = enriched.shopify_product.as_ref().expect("snapshot present");
    assert_eq!(snapshot.title, "Waffle Iron Deluxe");
    assert_eq!(snapshot.variant_id, "gid://shopify/ProductVariant/101");
    // Live price wins over the stored sale price
    assert_eq!(enriched.current_price(), Decimal::new(2150, 2));
    // No compare-at price on the variant, so the stored regular price holds
    assert_eq!(enriched.original_price(), Decimal::new(4999, 2));
    // The deal's own fields are untouched
    assert_eq!(enriched.deal.sale_price, Decimal::new(2499, 2));
}

#[tokio::test]
async fn an_unlinked_deal_is_returned_plain_without_a_request() {
    let server = MockServer::start().await;

    let enriched = enricher(&server, Duration::from_secs(5)).enrich(deal(None)).await;

    assert!(enriched.shopify_product.is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn a_missing_product_degrades_to_the_plain_deal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "product": null } })),
        )
        .mount(&server)
        .await;

    let enriched = enricher(&server, Duration::from_secs(5))
        .enrich(deal(Some("gone")))
        .await;

    assert!(enriched.shopify_product.is_none());
    assert_eq!(enriched.current_price(), Decimal::new(2499, 2));
}

#[tokio::test]
async fn a_server_error_never_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let enriched = enricher(&server, Duration::from_secs(5))
        .enrich(deal(Some("waffle-iron")))
        .await;

    assert!(enriched.shopify_product.is_none());
}

#[tokio::test]
async fn a_slow_lookup_times_out_to_the_plain_deal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_response("waffle-iron", "21.50"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let enriched = enricher(&server, Duration::from_millis(50))
        .enrich(deal(Some("waffle-iron")))
        .await;

    assert!(enriched.shopify_product.is_none());
}

#[tokio::test]
async fn enrich_all_preserves_input_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "handle": "waffle-iron" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_response("waffle-iron", "21.50")))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "handle": "gone" } })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "product": null } })),
        )
        .mount(&server)
        .await;

    let deals = vec![deal(Some("waffle-iron")), deal(None), deal(Some("gone"))];
    let ids: Vec<_> = deals.iter().map(|d| d.id).collect();

    let enriched = enricher(&server, Duration::from_secs(5)).enrich_all(deals).await;

    assert_eq!(enriched.len(), 3);
    let out_ids: Vec<_> = enriched.iter().map(|e| e.deal.id).collect();
    assert_eq!(out_ids, ids);
    assert!(enriched[0].shopify_product.is_some());
    assert!(enriched[1].shopify_product.is_none());
    assert!(enriched[2].shopify_product.is_none());
}
