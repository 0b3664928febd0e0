//! Storefront API client implementation.

mod conversions;
mod queries;
mod wire;

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::ShopifyError;
use crate::shopify::types::{Checkout, Product};

use conversions::{convert_checkout, convert_product};
use wire::Envelope;

/// Largest page the products connection will serve per request.
const MAX_PAGE_SIZE: usize = 250;

/// Client for the Shopify Storefront API.
///
/// Cheap to clone; the HTTP connection pool is shared behind an `Arc`.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl StorefrontClient {
    /// Create a new Storefront API client from configuration.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        Self::with_endpoint(
            config.endpoint(),
            config.storefront_token.expose_secret().to_string(),
        )
    }

    /// Create a client against an explicit GraphQL endpoint URL.
    ///
    /// Used by test suites pointing at a local mock server.
    #[must_use]
    pub fn with_endpoint(endpoint: String, access_token: String) -> Self {
        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token,
            }),
        }
    }

    /// Execute a GraphQL document and deserialize the `data` payload.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ShopifyError> {
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a different header than public tokens
            .header(
                "Shopify-Storefront-Private-Token",
                &self.inner.access_token,
            )
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Storefront API returned non-success status"
            );
            return Err(ShopifyError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse Storefront GraphQL response"
            );
            ShopifyError::Parse(e)
        })?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            debug!(?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(errors));
        }

        envelope.data.ok_or_else(|| {
            ShopifyError::MissingData("response carried neither data nor errors".to_string())
        })
    }

    /// Get a product by its handle.
    ///
    /// Returns `Ok(None)` when Shopify reports no product for the handle;
    /// transport and query failures are `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError`] if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Product>, ShopifyError> {
        let data: wire::ProductData = self
            .execute(&queries::PRODUCT_BY_HANDLE, json!({ "handle": handle }))
            .await?;

        Ok(data.product.map(convert_product))
    }

    /// Get a product by its durable Shopify ID.
    ///
    /// Same contract as [`Self::get_product_by_handle`].
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError`] if the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product_by_id(&self, id: &str) -> Result<Option<Product>, ShopifyError> {
        let data: wire::ProductData = self
            .execute(&queries::PRODUCT_BY_ID, json!({ "id": id }))
            .await?;

        Ok(data.product.map(convert_product))
    }

    /// Retrieve up to `limit` products, paginating through the connection.
    ///
    /// Pages are fetched sequentially - each page's cursor comes from the
    /// previous response. The walk stops once `limit` products are
    /// collected, the API reports no further pages, or a page comes back
    /// empty. The empty-page stop guards against anomalous responses that
    /// claim more pages forever.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError`] if any page request fails.
    #[instrument(skip(self))]
    pub async fn get_all_products(&self, limit: usize) -> Result<Vec<Product>, ShopifyError> {
        let mut products = Vec::new();
        let mut cursor: Option<String> = None;

        while products.len() < limit {
            let page_size = MAX_PAGE_SIZE.min(limit - products.len());
            let data: wire::ProductsData = self
                .execute(
                    &queries::PRODUCTS_PAGE,
                    json!({ "first": page_size, "after": cursor }),
                )
                .await?;

            let connection = data.products;
            if connection.edges.is_empty() {
                break;
            }

            products.extend(
                connection
                    .edges
                    .into_iter()
                    .map(|edge| convert_product(edge.node)),
            );

            if !connection.page_info.has_next_page {
                break;
            }
            match connection.page_info.end_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        products.truncate(limit);
        Ok(products)
    }

    /// Create a hosted checkout session for a single line item.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::UserError`] with the first user-facing
    /// message when Shopify rejects the input, or another [`ShopifyError`]
    /// if the request fails outright.
    #[instrument(skip(self), fields(variant_id = %variant_id, quantity))]
    pub async fn create_checkout(
        &self,
        variant_id: &str,
        quantity: i64,
    ) -> Result<Checkout, ShopifyError> {
        let variables = json!({
            "input": {
                "lineItems": [
                    { "variantId": variant_id, "quantity": quantity }
                ]
            }
        });

        let data: wire::CheckoutCreateData =
            self.execute(queries::CHECKOUT_CREATE, variables).await?;

        let payload = data.checkout_create.ok_or_else(|| {
            ShopifyError::MissingData("checkoutCreate payload absent".to_string())
        })?;

        if let Some(user_error) = payload.checkout_user_errors.into_iter().next() {
            return Err(ShopifyError::UserError(user_error.message));
        }

        payload.checkout.map(convert_checkout).ok_or_else(|| {
            ShopifyError::MissingData("checkout absent with no user errors".to_string())
        })
    }
}
