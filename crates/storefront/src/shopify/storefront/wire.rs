//! Wire-format structs mirroring the Storefront API's GraphQL responses.
//!
//! Shopify returns relay-style connections (`edges` of `node`s plus
//! `pageInfo`); everything here is camelCase on the wire and flattened into
//! the domain types by [`super::conversions`].

use serde::Deserialize;

/// The `{data, errors}` envelope every GraphQL response arrives in.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<crate::shopify::GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedConnection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyNode {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub url: String,
    pub alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    pub id: String,
    pub title: String,
    pub price: MoneyNode,
    pub compare_at_price: Option<MoneyNode>,
    pub available_for_sale: bool,
    pub quantity_available: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub handle: String,
    pub images: Connection<ImageNode>,
    pub variants: Connection<VariantNode>,
    #[serde(default)]
    pub available_for_sale: bool,
    pub total_inventory: Option<i64>,
}

/// `data` shape for single-product lookups (by handle or by ID).
#[derive(Debug, Deserialize)]
pub struct ProductData {
    pub product: Option<ProductNode>,
}

/// `data` shape for the paginated products listing.
#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: PagedConnection<ProductNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutNode {
    pub id: String,
    pub web_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutUserErrorNode {
    pub code: Option<String>,
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutCreatePayload {
    pub checkout: Option<CheckoutNode>,
    #[serde(default)]
    pub checkout_user_errors: Vec<CheckoutUserErrorNode>,
}

/// `data` shape for the checkout creation mutation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutCreateData {
    pub checkout_create: Option<CheckoutCreatePayload>,
}
