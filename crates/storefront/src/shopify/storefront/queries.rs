//! GraphQL documents for the Storefront API.
//!
//! The product queries share one field selection so single lookups and the
//! paginated listing return the same shape.

use std::sync::LazyLock;

/// Field selection used by every product query.
const PRODUCT_FIELDS: &str = "\
id
title
description
handle
images(first: 10) {
  edges {
    node {
      url
      altText
    }
  }
}
variants(first: 100) {
  edges {
    node {
      id
      title
      price {
        amount
        currencyCode
      }
      compareAtPrice {
        amount
        currencyCode
      }
      availableForSale
      quantityAvailable
    }
  }
}
availableForSale
totalInventory";

pub static PRODUCT_BY_HANDLE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "query ProductByHandle($handle: String!) {{\n  product(handle: $handle) {{\n{PRODUCT_FIELDS}\n  }}\n}}"
    )
});

pub static PRODUCT_BY_ID: LazyLock<String> = LazyLock::new(|| {
    format!(
        "query ProductById($id: ID!) {{\n  product(id: $id) {{\n{PRODUCT_FIELDS}\n  }}\n}}"
    )
});

pub static PRODUCTS_PAGE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "query Products($first: Int!, $after: String) {{\n  products(first: $first, after: $after) {{\n    edges {{\n      cursor\n      node {{\n{PRODUCT_FIELDS}\n      }}\n    }}\n    pageInfo {{\n      hasNextPage\n      endCursor\n    }}\n  }}\n}}"
    )
});

pub const CHECKOUT_CREATE: &str = "\
mutation CheckoutCreate($input: CheckoutCreateInput!) {
  checkoutCreate(input: $input) {
    checkout {
      id
      webUrl
    }
    checkoutUserErrors {
      code
      field
      message
    }
  }
}";
