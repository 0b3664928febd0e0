//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - Hand-written GraphQL documents and wire structs over `reqwest` - the
//!   Storefront schema JSON is not vendored, so `graphql_client` codegen is
//!   not available here
//! - Deals are the local source of truth for pricing and inventory windows;
//!   Shopify is consulted live for product presentation and checkout
//! - No response caching: flash-deal inventory goes stale in seconds
//!
//! # Contracts
//!
//! Product lookups distinguish "Shopify says no such product" (`Ok(None)`)
//! from transport or query failures (`Err`). Callers outside the enrichment
//! engine surface the latter as "failed to load"; the enrichment engine
//! downgrades both to an unenriched deal.

mod storefront;
pub mod types;

pub use storefront::StorefrontClient;

use thiserror::Error;

/// Errors that can occur when interacting with the Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Rate limited by Shopify.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response carried neither data nor errors.
    #[error("response has no data: {0}")]
    MissingData(String),

    /// User-facing validation error from a mutation (e.g., checkout input).
    #[error("{0}")]
    UserError(String),
}

/// A GraphQL error returned by the Storefront API.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Path to the error in the response, when provided.
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .map(|e| {
            if e.path.is_empty() {
                e.message.clone()
            } else {
                let path = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                format!("{} (at {path})", e.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_displays_bare_message() {
        let err = ShopifyError::UserError("Variant is out of stock".to_string());
        assert_eq!(err.to_string(), "Variant is out of stock");
    }

    #[test]
    fn graphql_errors_join_messages() {
        let errors = vec![
            GraphQLError {
                message: "Field not found".to_string(),
                path: vec![],
            },
            GraphQLError {
                message: "Invalid ID".to_string(),
                path: vec![serde_json::Value::String("product".to_string())],
            },
        ];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid ID (at product)"
        );
    }

    #[test]
    fn empty_graphql_error_list_has_placeholder() {
        let err = ShopifyError::GraphQL(vec![]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: (no error details provided)"
        );
    }

    #[test]
    fn rate_limited_mentions_retry_delay() {
        let err = ShopifyError::RateLimited(30);
        assert_eq!(err.to_string(), "rate limited, retry after 30 seconds");
    }
}
