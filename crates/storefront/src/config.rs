//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DOORBUSTER_DATABASE_URL` - `PostgreSQL` connection string
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_TOKEN` - Storefront API private access token
//!
//! ## Optional
//! - `DOORBUSTER_HOST` - Bind address (default: 127.0.0.1)
//! - `DOORBUSTER_PORT` - Listen port (default: 3000)
//! - `SHOPIFY_API_VERSION` - API version (default: 2024-01)
//! - `ENRICHMENT_TIMEOUT_MS` - Per-deal Shopify lookup budget (default: 5000)
//! - `NOTIFICATIONS_WATERMARK_PATH` - Last-viewed watermark file
//!   (default: doorbuster_notifications_last_viewed)
//! - `DOORBUSTER_SECURE_COOKIES` - Require HTTPS for session cookies
//!   (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! Shopify credentials are validated here, at load time, so a missing or
//! blank token surfaces as a [`ConfigError`] before any network call is
//! attempted rather than as a transient-looking gateway failure.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Budget for a single deal-enrichment lookup
    pub enrichment_timeout: Duration,
    /// File holding the notifications "last viewed" watermark
    pub watermark_path: PathBuf,
    /// Whether session cookies require HTTPS (on behind TLS termination)
    pub secure_cookies: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2024-01)
    pub api_version: String,
    /// Storefront API private access token (server-side only)
    pub storefront_token: SecretString,
}

impl ShopifyStorefrontConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let store = get_required_env("SHOPIFY_STORE")?;
        if store.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPIFY_STORE".to_string(),
                "store domain must not be blank".to_string(),
            ));
        }

        let token = get_required_env("SHOPIFY_STOREFRONT_TOKEN")?;
        if token.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPIFY_STOREFRONT_TOKEN".to_string(),
                "access token must not be blank".to_string(),
            ));
        }

        Ok(Self {
            store,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", "2024-01"),
            storefront_token: SecretString::from(token),
        })
    }

    /// GraphQL endpoint URL for this store and API version.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.store, self.api_version
        )
    }
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("storefront_token", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = SecretString::from(get_required_env("DOORBUSTER_DATABASE_URL")?);
        let host = get_env_or_default("DOORBUSTER_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("DOORBUSTER_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("DOORBUSTER_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("DOORBUSTER_PORT".to_string(), e.to_string())
            })?;

        let enrichment_timeout_ms = get_env_or_default("ENRICHMENT_TIMEOUT_MS", "5000")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ENRICHMENT_TIMEOUT_MS".to_string(), e.to_string())
            })?;

        let watermark_path = PathBuf::from(get_env_or_default(
            "NOTIFICATIONS_WATERMARK_PATH",
            "doorbuster_notifications_last_viewed",
        ));

        let secure_cookies = get_env_or_default("DOORBUSTER_SECURE_COOKIES", "false")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("DOORBUSTER_SECURE_COOKIES".to_string(), e.to_string())
            })?;

        let shopify = ShopifyStorefrontConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            shopify,
            enrichment_timeout: Duration::from_millis(enrichment_timeout_ms),
            watermark_path,
            secure_cookies,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shopify_config() -> ShopifyStorefrontConfig {
        ShopifyStorefrontConfig {
            store: "test.myshopify.com".to_string(),
            api_version: "2024-01".to_string(),
            storefront_token: SecretString::from("token"),
        }
    }

    #[test]
    fn endpoint_includes_store_and_version() {
        assert_eq!(
            shopify_config().endpoint(),
            "https://test.myshopify.com/api/2024-01/graphql.json"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let debug_output = format!("{:?}", shopify_config());
        assert!(debug_output.contains("test.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("token\""));
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().expect("valid ip"),
            port: 3000,
            shopify: shopify_config(),
            enrichment_timeout: Duration::from_secs(5),
            watermark_path: PathBuf::from("watermark"),
            secure_cookies: false,
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
