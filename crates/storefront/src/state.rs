//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::enrichment::DealEnricher;
use crate::notifications::{DbNotificationFeed, FileWatermarkStore, UnreadTracker};
use crate::services::AuthService;
use crate::shopify::StorefrontClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Every collaborator is injected here at
/// startup; handlers never construct their own clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    storefront: StorefrontClient,
    enricher: DealEnricher,
    auth: AuthService,
    tracker: UnreadTracker<DbNotificationFeed, FileWatermarkStore>,
}

impl AppState {
    /// Create a new application state from configuration and a pool.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let storefront = StorefrontClient::new(&config.shopify);
        let enricher = DealEnricher::new(storefront.clone(), config.enrichment_timeout);
        let auth = AuthService::new(pool.clone());
        let tracker = UnreadTracker::new(
            DbNotificationFeed::new(pool.clone()),
            FileWatermarkStore::new(config.watermark_path.clone()),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                storefront,
                enricher,
                auth,
                tracker,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Shopify Storefront API client.
    #[must_use]
    pub fn storefront(&self) -> &StorefrontClient {
        &self.inner.storefront
    }

    /// Get a reference to the deal enricher.
    #[must_use]
    pub fn enricher(&self) -> &DealEnricher {
        &self.inner.enricher
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Get a reference to the notification unread tracker.
    #[must_use]
    pub fn tracker(&self) -> &UnreadTracker<DbNotificationFeed, FileWatermarkStore> {
        &self.inner.tracker
    }
}
