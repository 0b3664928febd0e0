//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Health check
//!
//! # Deals
//! GET  /deals                    - All deals, enriched and bucketed by status
//! GET  /deals/{id}               - Single deal with countdown breakdown
//! POST /deals/{id}/checkout      - Create a Shopify checkout for a deal
//!
//! # Notifications
//! GET  /notifications            - Live notifications (marks all read)
//! GET  /notifications/unread     - Unread badge count
//! POST /notifications/read       - Mark all read without fetching the list
//!
//! # Purchases (requires auth)
//! GET  /purchases                - Current user's purchase history
//!
//! # Auth
//! POST /auth/signup              - Create an account and sign in
//! POST /auth/login               - Sign in
//! POST /auth/logout              - Sign out
//! POST /auth/password            - Change password
//! GET  /auth/session             - Current session, if any
//!
//! # Admin (requires admin)
//! GET    /admin/products         - Shopify products for the deal form picker
//! POST   /admin/deals            - Create deal
//! PUT    /admin/deals/{id}       - Update deal
//! DELETE /admin/deals/{id}       - Delete deal
//! POST   /admin/notifications    - Create notification
//! PUT    /admin/notifications/{id}    - Update notification
//! DELETE /admin/notifications/{id}    - Delete notification
//! ```

pub mod admin;
pub mod auth;
pub mod deals;
pub mod notifications;
pub mod purchases;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

async fn health() -> &'static str {
    "ok"
}

/// Create the deal routes router.
pub fn deal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(deals::index))
        .route("/{id}", get(deals::show))
        .route("/{id}/checkout", post(deals::checkout))
}

/// Create the notification routes router.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::index))
        .route("/unread", get(notifications::unread))
        .route("/read", post(notifications::mark_read))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/password", post(auth::change_password))
        .route("/session", get(auth::session))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(admin::list_products))
        .route("/deals", post(admin::create_deal))
        .route(
            "/deals/{id}",
            axum::routing::put(admin::update_deal).delete(admin::delete_deal),
        )
        .route("/notifications", post(admin::create_notification))
        .route(
            "/notifications/{id}",
            axum::routing::put(admin::update_notification).delete(admin::delete_notification),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/deals", deal_routes())
        .nest("/notifications", notification_routes())
        .route("/purchases", get(purchases::index))
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
}
