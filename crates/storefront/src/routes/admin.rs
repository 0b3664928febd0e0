//! Admin CRUD handlers for deals and notifications.
//!
//! Every handler takes [`RequireAdmin`], so a non-admin session gets a 403
//! before any body parsing happens.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use doorbuster_core::{
    Deal, DealId, NewDeal, NewNotification, Notification, NotificationId, UpdateDeal,
};

use crate::db::{DealRepository, NotificationRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::shopify::types::Product;
use crate::state::AppState;

const DEFAULT_PRODUCT_LIMIT: usize = 50;
const MAX_PRODUCT_LIMIT: usize = 250;

// ===== Shopify products =====

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub limit: Option<usize>,
}

impl ProductQuery {
    fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_PRODUCT_LIMIT)
            .clamp(1, MAX_PRODUCT_LIMIT)
    }
}

#[derive(Debug, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
}

/// `GET /admin/products`
///
/// Lists Shopify products for the deal form's product picker, so an admin
/// can link a deal to a handle, product ID, and variant.
#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn list_products(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ProductList>> {
    let products = state
        .storefront()
        .get_all_products(query.effective_limit())
        .await?;
    Ok(Json(ProductList { products }))
}

// ===== Deals =====

/// `POST /admin/deals`
#[instrument(skip(state, admin, body), fields(admin_id = %admin.0.id))]
pub async fn create_deal(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Json(body): Json<NewDeal>,
) -> Result<(StatusCode, Json<Deal>)> {
    body.validate()?;
    let deal = DealRepository::new(state.pool()).insert(&body).await?;
    Ok((StatusCode::CREATED, Json(deal)))
}

/// `PUT /admin/deals/{id}`
#[instrument(skip(state, admin, body), fields(admin_id = %admin.0.id))]
pub async fn update_deal(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<DealId>,
    Json(body): Json<UpdateDeal>,
) -> Result<Json<Deal>> {
    body.validate()?;
    let deal = DealRepository::new(state.pool())
        .update(id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound("deal".to_owned()))?;
    Ok(Json(deal))
}

/// `DELETE /admin/deals/{id}`
#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn delete_deal(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<DealId>,
) -> Result<StatusCode> {
    let removed = DealRepository::new(state.pool()).delete(id).await?;
    if !removed {
        return Err(AppError::NotFound("deal".to_owned()));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ===== Notifications =====

fn validate_notification(input: &NewNotification) -> Result<()> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".to_owned()));
    }
    if input.message.trim().is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_owned()));
    }
    if let Some(expires_at) = input.expires_at {
        if expires_at <= input.published_at {
            return Err(AppError::BadRequest(
                "expires_at must be after published_at".to_owned(),
            ));
        }
    }
    Ok(())
}

/// `POST /admin/notifications`
#[instrument(skip(state, admin, body), fields(admin_id = %admin.0.id))]
pub async fn create_notification(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Json(body): Json<NewNotification>,
) -> Result<(StatusCode, Json<Notification>)> {
    validate_notification(&body)?;
    let notification = NotificationRepository::new(state.pool())
        .insert(&body)
        .await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// `PUT /admin/notifications/{id}`
#[instrument(skip(state, admin, body), fields(admin_id = %admin.0.id))]
pub async fn update_notification(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<NotificationId>,
    Json(body): Json<NewNotification>,
) -> Result<Json<Notification>> {
    validate_notification(&body)?;
    let notification = NotificationRepository::new(state.pool())
        .update(id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound("notification".to_owned()))?;
    Ok(Json(notification))
}

/// `DELETE /admin/notifications/{id}`
#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn delete_notification(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<NotificationId>,
) -> Result<StatusCode> {
    let removed = NotificationRepository::new(state.pool()).delete(id).await?;
    if !removed {
        return Err(AppError::NotFound("notification".to_owned()));
    }
    Ok(StatusCode::NO_CONTENT)
}
