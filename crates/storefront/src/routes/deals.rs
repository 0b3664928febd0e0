//! Deal listing, detail, and checkout handlers.

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use doorbuster_core::countdown::{
    CountdownParts, format_price, remaining_breakdown, remaining_label,
};
use doorbuster_core::{DealId, DealStatus};

use crate::db::{DealRepository, PurchaseRepository};
use crate::enrichment::EnrichedDeal;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::state::AppState;

/// The storefront's view of a deal: the enriched record plus everything
/// the screens derive from it.
#[derive(Debug, Serialize)]
pub struct DealView {
    #[serde(flatten)]
    pub deal: EnrichedDeal,
    pub status: DealStatus,
    pub current_price: String,
    pub original_price: String,
    pub time_remaining: String,
}

impl DealView {
    fn build(enriched: EnrichedDeal) -> Self {
        let now = Utc::now();
        let status = enriched.deal.status_at(now);
        let current_price = format_price(enriched.current_price());
        let original_price = format_price(enriched.original_price());
        let time_remaining = remaining_label(enriched.deal.end_date, now);
        Self {
            deal: enriched,
            status,
            current_price,
            original_price,
            time_remaining,
        }
    }
}

/// Deals grouped by resolved status, each group in schedule order.
#[derive(Debug, Default, Serialize)]
pub struct DealBuckets {
    pub active: Vec<DealView>,
    pub coming_soon: Vec<DealView>,
    pub sold_out: Vec<DealView>,
    pub expired: Vec<DealView>,
}

/// `GET /deals`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<DealBuckets>> {
    let deals = DealRepository::new(state.pool()).list_ordered().await?;
    let enriched = state.enricher().enrich_all(deals).await;

    let mut buckets = DealBuckets::default();
    for view in enriched.into_iter().map(DealView::build) {
        match view.status {
            DealStatus::Active => buckets.active.push(view),
            DealStatus::ComingSoon => buckets.coming_soon.push(view),
            DealStatus::SoldOut => buckets.sold_out.push(view),
            DealStatus::Expired => buckets.expired.push(view),
        }
    }

    Ok(Json(buckets))
}

/// A single deal with the full countdown breakdown for its timer.
#[derive(Debug, Serialize)]
pub struct DealDetail {
    #[serde(flatten)]
    pub view: DealView,
    pub countdown: CountdownParts,
}

/// `GET /deals/{id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<DealId>,
) -> Result<Json<DealDetail>> {
    let deal = DealRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("deal".to_owned()))?;

    let enriched = state.enricher().enrich(deal).await;
    let countdown = remaining_breakdown(enriched.deal.end_date, Utc::now());
    let view = DealView::build(enriched);

    Ok(Json(DealDetail { view, countdown }))
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub checkout_id: String,
    pub web_url: String,
}

/// `POST /deals/{id}/checkout`
///
/// Hands the buyer off to Shopify's hosted checkout and records a pending
/// purchase, decrementing the deal's remaining inventory.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn checkout(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<DealId>,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    if body.quantity < 1 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_owned()));
    }

    let deal = DealRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("deal".to_owned()))?;

    let enriched = state.enricher().enrich(deal).await;
    let status = enriched.deal.status_at(Utc::now());
    if !status.is_purchasable() {
        return Err(AppError::BadRequest(format!(
            "deal is not currently purchasable (status: {status})"
        )));
    }

    let Some(variant_id) = enriched.checkout_variant_id() else {
        return Err(AppError::BadRequest(
            "deal has no purchasable product variant".to_owned(),
        ));
    };

    let checkout = state
        .storefront()
        .create_checkout(variant_id, i64::from(body.quantity))
        .await?;

    let amount = enriched.current_price() * rust_decimal::Decimal::from(body.quantity);
    PurchaseRepository::new(state.pool())
        .insert(user.0.id, id, body.quantity, amount)
        .await?;

    Ok(Json(CheckoutResponse {
        checkout_id: checkout.id,
        web_url: checkout.web_url,
    }))
}
