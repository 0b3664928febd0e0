//! Purchase history handlers.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use doorbuster_core::Purchase;

use crate::db::PurchaseRepository;
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct PurchaseQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PurchaseList {
    pub purchases: Vec<Purchase>,
}

/// `GET /purchases`
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn index(
    State(state): State<AppState>,
    user: RequireUser,
    Query(query): Query<PurchaseQuery>,
) -> Result<Json<PurchaseList>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let purchases = PurchaseRepository::new(state.pool())
        .list_for_user(user.0.id, limit)
        .await?;

    Ok(Json(PurchaseList { purchases }))
}
