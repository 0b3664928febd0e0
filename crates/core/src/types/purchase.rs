//! Purchase records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{DealId, PurchaseId, UserId};

/// Settlement state of a purchase as reported back from checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "purchase_status", rename_all = "snake_case")
)]
pub enum PurchaseStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

/// A purchase of a deal by a user.
///
/// Rows are written when a checkout is handed off to the external platform;
/// inserting one decrements the deal's remaining inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Purchase {
    pub id: PurchaseId,
    pub user_id: UserId,
    pub deal_id: DealId,
    pub quantity: i32,
    /// Total paid, in the sale currency.
    pub amount: Decimal,
    pub status: PurchaseStatus,
    pub created_at: DateTime<Utc>,
}
