//! Purchase repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use doorbuster_core::{DealId, Purchase, UserId};

use super::RepositoryError;

const PURCHASE_COLUMNS: &str = "id, user_id, deal_id, quantity, amount, status, created_at";

/// Repository for purchase records.
pub struct PurchaseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PurchaseRepository<'a> {
    /// Create a new purchase repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's purchases, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Purchase>, RepositoryError> {
        let purchases = sqlx::query_as::<_, Purchase>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases \
             WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(purchases)
    }

    /// Record a purchase and decrement the deal's remaining inventory in
    /// the same transaction. The counter floors at zero rather than going
    /// negative under concurrent checkouts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either statement fails; the
    /// transaction rolls back as a unit.
    pub async fn insert(
        &self,
        user_id: UserId,
        deal_id: DealId,
        quantity: i32,
        amount: Decimal,
    ) -> Result<Purchase, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let purchase = sqlx::query_as::<_, Purchase>(&format!(
            "INSERT INTO purchases (user_id, deal_id, quantity, amount) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {PURCHASE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(deal_id)
        .bind(quantity)
        .bind(amount)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE deals SET quantity_remaining = GREATEST(quantity_remaining - $2, 0), \
                 updated_at = now() \
             WHERE id = $1",
        )
        .bind(deal_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(purchase)
    }
}
