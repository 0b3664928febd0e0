//! Deal repository.

use sqlx::PgPool;

use doorbuster_core::{Deal, DealId, NewDeal, UpdateDeal};

use super::RepositoryError;

const DEAL_COLUMNS: &str = "id, title, description, image_url, regular_price, sale_price, \
     quantity_total, quantity_remaining, start_date, end_date, \
     shopify_handle, shopify_product_id, shopify_variant_id, created_at, updated_at";

/// Repository for deal records.
pub struct DealRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DealRepository<'a> {
    /// Create a new deal repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all deals ordered by start date (soonest first).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_ordered(&self) -> Result<Vec<Deal>, RepositoryError> {
        let deals = sqlx::query_as::<_, Deal>(&format!(
            "SELECT {DEAL_COLUMNS} FROM deals ORDER BY start_date ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(deals)
    }

    /// Get a deal by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: DealId) -> Result<Option<Deal>, RepositoryError> {
        let deal = sqlx::query_as::<_, Deal>(&format!(
            "SELECT {DEAL_COLUMNS} FROM deals WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(deal)
    }

    /// Insert a new deal. The remaining quantity starts at the total.
    ///
    /// Callers validate the input first; this is a plain insert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, input: &NewDeal) -> Result<Deal, RepositoryError> {
        let deal = sqlx::query_as::<_, Deal>(&format!(
            "INSERT INTO deals (title, description, image_url, regular_price, sale_price, \
                 quantity_total, quantity_remaining, start_date, end_date, \
                 shopify_handle, shopify_product_id, shopify_variant_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $6, $7, $8, $9, $10, $11) \
             RETURNING {DEAL_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.regular_price)
        .bind(input.sale_price)
        .bind(input.quantity_total)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.shopify_handle)
        .bind(&input.shopify_product_id)
        .bind(&input.shopify_variant_id)
        .fetch_one(self.pool)
        .await?;

        Ok(deal)
    }

    /// Replace a deal's fields. Returns `None` when no such deal exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: DealId,
        input: &UpdateDeal,
    ) -> Result<Option<Deal>, RepositoryError> {
        let deal = sqlx::query_as::<_, Deal>(&format!(
            "UPDATE deals SET title = $2, description = $3, image_url = $4, \
                 regular_price = $5, sale_price = $6, quantity_total = $7, \
                 quantity_remaining = $8, start_date = $9, end_date = $10, \
                 shopify_handle = $11, shopify_product_id = $12, shopify_variant_id = $13, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {DEAL_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.regular_price)
        .bind(input.sale_price)
        .bind(input.quantity_total)
        .bind(input.quantity_remaining)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.shopify_handle)
        .bind(&input.shopify_product_id)
        .bind(&input.shopify_variant_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(deal)
    }

    /// Delete a deal. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: DealId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM deals WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
