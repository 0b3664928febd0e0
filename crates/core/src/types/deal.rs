//! Deal records and input validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::DealId;
use super::status::DealStatus;

/// A time-boxed discount listing with its own inventory counter.
///
/// Deals are locally owned records. They may link to a Shopify product via
/// `shopify_handle` or `shopify_product_id`; at least one of the two is
/// expected for enrichment to be meaningful, but neither is required for
/// basic display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Deal {
    pub id: DealId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Pre-discount list price.
    pub regular_price: Decimal,
    /// Discounted price; always below `regular_price` (enforced on input).
    pub sale_price: Decimal,
    /// Inventory allocated at creation time.
    pub quantity_total: i32,
    /// Remaining inventory; decremented by purchases.
    pub quantity_remaining: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Shopify product handle for enrichment lookup.
    pub shopify_handle: Option<String>,
    /// Shopify durable product ID, used when no handle is set.
    pub shopify_product_id: Option<String>,
    /// Preferred variant for checkout; falls back to the first variant.
    pub shopify_variant_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// Resolve the deal's lifecycle status at `now`.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> DealStatus {
        DealStatus::resolve(self.start_date, self.end_date, self.quantity_remaining, now)
    }

    /// Whether the deal carries any Shopify linkage usable for enrichment.
    #[must_use]
    pub const fn has_shopify_linkage(&self) -> bool {
        self.shopify_handle.is_some() || self.shopify_product_id.is_some()
    }
}

/// Validation failures for deal input.
///
/// These invariants are enforced at creation/edit time only; stored rows are
/// trusted at read time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DealValidationError {
    #[error("sale price must be below regular price")]
    SaleNotBelowRegular,
    #[error("prices must be non-negative")]
    NegativePrice,
    #[error("start date must be before end date")]
    WindowInverted,
    #[error("total quantity must be non-negative")]
    NegativeQuantity,
    #[error("remaining quantity must be between 0 and the total")]
    RemainingOutOfBounds,
    #[error("title must not be empty")]
    EmptyTitle,
}

/// Input for creating a deal.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDeal {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub regular_price: Decimal,
    pub sale_price: Decimal,
    pub quantity_total: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub shopify_handle: Option<String>,
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
}

impl NewDeal {
    /// Validate creation-time invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated [`DealValidationError`].
    pub fn validate(&self) -> Result<(), DealValidationError> {
        if self.title.trim().is_empty() {
            return Err(DealValidationError::EmptyTitle);
        }
        validate_pricing(self.regular_price, self.sale_price)?;
        validate_window(self.start_date, self.end_date)?;
        if self.quantity_total < 0 {
            return Err(DealValidationError::NegativeQuantity);
        }
        Ok(())
    }
}

/// Input for editing a deal. All fields are full replacements; the remaining
/// quantity may be adjusted by an admin (e.g. to restock) but must stay
/// within `[0, quantity_total]`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDeal {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub regular_price: Decimal,
    pub sale_price: Decimal,
    pub quantity_total: i32,
    pub quantity_remaining: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub shopify_handle: Option<String>,
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
}

impl UpdateDeal {
    /// Validate edit-time invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated [`DealValidationError`].
    pub fn validate(&self) -> Result<(), DealValidationError> {
        if self.title.trim().is_empty() {
            return Err(DealValidationError::EmptyTitle);
        }
        validate_pricing(self.regular_price, self.sale_price)?;
        validate_window(self.start_date, self.end_date)?;
        if self.quantity_total < 0 {
            return Err(DealValidationError::NegativeQuantity);
        }
        if self.quantity_remaining < 0 || self.quantity_remaining > self.quantity_total {
            return Err(DealValidationError::RemainingOutOfBounds);
        }
        Ok(())
    }
}

fn validate_pricing(regular: Decimal, sale: Decimal) -> Result<(), DealValidationError> {
    if regular.is_sign_negative() || sale.is_sign_negative() {
        return Err(DealValidationError::NegativePrice);
    }
    if sale >= regular {
        return Err(DealValidationError::SaleNotBelowRegular);
    }
    Ok(())
}

fn validate_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), DealValidationError> {
    if start >= end {
        return Err(DealValidationError::WindowInverted);
    }
    Ok(())
}
