//! Deal lifecycle status resolution.
//!
//! A deal's status is derived, never stored: it is a pure function of the
//! clock, the schedule window, and the remaining inventory. Callers pass in
//! `now` explicitly so the resolver stays deterministic and testable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle classification of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    /// Window has not opened yet.
    ComingSoon,
    /// Window is open and inventory remains.
    Active,
    /// Window is open but inventory is exhausted.
    SoldOut,
    /// Window has closed.
    Expired,
}

impl DealStatus {
    /// Resolve the status for a deal window and inventory count at `now`.
    ///
    /// Checks apply in strict priority order; time takes precedence over
    /// inventory, so a deal that is both past its window and out of stock
    /// resolves `Expired`. Boundary equality stays inside the window:
    /// `now == start` is not `ComingSoon` and `now == end` is not `Expired`.
    #[must_use]
    pub fn resolve(
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        quantity_remaining: i32,
        now: DateTime<Utc>,
    ) -> Self {
        if now < start_date {
            return Self::ComingSoon;
        }

        if now > end_date {
            return Self::Expired;
        }

        if quantity_remaining <= 0 {
            return Self::SoldOut;
        }

        Self::Active
    }

    /// Whether the deal can currently be purchased.
    #[must_use]
    pub const fn is_purchasable(self) -> bool {
        matches!(self, Self::Active)
    }

    /// The status as its wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ComingSoon => "coming_soon",
            Self::Active => "active",
            Self::SoldOut => "sold_out",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for DealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn before_window_is_coming_soon() {
        let now = t();
        let status = DealStatus::resolve(
            now + Duration::hours(1),
            now + Duration::hours(2),
            5,
            now,
        );
        assert_eq!(status, DealStatus::ComingSoon);
    }

    #[test]
    fn inside_window_with_stock_is_active() {
        let now = t();
        let status = DealStatus::resolve(
            now - Duration::hours(1),
            now + Duration::hours(1),
            5,
            now,
        );
        assert_eq!(status, DealStatus::Active);
    }

    #[test]
    fn inside_window_without_stock_is_sold_out() {
        let now = t();
        let status = DealStatus::resolve(
            now - Duration::hours(1),
            now + Duration::hours(1),
            0,
            now,
        );
        assert_eq!(status, DealStatus::SoldOut);
    }

    #[test]
    fn past_window_is_expired() {
        let now = t();
        let status = DealStatus::resolve(
            now - Duration::hours(2),
            now - Duration::hours(1),
            5,
            now,
        );
        assert_eq!(status, DealStatus::Expired);
    }

    #[test]
    fn time_takes_precedence_over_inventory() {
        // Past the window AND out of stock: must be Expired, not SoldOut
        let now = t();
        let status = DealStatus::resolve(
            now - Duration::hours(2),
            now - Duration::hours(1),
            0,
            now,
        );
        assert_eq!(status, DealStatus::Expired);
    }

    #[test]
    fn start_boundary_is_inside_the_window() {
        let now = t();
        let status = DealStatus::resolve(now, now + Duration::hours(1), 5, now);
        assert_eq!(status, DealStatus::Active);
    }

    #[test]
    fn end_boundary_is_inside_the_window() {
        let now = t();
        let status = DealStatus::resolve(now - Duration::hours(1), now, 5, now);
        assert_eq!(status, DealStatus::Active);
    }

    #[test]
    fn negative_inventory_counts_as_sold_out() {
        let now = t();
        let status = DealStatus::resolve(
            now - Duration::hours(1),
            now + Duration::hours(1),
            -3,
            now,
        );
        assert_eq!(status, DealStatus::SoldOut);
    }

    #[test]
    fn is_purchasable_only_when_active() {
        assert!(DealStatus::Active.is_purchasable());
        assert!(!DealStatus::ComingSoon.is_purchasable());
        assert!(!DealStatus::SoldOut.is_purchasable());
        assert!(!DealStatus::Expired.is_purchasable());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&DealStatus::ComingSoon).expect("serialize");
        assert_eq!(json, "\"coming_soon\"");
    }
}
