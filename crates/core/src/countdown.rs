//! Remaining-time formatting for deal deadlines.
//!
//! Both functions are pure: callers (typically a once-per-second UI timer)
//! pass `now` in and re-invoke as time advances. Nothing here holds state.

use chrono::{DateTime, Utc};

/// Zero-padded two-digit components of the time remaining until a deadline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CountdownParts {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl CountdownParts {
    fn zero() -> Self {
        Self {
            days: "00".to_string(),
            hours: "00".to_string(),
            minutes: "00".to_string(),
            seconds: "00".to_string(),
        }
    }
}

/// Break the time remaining until `end` into padded day/hour/minute/second
/// strings. All four fields are `"00"` once the deadline has passed.
#[must_use]
pub fn remaining_breakdown(end: DateTime<Utc>, now: DateTime<Utc>) -> CountdownParts {
    let remaining = end - now;
    let total_seconds = remaining.num_seconds();

    if total_seconds <= 0 {
        return CountdownParts::zero();
    }

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    CountdownParts {
        days: format!("{days:02}"),
        hours: format!("{hours:02}"),
        minutes: format!("{minutes:02}"),
        seconds: format!("{seconds:02}"),
    }
}

/// Coarse human-readable label for the time remaining until `end`.
///
/// The coarsest applicable unit wins: whole days beyond tomorrow, then the
/// exact-one-day "tomorrow" phrasing, then hours with minutes, then minutes.
#[must_use]
pub fn remaining_label(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = end - now;
    let total_seconds = remaining.num_seconds();

    if total_seconds <= 0 {
        return "Deal ended".to_string();
    }

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;

    if days > 1 {
        return format!("Ends in {days} days");
    }

    if days == 1 {
        return "Ends tomorrow".to_string();
    }

    if hours > 0 {
        return format!("Ends in {hours}h {minutes}m");
    }

    format!("Ends in {minutes}m")
}

/// Format a price for display, e.g. `$19.99`.
#[must_use]
pub fn format_price(price: rust_decimal::Decimal) -> String {
    format!("${price:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn t() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn breakdown_at_deadline_is_all_zeros() {
        let now = t();
        assert_eq!(remaining_breakdown(now, now), CountdownParts::zero());
    }

    #[test]
    fn breakdown_past_deadline_is_all_zeros() {
        let now = t();
        assert_eq!(
            remaining_breakdown(now - Duration::hours(3), now),
            CountdownParts::zero()
        );
    }

    #[test]
    fn breakdown_of_ninety_seconds() {
        let now = t();
        let parts = remaining_breakdown(now + Duration::seconds(90), now);
        assert_eq!(parts.days, "00");
        assert_eq!(parts.hours, "00");
        assert_eq!(parts.minutes, "01");
        assert_eq!(parts.seconds, "30");
    }

    #[test]
    fn breakdown_spanning_every_unit() {
        let now = t();
        let end = now
            + Duration::days(2)
            + Duration::hours(3)
            + Duration::minutes(4)
            + Duration::seconds(5);
        let parts = remaining_breakdown(end, now);
        assert_eq!(parts.days, "02");
        assert_eq!(parts.hours, "03");
        assert_eq!(parts.minutes, "04");
        assert_eq!(parts.seconds, "05");
    }

    #[test]
    fn label_after_deadline() {
        let now = t();
        assert_eq!(remaining_label(now - Duration::seconds(1), now), "Deal ended");
        assert_eq!(remaining_label(now, now), "Deal ended");
    }

    #[test]
    fn label_multiple_days() {
        let now = t();
        assert_eq!(
            remaining_label(now + Duration::days(3) + Duration::hours(1), now),
            "Ends in 3 days"
        );
    }

    #[test]
    fn label_exactly_tomorrow() {
        let now = t();
        assert_eq!(
            remaining_label(now + Duration::hours(25), now),
            "Ends tomorrow"
        );
    }

    #[test]
    fn label_hours_and_minutes() {
        let now = t();
        assert_eq!(
            remaining_label(now + Duration::hours(2) + Duration::minutes(15), now),
            "Ends in 2h 15m"
        );
    }

    #[test]
    fn label_minutes_only() {
        let now = t();
        assert_eq!(
            remaining_label(now + Duration::minutes(40), now),
            "Ends in 40m"
        );
    }

    #[test]
    fn price_formatting_pads_cents() {
        assert_eq!(format_price(Decimal::new(1999, 2)), "$19.99");
        assert_eq!(format_price(Decimal::new(50, 1)), "$5.00");
    }
}
