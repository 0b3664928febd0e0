//! Doorbuster Core - Shared types library.
//!
//! This crate provides the domain types used across Doorbuster components:
//! - `storefront` - The flash-deal storefront service
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Deal status resolution and countdown
//! formatting live here because they are pure computations over deal fields.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, deals, notifications, purchases, statuses
//! - [`countdown`] - Remaining-time breakdown and human-readable labels

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod countdown;
pub mod types;

pub use types::*;
