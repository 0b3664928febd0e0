//! Doorbuster storefront library.
//!
//! Serves the flash-deal storefront API: scheduled deals enriched with live
//! Shopify product data, hosted-checkout hand-off, in-app notifications,
//! and purchase history, plus an admin surface for managing deals.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod middleware;
pub mod models;
pub mod notifications;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;
