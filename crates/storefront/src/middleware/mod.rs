//! Request middleware and extractors.

pub mod auth;
pub mod session;

pub use auth::{OptionalUser, RequireAdmin, RequireUser};
pub use session::{create_session_layer, session_store};
