use serde::{Deserialize, Serialize};

use doorbuster_core::UserId;

/// Session keys used with `tower_sessions`.
pub mod session_keys {
    /// Key under which the signed-in [`super::CurrentUser`] is stored.
    pub const CURRENT_USER: &str = "current_user";
}

/// The signed-in user as stored in the session.
///
/// `is_admin` is resolved against the allow-list at sign-in time so the
/// admin guard does not hit the database on every request.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub is_admin: bool,
}
