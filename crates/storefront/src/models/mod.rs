//! Row and session types local to the service.

pub mod session;
pub mod user;

pub use session::CurrentUser;
pub use user::User;
