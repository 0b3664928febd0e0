//! Shared domain types.

pub mod deal;
pub mod id;
pub mod notification;
pub mod purchase;
pub mod status;

pub use deal::{Deal, DealValidationError, NewDeal, UpdateDeal};
pub use id::{DealId, NotificationId, PurchaseId, UserId};
pub use notification::{NewNotification, Notification, NotificationType};
pub use purchase::{Purchase, PurchaseStatus};
pub use status::DealStatus;
