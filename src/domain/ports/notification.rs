//! Outbound member notifications.

use async_trait::async_trait;

use crate::domain::value_objects::MemberId;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub member_id: MemberId,
    pub subject: String,
    pub body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<(), AppError>;
}
