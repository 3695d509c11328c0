//! Notification adapters.

use async_trait::async_trait;

use crate::domain::ports::{Notification, NotificationService};
use crate::error::AppError;

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Default)]
pub struct LoggingNotificationService;

#[async_trait]
impl NotificationService for LoggingNotificationService {
    async fn send(&self, notification: Notification) -> Result<(), AppError> {
        tracing::info!(
            member_id = %notification.member_id,
            subject = %notification.subject,
            body = %notification.body,
            "Notification sent"
        );
        Ok(())
    }
}
