/*
[INPUT]:  Page numbers and JWT authentication
[OUTPUT]: Notification feed pages, unread counts, read receipts
[POS]:    HTTP layer - notification endpoints (require JWT auth)
[UPDATE]: When adding new notification endpoints or changing query parameters
*/

use reqwest::Method;

use crate::http::client::reject_unless_success;
use crate::http::{DispoClient, Result};
use crate::types::{Notification, NotificationFeed, UnreadCount};

impl DispoClient {
    /// Fetch one page of the notification feed, read entries included.
    /// Page numbers start at 1; callers append pages for infinite scroll.
    ///
    /// GET /notifications?page={page}&includeRead=true
    pub async fn get_notifications(&self, page: u32) -> Result<NotificationFeed> {
        let endpoint = format!("/notifications?page={}&includeRead=true", page);
        let value: serde_json::Value = self
            .authed_raw::<serde_json::Value, ()>(Method::GET, &endpoint, None)
            .await?;

        reject_unless_success(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Count of unread notifications, for the badge
    ///
    /// GET /notifications/unread-count
    pub async fn unread_count(&self) -> Result<u64> {
        let data: UnreadCount = self.authed_get("/notifications/unread-count").await?;
        Ok(data.unread_count)
    }

    /// Mark a notification as read
    ///
    /// PUT /notifications/{notificationId}/read
    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<Notification> {
        let endpoint = format!("/notifications/{}/read", notification_id);
        self.authed_data::<Notification, ()>(Method::PUT, &endpoint, None)
            .await
    }
}
