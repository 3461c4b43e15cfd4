//! Push notifications and notification click handling.
//!
//! Both are best-effort duties: failures here never break the worker's
//! fetch routing.

/// Notification title shown for every push.
pub const NOTIFICATION_TITLE: &str = "Özlasteksan";
/// Body used when the push event carries no payload.
pub const DEFAULT_PUSH_BODY: &str = "Yeni bildirim";

/// Actions offered on a push notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    /// "Görüntüle" - focus or open the application.
    View,
    /// "Kapat" - dismiss only.
    Dismiss,
}

/// A rendered push notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub actions: Vec<NotificationAction>,
}

/// What the shell should do after a notification click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Focus an existing application window, or open one at the URL.
    FocusOrOpen(String),
    /// Close the notification and do nothing else.
    Dismissed,
}

/// Build the notification for a push event. `payload` is the optional
/// plain-text body; the fixed fallback is used when absent or blank.
#[must_use]
pub fn build_notification(payload: Option<&str>) -> Notification {
    let body = match payload {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => DEFAULT_PUSH_BODY.to_string(),
    };

    Notification {
        title: NOTIFICATION_TITLE.to_string(),
        body,
        icon: "/static/images/icons/icon-192x192.png".to_string(),
        badge: "/static/images/icons/icon-72x72.png".to_string(),
        actions: vec![NotificationAction::View, NotificationAction::Dismiss],
    }
}

/// Resolve a notification click into a shell action.
#[must_use]
pub fn notification_click(action: NotificationAction) -> ClickOutcome {
    match action {
        NotificationAction::View => ClickOutcome::FocusOrOpen("/".to_string()),
        NotificationAction::Dismiss => ClickOutcome::Dismissed,
    }
}
