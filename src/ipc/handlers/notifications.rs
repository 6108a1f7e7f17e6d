use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{get_required_str, parse_field, with_store};
use crate::ipc::types::{AppState, Request};
use crate::store::{new_record_id, Notification, NotificationKind, Store};

#[derive(Debug, Deserialize)]
struct NewNotification {
    id: Option<String>,
    title: String,
    message: String,
    #[serde(rename = "type")]
    kind: NotificationKind,
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    read: bool,
}

/// Canned messages behind the "send test notification" buttons.
fn test_message(kind: NotificationKind) -> (&'static str, &'static str) {
    match kind {
        NotificationKind::Success => (
            "Payment Received",
            "Fee payment of ₹5000 from Aarav Sharma has been recorded",
        ),
        NotificationKind::Warning => ("Fee Overdue", "Fee for January 2025 is due from Priya Patel"),
        NotificationKind::Error => (
            "Attendance Alert",
            "Rohan Kumar has been absent for 3 consecutive classes",
        ),
        NotificationKind::Info => (
            "System Update",
            "New class \"12th Grade Physics\" has been created",
        ),
    }
}

fn notifications_list(
    store: &mut Store,
    _params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let mut sorted: Vec<&Notification> = store.notifications().iter().collect();
    // Stable, so equal timestamps keep insertion (newest-first) order.
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let unread = sorted.iter().filter(|n| !n.read).count();
    Ok(json!({ "notifications": sorted, "unreadCount": unread }))
}

fn notifications_add(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let new: NewNotification = parse_field(params, "notification")?;
    let notification = Notification {
        id: new.id.unwrap_or_else(new_record_id),
        title: new.title,
        message: new.message,
        kind: new.kind,
        timestamp: new.timestamp.unwrap_or_else(Utc::now),
        read: new.read,
    };
    store.add_notification(notification.clone());
    Ok(json!({ "notification": notification }))
}

fn notifications_send_test(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let kind: NotificationKind = parse_field(params, "type")?;
    let (title, message) = test_message(kind);
    let notification = Notification::new(title, message, kind);
    store.add_notification(notification.clone());
    Ok(json!({ "notification": notification }))
}

fn notifications_mark_read(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let id = get_required_str(params, "id")?;
    Ok(json!({ "updated": store.mark_notification_read(&id) }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "notifications.list" => Some(with_store(state, req, notifications_list)),
        "notifications.add" => Some(with_store(state, req, notifications_add)),
        "notifications.sendTest" => Some(with_store(state, req, notifications_send_test)),
        "notifications.markRead" => Some(with_store(state, req, notifications_mark_read)),
        _ => None,
    }
}
