use chrono::Utc;
use uuid::Uuid;

use campus_shared::errors::{AppError, AppResult};
use campus_shared::storage::KeyValueStore;
use campus_shared::types::UserRegistry;

use crate::models::{Broadcast, DeliveryStatus, NewNotification, Notification};
use crate::store::NotificationStore;

/// Create a single notification and append it to the store.
///
/// The recipient is not checked against the user registry: notifications may
/// legitimately precede user existence (pre-provisioned welcome messages).
pub fn create_notification<S: KeyValueStore>(
    store: &NotificationStore<S>,
    new: NewNotification,
) -> AppResult<Notification> {
    if new.title.trim().is_empty() {
        return Err(AppError::validation("notification title must not be blank"));
    }
    if new.message.trim().is_empty() {
        return Err(AppError::validation("notification message must not be blank"));
    }

    let delivery_status = if new.scheduled_for.is_some() {
        DeliveryStatus::Pending
    } else {
        DeliveryStatus::Delivered
    };

    let notification = Notification {
        id: Uuid::now_v7(),
        user_id: new.user_id,
        kind: new.kind,
        title: new.title,
        message: new.message,
        timestamp: Utc::now(),
        read: false,
        priority: new.priority,
        from: new.from,
        link: new.link,
        scheduled_for: new.scheduled_for,
        target_group: new.target_group,
        delivery_status,
        pinned: false,
    };

    let mut all = store.get_all()?;
    all.push(notification.clone());
    store.replace_all(&all)?;

    tracing::debug!(
        notification_id = %notification.id,
        user_id = %notification.user_id,
        kind = ?notification.kind,
        delivery_status = ?notification.delivery_status,
        "notification created"
    );

    Ok(notification)
}

/// Fan out one notification per user in the resolved target cohort.
///
/// `target_group` of `None` reaches every registered user. An empty registry
/// yields an empty result, not an error. Records are created in registry
/// iteration order.
pub fn broadcast_notification<S: KeyValueStore>(
    store: &NotificationStore<S>,
    registry: &impl UserRegistry,
    broadcast: Broadcast,
) -> AppResult<Vec<Notification>> {
    let now = Utc::now();
    let users = registry.get_all_users()?;

    let mut created = Vec::new();
    for user in users {
        let in_cohort = broadcast
            .target_group
            .map_or(true, |group| group.matches(&user, now));
        if !in_cohort {
            continue;
        }

        let new = NewNotification {
            user_id: user.id,
            kind: broadcast.kind,
            title: broadcast.title.clone(),
            message: broadcast.message.clone(),
            priority: broadcast.priority,
            from: broadcast.from.clone(),
            link: None,
            scheduled_for: broadcast.scheduled_for,
            target_group: broadcast.target_group,
        };
        created.push(create_notification(store, new)?);
    }

    tracing::info!(
        count = created.len(),
        target_group = ?broadcast.target_group,
        kind = ?broadcast.kind,
        "broadcast dispatched"
    );

    Ok(created)
}

/// Mark a single notification as read. Returns false without error when the
/// id does not exist; read never reverts to false.
pub fn mark_read<S: KeyValueStore>(
    store: &NotificationStore<S>,
    notification_id: Uuid,
) -> AppResult<bool> {
    let mut all = store.get_all()?;

    let Some(notification) = all.iter_mut().find(|n| n.id == notification_id) else {
        return Ok(false);
    };
    notification.read = true;

    store.replace_all(&all)?;
    Ok(true)
}

/// Mark every notification for a user as read. Returns how many flipped;
/// other users' records are untouched.
pub fn mark_all_read<S: KeyValueStore>(
    store: &NotificationStore<S>,
    user_id: Uuid,
) -> AppResult<usize> {
    let mut all = store.get_all()?;

    let mut updated = 0;
    for notification in all.iter_mut().filter(|n| n.user_id == user_id && !n.read) {
        notification.read = true;
        updated += 1;
    }

    if updated > 0 {
        store.replace_all(&all)?;
    }

    Ok(updated)
}

/// Count unread notifications for a user.
pub fn count_unread<S: KeyValueStore>(
    store: &NotificationStore<S>,
    user_id: Uuid,
) -> AppResult<usize> {
    let all = store.get_all()?;
    Ok(all.iter().filter(|n| n.user_id == user_id && !n.read).count())
}

/// Delete a single notification. Returns false without error when the id
/// does not exist.
pub fn delete_notification<S: KeyValueStore>(
    store: &NotificationStore<S>,
    notification_id: Uuid,
) -> AppResult<bool> {
    let mut all = store.get_all()?;

    let before = all.len();
    all.retain(|n| n.id != notification_id);
    if all.len() == before {
        return Ok(false);
    }

    store.replace_all(&all)?;
    tracing::debug!(notification_id = %notification_id, "notification deleted");
    Ok(true)
}

/// Drop the entire collection, for every user.
pub fn clear_all<S: KeyValueStore>(store: &NotificationStore<S>) -> AppResult<()> {
    store.replace_all(&[])
}
