use chrono::{DateTime, Utc};

use campus_shared::errors::AppResult;
use campus_shared::storage::KeyValueStore;

use crate::models::{DeliveryStatus, Notification};
use crate::store::NotificationStore;

/// One sweep of the scheduled-delivery queue, invoked by an external
/// scheduler. This crate owns no timer.
///
/// Promotes every record with `scheduled_for <= now` that is still pending to
/// delivered, persists the collection once, and returns exactly the records
/// transitioned by this call. Delivered records are never revisited, so the
/// sweep is idempotent. Persistence errors propagate; the single array write
/// means there is no partial-commit state.
pub fn process_scheduled<S: KeyValueStore>(
    store: &NotificationStore<S>,
    now: DateTime<Utc>,
) -> AppResult<Vec<Notification>> {
    let mut all = store.get_all()?;

    let mut transitioned = Vec::new();
    for notification in all.iter_mut() {
        let due = notification.delivery_status == DeliveryStatus::Pending
            && notification.scheduled_for.is_some_and(|at| at <= now);
        if due {
            notification.delivery_status = DeliveryStatus::Delivered;
            transitioned.push(notification.clone());
        }
    }

    if !transitioned.is_empty() {
        store.replace_all(&all)?;
        tracing::debug!(count = transitioned.len(), "scheduled notifications delivered");
    }

    Ok(transitioned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewNotification, NotificationType};
    use crate::services::notification_service::create_notification;
    use campus_shared::storage::MemoryStore;
    use chrono::Duration;
    use uuid::Uuid;

    fn store() -> NotificationStore<MemoryStore> {
        NotificationStore::new(MemoryStore::new(), "notifications")
    }

    #[test]
    fn sweep_promotes_due_records_exactly_once() {
        let store = store();
        let due_at = Utc::now() + Duration::minutes(5);
        let created = create_notification(
            &store,
            NewNotification::new(
                Uuid::new_v4(),
                NotificationType::Event,
                "Seminar reminder",
                "Guest lecture in room 204",
            )
            .with_schedule(due_at),
        )
        .unwrap();

        // not due yet
        assert!(process_scheduled(&store, due_at - Duration::seconds(1))
            .unwrap()
            .is_empty());

        let first = process_scheduled(&store, due_at).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, created.id);
        assert_eq!(first[0].delivery_status, DeliveryStatus::Delivered);

        // idempotent: same or later `now` transitions nothing further
        assert!(process_scheduled(&store, due_at).unwrap().is_empty());
        assert!(process_scheduled(&store, due_at + Duration::seconds(1))
            .unwrap()
            .is_empty());

        let persisted = store.get_all().unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].delivery_status, DeliveryStatus::Delivered);
    }

    #[test]
    fn sweep_skips_unscheduled_and_future_records() {
        let store = store();
        let now = Utc::now();

        create_notification(
            &store,
            NewNotification::new(
                Uuid::new_v4(),
                NotificationType::Welcome,
                "Welcome",
                "Glad you are here",
            ),
        )
        .unwrap();
        let future = create_notification(
            &store,
            NewNotification::new(
                Uuid::new_v4(),
                NotificationType::Announcement,
                "Semester opening",
                "Classes resume next week",
            )
            .with_schedule(now + Duration::days(3)),
        )
        .unwrap();
        let due = create_notification(
            &store,
            NewNotification::new(
                Uuid::new_v4(),
                NotificationType::Announcement,
                "Fee deadline",
                "Tuition due today",
            )
            .with_schedule(now - Duration::hours(1)),
        )
        .unwrap();

        let transitioned = process_scheduled(&store, now).unwrap();
        assert_eq!(transitioned.len(), 1);
        assert_eq!(transitioned[0].id, due.id);

        let persisted = store.get_all().unwrap();
        let still_pending = persisted.iter().find(|n| n.id == future.id).unwrap();
        assert_eq!(still_pending.delivery_status, DeliveryStatus::Pending);
    }
}
