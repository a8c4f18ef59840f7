use campus_shared::errors::AppResult;
use campus_shared::storage::KeyValueStore;
use uuid::Uuid;

use crate::models::Notification;

/// Authoritative flat collection of all notifications across all users,
/// persisted as one JSON array under a single storage key.
///
/// Every mutation is a whole-collection read-modify-write with last-writer-wins
/// semantics. This assumes a single active writer; concurrent writers from
/// separate processes can lose updates. Deployments needing real multi-writer
/// concurrency must move to a store with per-row updates and transactions.
pub struct NotificationStore<S: KeyValueStore> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> NotificationStore<S> {
    pub fn new(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Load the full collection.
    ///
    /// An absent key or an undecodable payload yields the empty collection;
    /// a failing backend propagates as a storage error.
    pub fn get_all(&self) -> AppResult<Vec<Notification>> {
        let Some(raw) = self.kv.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(notifications) => Ok(notifications),
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "corrupt notification payload, treating collection as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the entire collection. The only write primitive: every
    /// mutation above this layer goes through here.
    pub fn replace_all(&self, notifications: &[Notification]) -> AppResult<()> {
        let raw = serde_json::to_string(notifications).map_err(anyhow::Error::from)?;
        self.kv.set(&self.key, &raw)?;
        Ok(())
    }

    /// Notifications for one recipient, pinned first, newest first.
    pub fn get_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let mut notifications = self.get_all()?;
        notifications.retain(|n| n.user_id == user_id);
        notifications.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then(b.timestamp.cmp(&a.timestamp))
                .then(b.id.cmp(&a.id))
        });
        Ok(notifications)
    }
}
