use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppResult;

/// Campus account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

/// Read-only view of a registered user, as exposed by the user service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub role: Role,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Read-only user registry lookup.
///
/// The notification service reads this to resolve broadcast cohorts; it
/// never mutates the registry.
pub trait UserRegistry {
    fn get_all_users(&self) -> AppResult<Vec<UserRecord>>;
}

/// A fixed registry snapshot. Used in tests and by embedders that load the
/// user list upfront.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    users: Vec<UserRecord>,
}

impl StaticRegistry {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }
}

impl UserRegistry for StaticRegistry {
    fn get_all_users(&self) -> AppResult<Vec<UserRecord>> {
        Ok(self.users.clone())
    }
}
