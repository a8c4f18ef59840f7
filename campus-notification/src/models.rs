use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_shared::types::{Role, UserRecord};

// --- Notification ---

/// Kinds of in-app notification the campus app produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Follow,
    Mention,
    Announcement,
    Welcome,
    ProfileUpdate,
    AdminMessage,
    Verification,
    Like,
    Share,
    Page,
    Event,
    Marketplace,
    Badge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// Delivery state of a notification.
///
/// The only implemented transition is Pending -> Delivered; Failed exists in
/// persisted payloads but no code path produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    #[default]
    Delivered,
    Failed,
}

/// Who triggered the notification, for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub from: Option<Sender>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub target_group: Option<TargetGroup>,
    #[serde(default)]
    pub delivery_status: DeliveryStatus,
    #[serde(default)]
    pub pinned: bool,
}

// --- Target groups ---

/// Broadcast cohorts. A closed set: every predicate is spelled out here, so
/// an unhandled group cannot reach the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetGroup {
    Students,
    Teachers,
    Verified,
    New,
}

impl TargetGroup {
    /// Whether `user` belongs to this cohort as of `now`.
    ///
    /// `New` means registered within the last 30 days, boundary inclusive.
    pub fn matches(&self, user: &UserRecord, now: DateTime<Utc>) -> bool {
        match self {
            Self::Students => user.role == Role::Student,
            Self::Teachers => user.role == Role::Teacher,
            Self::Verified => user.is_verified,
            Self::New => user.created_at >= now - Duration::days(30),
        }
    }
}

// --- Creation inputs ---

/// Input for creating a single notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub from: Option<Sender>,
    pub link: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub target_group: Option<TargetGroup>,
}

impl NewNotification {
    pub fn new(
        user_id: Uuid,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
            priority: Priority::default(),
            from: None,
            link: None,
            scheduled_for: None,
            target_group: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_from(mut self, from: Sender) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_schedule(mut self, scheduled_for: DateTime<Utc>) -> Self {
        self.scheduled_for = Some(scheduled_for);
        self
    }

    pub fn with_target_group(mut self, target_group: TargetGroup) -> Self {
        self.target_group = Some(target_group);
        self
    }
}

/// Input for a fan-out broadcast. `target_group` of `None` means all users.
#[derive(Debug, Clone)]
pub struct Broadcast {
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub from: Option<Sender>,
    pub target_group: Option<TargetGroup>,
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl Broadcast {
    pub fn new(
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            priority: Priority::default(),
            from: None,
            target_group: None,
            scheduled_for: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_from(mut self, from: Sender) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_target_group(mut self, target_group: TargetGroup) -> Self {
        self.target_group = Some(target_group);
        self
    }

    pub fn with_schedule(mut self, scheduled_for: DateTime<Utc>) -> Self {
        self.scheduled_for = Some(scheduled_for);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, is_verified: bool, created_at: DateTime<Utc>) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            role,
            is_verified,
            created_at,
        }
    }

    #[test]
    fn notification_type_serializes_snake_case() {
        let json = serde_json::to_string(&NotificationType::ProfileUpdate).unwrap();
        assert_eq!(json, "\"profile_update\"");

        let parsed: NotificationType = serde_json::from_str("\"admin_message\"").unwrap();
        assert_eq!(parsed, NotificationType::AdminMessage);
    }

    #[test]
    fn priority_and_status_defaults() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(DeliveryStatus::default(), DeliveryStatus::Delivered);
    }

    #[test]
    fn target_group_role_predicates() {
        let now = Utc::now();
        let student = user(Role::Student, false, now);
        let teacher = user(Role::Teacher, true, now);

        assert!(TargetGroup::Students.matches(&student, now));
        assert!(!TargetGroup::Students.matches(&teacher, now));
        assert!(TargetGroup::Teachers.matches(&teacher, now));
        assert!(!TargetGroup::Teachers.matches(&student, now));
        assert!(TargetGroup::Verified.matches(&teacher, now));
        assert!(!TargetGroup::Verified.matches(&student, now));
    }

    #[test]
    fn target_group_new_boundary_is_inclusive() {
        let now = Utc::now();
        let exactly_30_days = user(Role::Student, false, now - Duration::days(30));
        let just_over = user(Role::Student, false, now - Duration::days(30) - Duration::seconds(1));
        let recent = user(Role::Student, false, now - Duration::days(1));

        assert!(TargetGroup::New.matches(&exactly_30_days, now));
        assert!(!TargetGroup::New.matches(&just_over, now));
        assert!(TargetGroup::New.matches(&recent, now));
    }

    #[test]
    fn notification_json_uses_type_field_and_defaults() {
        let json = r#"{
            "id": "0191b2ca-1e6f-7d00-8000-000000000000",
            "user_id": "9f5a1e3c-8f7e-4a3c-9d2b-6c1a2b3c4d5e",
            "type": "welcome",
            "title": "Welcome",
            "message": "Glad you are here",
            "timestamp": "2025-01-01T00:00:00Z"
        }"#;

        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationType::Welcome);
        assert!(!n.read);
        assert!(!n.pinned);
        assert_eq!(n.priority, Priority::Medium);
        assert_eq!(n.delivery_status, DeliveryStatus::Delivered);
        assert_eq!(n.from, None);
    }
}
