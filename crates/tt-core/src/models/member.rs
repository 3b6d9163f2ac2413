use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's membership in one organization. All time entries hang off the
/// membership, not the user, so the same person can track time in several
/// organizations without the data mixing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    /// Member-specific hourly rate, minor units. Overridden per project,
    /// falls back to the organization default.
    pub billable_rate: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(organization_id: Uuid, user_id: Uuid, role: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            user_id,
            role: role.to_string(),
            billable_rate: None,
            created_at: Utc::now(),
        }
    }

    /// Role-based grants. Unknown role strings hold no permissions.
    pub fn has_permission(&self, required: Permission) -> bool {
        matches!(
            (self.role.as_str(), required),
            ("owner" | "admin", _)
                | (
                    "manager",
                    Permission::ViewAll
                        | Permission::ViewOwn
                        | Permission::CreateOwn
                        | Permission::UpdateOwn
                        | Permission::DeleteOwn
                )
                | (
                    "employee",
                    Permission::ViewOwn
                        | Permission::CreateOwn
                        | Permission::UpdateOwn
                        | Permission::DeleteOwn
                )
        )
    }
}

/// Time-entry permissions, split into own-entries and all-entries grants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Permission {
    ViewOwn,
    ViewAll,
    CreateOwn,
    CreateAll,
    UpdateOwn,
    UpdateAll,
    DeleteOwn,
    DeleteAll,
}
