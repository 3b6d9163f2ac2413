use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::member::Member;
use crate::models::organization::Organization;
use crate::models::project::Project;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub member_id: Uuid,
    pub project_id: Option<Uuid>,
    /// Only set when `project_id` is set; the task belongs to that project.
    pub task_id: Option<Uuid>,
    /// Denormalized from the project at write time, cleared with it.
    pub client_id: Option<Uuid>,

    pub start: DateTime<Utc>,
    /// `None` while the entry is still running.
    pub end: Option<DateTime<Utc>>,

    pub description: String,
    pub billable: bool,
    /// Hourly rate in minor currency units, resolved at write time.
    pub billable_rate: Option<i64>,
    pub tags: Vec<Uuid>,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TimeEntry {
    pub fn new(organization_id: Uuid, member_id: Uuid, start: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            organization_id,
            member_id,
            project_id: None,
            task_id: None,
            client_id: None,
            start,
            end: None,
            description: String::new(),
            billable: false,
            billable_rate: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.end.is_none()
    }

    /// Elapsed seconds, with `now` standing in for the end of a running
    /// entry. Clamped at zero.
    pub fn duration_seconds(&self, now: DateTime<Utc>) -> i64 {
        let end = self.end.unwrap_or(now);
        (end - self.start).num_seconds().max(0)
    }

    /// Cost in minor currency units: hourly rate times elapsed hours,
    /// rounded half away from zero per entry. Zero without a rate or for
    /// non-billable entries.
    pub fn cost(&self, now: DateTime<Utc>) -> i64 {
        if !self.billable {
            return 0;
        }
        match self.billable_rate {
            Some(rate) => {
                let hours = self.duration_seconds(now) as f64 / 3600.0;
                (rate as f64 * hours).round() as i64
            }
            None => 0,
        }
    }
}

/// Effective hourly rate for a new or changed entry: project rate, then
/// member rate, then the organization default. Non-billable entries carry
/// no rate at all.
pub fn resolve_billable_rate(
    billable: bool,
    project: Option<&Project>,
    member: &Member,
    organization: &Organization,
) -> Option<i64> {
    if !billable {
        return None;
    }
    project
        .and_then(|project| project.billable_rate)
        .or(member.billable_rate)
        .or(organization.billable_rate)
}
