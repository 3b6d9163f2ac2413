use tt_core::TimeEntry;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct TimeEntryDto {
    pub id: String,
    pub organization_id: String,
    pub member_id: String,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub client_id: Option<String>,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub description: String,
    pub billable: bool,
    pub billable_rate: Option<i64>,
    pub tags: Vec<String>,
    pub is_running: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TimeEntry> for TimeEntryDto {
    fn from(entry: TimeEntry) -> Self {
        let is_running = entry.is_running();
        Self {
            id: entry.id.to_string(),
            organization_id: entry.organization_id.to_string(),
            member_id: entry.member_id.to_string(),
            project_id: entry.project_id.map(|id| id.to_string()),
            task_id: entry.task_id.map(|id| id.to_string()),
            client_id: entry.client_id.map(|id| id.to_string()),
            start: entry.start,
            end: entry.end,
            description: entry.description,
            billable: entry.billable,
            billable_rate: entry.billable_rate,
            tags: entry.tags.iter().map(Uuid::to_string).collect(),
            is_running,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}
