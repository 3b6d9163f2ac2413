use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateTimeEntryRequest {
    /// Member the entry is recorded for
    pub member_id: Uuid,

    pub start: DateTime<Utc>,

    /// Omit to start a running timer
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,

    #[serde(default)]
    pub project_id: Option<Uuid>,

    /// Requires `project_id`; the task must belong to that project
    #[serde(default)]
    pub task_id: Option<Uuid>,

    #[serde(default)]
    pub billable: bool,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<Uuid>,
}
