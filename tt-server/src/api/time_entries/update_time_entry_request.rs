use chrono::{DateTime, Utc};
use serde::Deserialize;
use tt_core::double_option;
use uuid::Uuid;

/// Partial update for a single time entry. Absent fields keep their
/// stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateTimeEntryRequest {
    #[serde(default)]
    pub member_id: Option<Uuid>,

    /// Explicit `null` clears the project along with the task and the
    /// denormalized client
    #[serde(default, deserialize_with = "double_option")]
    pub project_id: Option<Option<Uuid>>,

    #[serde(default)]
    pub task_id: Option<Uuid>,

    #[serde(default)]
    pub start: Option<DateTime<Utc>>,

    /// Explicit `null` asks to restart the entry, which is rejected for
    /// entries that have already ended
    #[serde(default, deserialize_with = "double_option")]
    pub end: Option<Option<DateTime<Utc>>>,

    #[serde(default)]
    pub billable: Option<bool>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<Uuid>>,
}
