use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Partial change set applied uniformly to every entry of a batch update.
///
/// `project_id` distinguishes an absent field from an explicit `null`:
/// `Some(None)` clears the project, and with it the task and the
/// denormalized client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeEntryChanges {
    #[serde(default)]
    pub member_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    pub project_id: Option<Option<Uuid>>,
    #[serde(default)]
    pub task_id: Option<Uuid>,
    #[serde(default)]
    pub billable: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<Uuid>>,
}

/// Deserializer for `Option<Option<T>>` fields: an absent field stays
/// `None` (via `#[serde(default)]`), a present field becomes `Some(inner)`
/// even when the inner value is `null`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
