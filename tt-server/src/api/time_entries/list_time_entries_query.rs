use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Query string accepted by the list endpoint.
///
/// List-valued filters arrive as comma-separated UUID strings and are
/// parsed by the handler so a malformed value can name its parameter.
#[derive(Debug, Deserialize)]
pub struct ListTimeEntriesQuery {
    #[serde(default)]
    pub member_id: Option<String>,

    #[serde(default)]
    pub member_ids: Option<String>,

    /// Resolved to that user's membership in the organization
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub project_ids: Option<String>,

    #[serde(default)]
    pub task_ids: Option<String>,

    /// Matches entries carrying at least one of the listed tags
    #[serde(default)]
    pub tag_ids: Option<String>,

    /// true = only running entries, false = only finished entries
    #[serde(default)]
    pub active: Option<bool>,

    /// Inclusive lower bound on the entry's start instant
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,

    /// Inclusive upper bound on the entry's start instant
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,

    #[serde(default)]
    pub limit: Option<i64>,

    /// Trim the newest-first listing so no calendar day is split
    #[serde(default)]
    pub only_full_dates: Option<bool>,
}
