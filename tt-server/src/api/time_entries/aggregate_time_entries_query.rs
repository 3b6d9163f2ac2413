use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Query string accepted by the aggregate endpoint.
///
/// Carries the same scope filters as the list endpoint plus the grouping
/// controls. `group` and `sub_group` name dimensions from
/// `tt_core::GroupKind`.
#[derive(Debug, Deserialize)]
pub struct AggregateTimeEntriesQuery {
    #[serde(default)]
    pub group: Option<String>,

    /// Requires `group`
    #[serde(default)]
    pub sub_group: Option<String>,

    /// Insert empty buckets for time spans without entries. Requires a
    /// time dimension in `group` or `sub_group` plus both range bounds.
    #[serde(default)]
    pub fill_gaps_in_time_groups: Option<bool>,

    #[serde(default)]
    pub member_id: Option<String>,

    #[serde(default)]
    pub member_ids: Option<String>,

    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub project_ids: Option<String>,

    #[serde(default)]
    pub task_ids: Option<String>,

    #[serde(default)]
    pub tag_ids: Option<String>,

    #[serde(default)]
    pub active: Option<bool>,

    #[serde(default)]
    pub start: Option<DateTime<Utc>>,

    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}
