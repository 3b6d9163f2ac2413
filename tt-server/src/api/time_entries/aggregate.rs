//! Time entry aggregation handler
//!
//! Fetches the scoped entries and hands them to the in-memory rollup in
//! tt-core. Grouping is resolved in the caller's timezone and week start.

use crate::{AggregateResponse, AggregateTimeEntriesQuery, ApiError, ApiResult, CurrentUser};
use crate::api::actor::resolve_actor;
use crate::api::time_entries::scope::{parse_uuid_list, resolve_member_scope};
use crate::state::AppState;

use tt_core::{AggregateParams, GroupKind, aggregate};
use tt_db::{TimeEntryFilter, TimeEntryRepository};

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use tt_core::ErrorLocation;
use uuid::Uuid;

/// GET /api/v1/organizations/{organization_id}/time-entries/aggregate
///
/// Roll the scoped entries up into grouped totals of seconds and cost.
pub async fn aggregate_time_entries(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(organization_id): Path<String>,
    Query(query): Query<AggregateTimeEntriesQuery>,
) -> ApiResult<Json<AggregateResponse>> {
    let organization_id = Uuid::parse_str(&organization_id)?;

    // 1. Parse the grouping controls
    let group = parse_group_kind(query.group.as_deref(), "group")?;
    let sub_group = parse_group_kind(query.sub_group.as_deref(), "sub_group")?;

    if sub_group.is_some() && group.is_none() {
        return Err(ApiError::Validation {
            message: "sub_group requires group".to_string(),
            field: Some("sub_group".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let fill_gaps = query.fill_gaps_in_time_groups.unwrap_or(false);
    let has_time_dimension = group.is_some_and(|g| g.is_time_dimension())
        || sub_group.is_some_and(|g| g.is_time_dimension());
    if fill_gaps && !has_time_dimension {
        return Err(ApiError::Validation {
            message: "fill_gaps_in_time_groups requires a day or week grouping".to_string(),
            field: Some("fill_gaps_in_time_groups".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let mut tx = state.pool.begin().await?;

    // 2. Resolve caller membership and the member scope of the query
    let actor = resolve_actor(&mut tx, user_id, organization_id).await?;
    let member_scope = resolve_member_scope(
        &mut tx,
        &actor,
        query.member_id.as_deref(),
        query.member_ids.as_deref(),
        query.user_id.as_deref(),
    )
    .await?;

    // 3. Assemble the filter
    let mut filter = TimeEntryFilter::new(organization_id);
    filter.member_ids = member_scope;
    if let Some(raw) = query.project_ids.as_deref() {
        filter.project_ids = Some(parse_uuid_list(raw, "project_ids")?);
    }
    if let Some(raw) = query.task_ids.as_deref() {
        filter.task_ids = Some(parse_uuid_list(raw, "task_ids")?);
    }
    if let Some(raw) = query.tag_ids.as_deref() {
        filter.tag_ids = Some(parse_uuid_list(raw, "tag_ids")?);
    }
    filter.active = query.active;
    filter.start = query.start;
    filter.end = query.end;

    // 4. Fetch and roll up
    let entries = TimeEntryRepository::list(&mut *tx, &filter).await?;
    tx.commit().await?;

    let params = AggregateParams {
        timezone: actor.user.tz(),
        week_start: actor.user.week_start_day(),
        now: Utc::now(),
        start: query.start,
        end: query.end,
        fill_gaps,
    };
    let aggregation = aggregate(&entries, group, sub_group, &params);

    Ok(Json(AggregateResponse { aggregation }))
}

fn parse_group_kind(raw: Option<&str>, field: &str) -> ApiResult<Option<GroupKind>> {
    match raw {
        Some(value) => value
            .parse::<GroupKind>()
            .map(Some)
            .map_err(|_| ApiError::Validation {
                message: format!("Invalid {} '{}'", field, value),
                field: Some(field.to_string()),
                location: ErrorLocation::from(Location::caller()),
            }),
        None => Ok(None),
    }
}
