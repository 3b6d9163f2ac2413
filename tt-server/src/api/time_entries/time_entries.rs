//! Time Entry REST API handlers
//!
//! List, create, update and delete run inside one transaction each, so
//! permission checks and the rows they guard cannot drift apart mid-request.

use crate::{
    ApiError, ApiResult, CreateTimeEntryRequest, CurrentUser, ListTimeEntriesQuery, TimeEntryDto,
    TimeEntryListResponse, TimeEntryResponse, UpdateTimeEntryRequest,
};
use crate::api::actor::resolve_actor;
use crate::api::time_entries::references;
use crate::api::time_entries::scope::{parse_uuid_list, resolve_member_scope};
use crate::state::AppState;

use tt_config::{DEFAULT_TIME_ENTRIES_LIMIT, MAX_TIME_ENTRIES_LIMIT};
use tt_core::{Permission, TimeEntry, clamp_to_full_days, resolve_billable_rate};
use tt_db::{OrganizationRepository, TimeEntryFilter, TimeEntryRepository};

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use tt_core::ErrorLocation;
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/organizations/{organization_id}/time-entries
///
/// List the entries visible to the caller, newest first by start instant.
pub async fn list_time_entries(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(organization_id): Path<String>,
    Query(query): Query<ListTimeEntriesQuery>,
) -> ApiResult<Json<TimeEntryListResponse>> {
    let organization_id = Uuid::parse_str(&organization_id)?;

    let mut tx = state.pool.begin().await?;

    // 1. Resolve caller membership and the member scope of the query
    let actor = resolve_actor(&mut tx, user_id, organization_id).await?;
    let member_scope = resolve_member_scope(
        &mut tx,
        &actor,
        query.member_id.as_deref(),
        query.member_ids.as_deref(),
        query.user_id.as_deref(),
    )
    .await?;

    // 2. Validate the limit
    let limit = match query.limit {
        Some(limit) if !(1..=MAX_TIME_ENTRIES_LIMIT).contains(&limit) => {
            return Err(ApiError::Validation {
                message: format!("limit must be between 1 and {}", MAX_TIME_ENTRIES_LIMIT),
                field: Some("limit".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Some(limit) => limit,
        None => DEFAULT_TIME_ENTRIES_LIMIT,
    };

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

    // 4. Fetch, trimming to whole calendar days when requested
    let entries = if query.only_full_dates.unwrap_or(false) {
        let candidates = TimeEntryRepository::list(&mut *tx, &filter).await?;
        let listing = clamp_to_full_days(candidates, limit as usize, actor.user.tz());
        for (date, count) in &listing.days_over_limit {
            log::warn!(
                "User has has more than 5 time entries on one date (user={}, date={}, count={})",
                actor.user.id,
                date,
                count
            );
        }
        listing.entries
    } else {
        filter.limit = Some(limit);
        TimeEntryRepository::list(&mut *tx, &filter).await?
    };

    tx.commit().await?;

    Ok(Json(TimeEntryListResponse {
        time_entries: entries.into_iter().map(TimeEntryDto::from).collect(),
    }))
}

/// POST /api/v1/organizations/{organization_id}/time-entries
///
/// Record a time entry, or start a running timer when `end` is omitted.
pub async fn create_time_entry(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(organization_id): Path<String>,
    Json(req): Json<CreateTimeEntryRequest>,
) -> ApiResult<(StatusCode, Json<TimeEntryResponse>)> {
    let organization_id = Uuid::parse_str(&organization_id)?;

    let mut tx = state.pool.begin().await?;

    // 1. Resolve caller and check create permission
    let actor = resolve_actor(&mut tx, user_id, organization_id).await?;
    let create_all = actor.member.has_permission(Permission::CreateAll);
    let create_own = actor.member.has_permission(Permission::CreateOwn);
    if !(create_all || (create_own && req.member_id == actor.member.id)) {
        return Err(ApiError::Forbidden {
            message: format!(
                "Member {} may not create time entries for member {}",
                actor.member.id, req.member_id
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // 2. Validate references against the organization
    let member =
        references::ensure_member_in_organization(&mut tx, req.member_id, organization_id).await?;

    if let Some(end) = req.end
        && end < req.start
    {
        return Err(ApiError::Validation {
            message: "end must not be before start".to_string(),
            field: Some("end".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let project = match req.project_id {
        Some(project_id) => Some(
            references::ensure_project_in_organization(&mut tx, project_id, organization_id)
                .await?,
        ),
        None => None,
    };

    if let Some(task_id) = req.task_id {
        let project_id = req.project_id.ok_or_else(|| ApiError::Validation {
            message: "task_id requires a project_id".to_string(),
            field: Some("task_id".to_string()),
            location: ErrorLocation::from(Location::caller()),
        })?;
        references::ensure_task_in_project(&mut tx, task_id, project_id, organization_id).await?;
    }

    if !req.tags.is_empty() {
        references::ensure_tags_in_organization(&mut tx, &req.tags, organization_id).await?;
    }

    // 3. A member may only have one running entry
    if req.end.is_none()
        && let Some(running) = TimeEntryRepository::find_running(&mut *tx, req.member_id).await?
    {
        return Err(ApiError::BadRequest {
            code: "TIME_ENTRY_STILL_RUNNING",
            message: format!("Member already has a running time entry {}", running.id),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // 4. Assemble the entry with its frozen rate
    let organization = OrganizationRepository::find_by_id(&mut *tx, organization_id)
        .await?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Organization {} has no row", organization_id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let mut entry = TimeEntry::new(organization_id, req.member_id, req.start);
    entry.end = req.end;
    entry.project_id = req.project_id;
    entry.task_id = req.task_id;
    entry.client_id = project.as_ref().and_then(|p| p.client_id);
    entry.billable = req.billable;
    entry.billable_rate =
        resolve_billable_rate(req.billable, project.as_ref(), &member, &organization);
    entry.description = req.description;
    entry.tags = req.tags;

    // 5. Persist
    TimeEntryRepository::create(&mut *tx, &entry).await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(TimeEntryResponse {
            time_entry: entry.into(),
        }),
    ))
}

/// PUT /api/v1/organizations/{organization_id}/time-entries/{id}
///
/// Update a single entry. Absent fields keep their stored values.
pub async fn update_time_entry(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path((organization_id, id)): Path<(String, String)>,
    Json(req): Json<UpdateTimeEntryRequest>,
) -> ApiResult<Json<TimeEntryResponse>> {
    let organization_id = Uuid::parse_str(&organization_id)?;
    let entry_id = Uuid::parse_str(&id)?;

    let mut tx = state.pool.begin().await?;

    // 1. Resolve caller and load the entry
    let actor = resolve_actor(&mut tx, user_id, organization_id).await?;
    let mut entry = TimeEntryRepository::find_by_id(&mut *tx, entry_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Time entry {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    if entry.organization_id != organization_id {
        return Err(ApiError::Forbidden {
            message: format!("Time entry {} belongs to another organization", id),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // 2. Authorization: update-all, or own entries without reassignment
    let update_all = actor.member.has_permission(Permission::UpdateAll);
    let update_own = actor.member.has_permission(Permission::UpdateOwn);
    let owns = entry.member_id == actor.member.id;
    let reassigning = req.member_id.is_some_and(|m| m != actor.member.id);
    if !(update_all || (update_own && owns && !reassigning)) {
        return Err(ApiError::Forbidden {
            message: format!(
                "Member {} may not update time entry {}",
                actor.member.id, id
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // 3. Completed entries never go back to running
    if req.end == Some(None) && entry.end.is_some() {
        return Err(ApiError::BadRequest {
            code: "TIME_ENTRY_CAN_NOT_BE_RESTARTED",
            message: format!("Time entry {} has already ended", id),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let original_member_id = entry.member_id;
    let mut rate_inputs_changed = false;

    // 4. Apply member change
    if let Some(member_id) = req.member_id
        && member_id != entry.member_id
    {
        references::ensure_member_in_organization(&mut tx, member_id, organization_id).await?;
        entry.member_id = member_id;
        rate_inputs_changed = true;
    }

    // 5. Apply project and task changes
    match req.project_id {
        None => {
            if let Some(task_id) = req.task_id {
                let project_id = entry.project_id.ok_or_else(|| ApiError::Validation {
                    message: "task_id requires a project".to_string(),
                    field: Some("task_id".to_string()),
                    location: ErrorLocation::from(Location::caller()),
                })?;
                references::ensure_task_in_project(&mut tx, task_id, project_id, organization_id)
                    .await?;
                entry.task_id = Some(task_id);
            }
        }
        Some(None) => {
            if req.task_id.is_some() {
                return Err(ApiError::Validation {
                    message: "task_id requires a project".to_string(),
                    field: Some("task_id".to_string()),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            if entry.project_id.is_some() {
                rate_inputs_changed = true;
            }
            entry.project_id = None;
            entry.task_id = None;
            entry.client_id = None;
        }
        Some(Some(project_id)) => {
            let project =
                references::ensure_project_in_organization(&mut tx, project_id, organization_id)
                    .await?;
            if entry.project_id != Some(project_id) {
                entry.project_id = Some(project_id);
                rate_inputs_changed = true;
                // The old project's task makes no sense under the new one
                if req.task_id.is_none() {
                    entry.task_id = None;
                }
            }
            entry.client_id = project.client_id;
            if let Some(task_id) = req.task_id {
                references::ensure_task_in_project(&mut tx, task_id, project_id, organization_id)
                    .await?;
                entry.task_id = Some(task_id);
            }
        }
    }

    // 6. Apply time bounds
    if let Some(start) = req.start {
        entry.start = start;
    }
    if let Some(Some(end)) = req.end {
        entry.end = Some(end);
    }
    if let Some(end) = entry.end
        && end < entry.start
    {
        return Err(ApiError::Validation {
            message: "end must not be before start".to_string(),
            field: Some("end".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // 7. Apply remaining fields
    if let Some(billable) = req.billable
        && billable != entry.billable
    {
        entry.billable = billable;
        rate_inputs_changed = true;
    }
    if let Some(description) = req.description {
        entry.description = description;
    }
    if let Some(tags) = req.tags {
        references::ensure_tags_in_organization(&mut tx, &tags, organization_id).await?;
        entry.tags = tags;
    }

    // 8. A reassigned running entry still honors one running entry per member
    if entry.is_running()
        && entry.member_id != original_member_id
        && let Some(running) = TimeEntryRepository::find_running(&mut *tx, entry.member_id).await?
        && running.id != entry.id
    {
        return Err(ApiError::BadRequest {
            code: "TIME_ENTRY_STILL_RUNNING",
            message: format!("Member already has a running time entry {}", running.id),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // 9. Refresh the frozen rate when its inputs changed
    if rate_inputs_changed {
        let organization = OrganizationRepository::find_by_id(&mut *tx, organization_id)
            .await?
            .ok_or_else(|| ApiError::Internal {
                message: format!("Organization {} has no row", organization_id),
                location: ErrorLocation::from(Location::caller()),
            })?;
        entry.billable_rate =
            references::recompute_billable_rate(&mut tx, &entry, &organization).await?;
    }

    // 10. Persist
    entry.updated_at = Utc::now();
    TimeEntryRepository::update(&mut *tx, &entry).await?;
    tx.commit().await?;

    Ok(Json(TimeEntryResponse {
        time_entry: entry.into(),
    }))
}

/// DELETE /api/v1/organizations/{organization_id}/time-entries/{id}
///
/// Soft-delete an entry so listings and reports stop seeing it.
pub async fn delete_time_entry(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path((organization_id, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let organization_id = Uuid::parse_str(&organization_id)?;
    let entry_id = Uuid::parse_str(&id)?;

    let mut tx = state.pool.begin().await?;

    // 1. Resolve caller and load the entry
    let actor = resolve_actor(&mut tx, user_id, organization_id).await?;
    let entry = TimeEntryRepository::find_by_id(&mut *tx, entry_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Time entry {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    if entry.organization_id != organization_id {
        return Err(ApiError::Forbidden {
            message: format!("Time entry {} belongs to another organization", id),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // 2. Authorization
    let delete_all = actor.member.has_permission(Permission::DeleteAll);
    let delete_own = actor.member.has_permission(Permission::DeleteOwn);
    if !(delete_all || (delete_own && entry.member_id == actor.member.id)) {
        return Err(ApiError::Forbidden {
            message: format!(
                "Member {} may not delete time entry {}",
                actor.member.id, id
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // 3. Soft delete
    TimeEntryRepository::soft_delete(&mut *tx, entry.id, Utc::now()).await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
