//! Batch update coordinator
//!
//! One change set applied to many entries. The change set is validated
//! once up front; each entry is then authorized and persisted in its own
//! transaction so one rejected id cannot take down the rest of the batch.

use crate::{ApiError, ApiResult, CurrentUser, UpdateMultipleRequest, UpdateMultipleResponse};
use crate::api::actor::resolve_actor;
use crate::api::time_entries::references;
use crate::state::AppState;

use tt_core::Permission;
use tt_db::{OrganizationRepository, TimeEntryRepository};

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use tt_core::ErrorLocation;

use uuid::Uuid;

/// PATCH /api/v1/organizations/{organization_id}/time-entries
///
/// Apply one change set to every listed entry. Outcomes are reported per
/// id: persisted entries land in `success`, rejected ones in `error`.
pub async fn update_multiple_time_entries(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(organization_id): Path<String>,
    Json(req): Json<UpdateMultipleRequest>,
) -> ApiResult<Json<UpdateMultipleResponse>> {
    let organization_id = Uuid::parse_str(&organization_id)?;
    let changes = &req.changes;

    let mut conn = state.pool.acquire().await?;

    // 1. Resolve caller and check update permission
    let actor = resolve_actor(&mut conn, user_id, organization_id).await?;
    let update_all = actor.member.has_permission(Permission::UpdateAll);
    let update_own = actor.member.has_permission(Permission::UpdateOwn);
    if !update_all && !update_own {
        return Err(ApiError::Forbidden {
            message: format!("Member {} may not update time entries", actor.member.id),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // 2. Validate the change set once, before touching any entry
    if let Some(member_id) = changes.member_id {
        references::ensure_member_in_organization(&mut conn, member_id, organization_id).await?;
    }
    let new_project = match changes.project_id {
        Some(Some(project_id)) => Some(
            references::ensure_project_in_organization(&mut conn, project_id, organization_id)
                .await?,
        ),
        _ => None,
    };
    if let Some(task_id) = changes.task_id {
        let project = new_project.as_ref().ok_or_else(|| ApiError::Validation {
            message: "task_id requires project_id in the same change set".to_string(),
            field: Some("task_id".to_string()),
            location: ErrorLocation::from(Location::caller()),
        })?;
        references::ensure_task_in_project(&mut conn, task_id, project.id, organization_id)
            .await?;
    }
    if let Some(tags) = &changes.tags {
        references::ensure_tags_in_organization(&mut conn, tags, organization_id).await?;
    }

    let organization = OrganizationRepository::find_by_id(&mut *conn, organization_id)
        .await?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Organization {} has no row", organization_id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    // Hand the connection back before the per-entry transactions start
    drop(conn);

    let rate_inputs_changed =
        changes.member_id.is_some() || changes.project_id.is_some() || changes.billable.is_some();
    let now = Utc::now();

    let mut success = Vec::new();
    let mut error = Vec::new();

    // 3. Each entry gets its own transaction; committed entries stay
    // committed no matter what happens to later ids
    for id in &req.ids {
        let mut tx = state.pool.begin().await?;

        let Some(mut entry) = TimeEntryRepository::find_by_id(&mut *tx, *id).await? else {
            error.push(id.to_string());
            continue;
        };

        if entry.organization_id != organization_id {
            error.push(id.to_string());
            continue;
        }

        // Per-entry authorization: update-all, or own entries without
        // reassignment to someone else
        let owns = entry.member_id == actor.member.id;
        let reassigning = changes.member_id.is_some_and(|m| m != actor.member.id);
        if !(update_all || (update_own && owns && !reassigning)) {
            error.push(id.to_string());
            continue;
        }

        let original_member_id = entry.member_id;

        if let Some(member_id) = changes.member_id {
            entry.member_id = member_id;
        }

        match changes.project_id {
            None => {}
            Some(None) => {
                entry.project_id = None;
                entry.task_id = None;
                entry.client_id = None;
            }
            Some(Some(project_id)) => {
                if entry.project_id != Some(project_id) {
                    entry.project_id = Some(project_id);
                    if changes.task_id.is_none() {
                        entry.task_id = None;
                    }
                }
                entry.client_id = new_project.as_ref().and_then(|p| p.client_id);
                if let Some(task_id) = changes.task_id {
                    entry.task_id = Some(task_id);
                }
            }
        }

        if let Some(billable) = changes.billable {
            entry.billable = billable;
        }
        if let Some(description) = &changes.description {
            entry.description = description.clone();
        }
        if let Some(tags) = &changes.tags {
            entry.tags = tags.clone();
        }

        // A reassigned running entry still honors one running entry per member
        if entry.is_running()
            && entry.member_id != original_member_id
            && let Some(running) =
                TimeEntryRepository::find_running(&mut *tx, entry.member_id).await?
            && running.id != entry.id
        {
            error.push(id.to_string());
            continue;
        }

        if rate_inputs_changed {
            entry.billable_rate =
                references::recompute_billable_rate(&mut tx, &entry, &organization).await?;
        }

        entry.updated_at = now;
        TimeEntryRepository::update(&mut *tx, &entry).await?;
        tx.commit().await?;
        success.push(id.to_string());
    }

    Ok(Json(UpdateMultipleResponse { success, error }))
}
