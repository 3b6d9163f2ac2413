//! Referential integrity checks for caller-supplied ids
//!
//! Create and update requests may reference members, projects, tasks and
//! tags by id. Every reference must resolve inside the acting
//! organization before it is written to an entry.

use crate::{ApiError, ApiResult};

use tt_core::{Member, Organization, Project, Task, TimeEntry, resolve_billable_rate};
use tt_db::{MemberRepository, ProjectRepository, TagRepository, TaskRepository};

use std::collections::HashSet;
use std::panic::Location;

use sqlx::SqliteConnection;
use tt_core::ErrorLocation;
use uuid::Uuid;

pub(crate) async fn ensure_member_in_organization(
    conn: &mut SqliteConnection,
    member_id: Uuid,
    organization_id: Uuid,
) -> ApiResult<Member> {
    MemberRepository::find_by_id(&mut *conn, member_id)
        .await?
        .filter(|member| member.organization_id == organization_id)
        .ok_or_else(|| ApiError::Validation {
            message: format!("Member {} does not belong to this organization", member_id),
            field: Some("member_id".to_string()),
            location: ErrorLocation::from(Location::caller()),
        })
}

pub(crate) async fn ensure_project_in_organization(
    conn: &mut SqliteConnection,
    project_id: Uuid,
    organization_id: Uuid,
) -> ApiResult<Project> {
    ProjectRepository::find_by_id(&mut *conn, project_id)
        .await?
        .filter(|project| project.organization_id == organization_id)
        .ok_or_else(|| ApiError::Validation {
            message: format!("Project {} does not belong to this organization", project_id),
            field: Some("project_id".to_string()),
            location: ErrorLocation::from(Location::caller()),
        })
}

pub(crate) async fn ensure_task_in_project(
    conn: &mut SqliteConnection,
    task_id: Uuid,
    project_id: Uuid,
    organization_id: Uuid,
) -> ApiResult<Task> {
    TaskRepository::find_by_id(&mut *conn, task_id)
        .await?
        .filter(|task| task.organization_id == organization_id && task.project_id == project_id)
        .ok_or_else(|| ApiError::Validation {
            message: format!("Task {} does not belong to the selected project", task_id),
            field: Some("task_id".to_string()),
            location: ErrorLocation::from(Location::caller()),
        })
}

pub(crate) async fn ensure_tags_in_organization(
    conn: &mut SqliteConnection,
    tag_ids: &[Uuid],
    organization_id: Uuid,
) -> ApiResult<()> {
    let known: HashSet<Uuid> =
        TagRepository::filter_ids_in_organization(&mut *conn, tag_ids, organization_id)
            .await?
            .into_iter()
            .collect();

    if let Some(unknown) = tag_ids.iter().find(|id| !known.contains(id)) {
        return Err(ApiError::Validation {
            message: format!("Tag {} does not belong to this organization", unknown),
            field: Some("tags".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}

/// Re-derive the frozen billable rate after member, project or billable
/// changed on an entry.
///
/// The member row is loaded fresh so a reassigned entry picks up the new
/// member's rate.
pub(crate) async fn recompute_billable_rate(
    conn: &mut SqliteConnection,
    entry: &TimeEntry,
    organization: &Organization,
) -> ApiResult<Option<i64>> {
    let member = MemberRepository::find_by_id(&mut *conn, entry.member_id)
        .await?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Time entry {} references missing member {}", entry.id, entry.member_id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let project = match entry.project_id {
        Some(project_id) => ProjectRepository::find_by_id(&mut *conn, project_id).await?,
        None => None,
    };

    Ok(resolve_billable_rate(
        entry.billable,
        project.as_ref(),
        &member,
        organization,
    ))
}
