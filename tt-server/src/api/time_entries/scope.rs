//! Member scope resolution for list and aggregate requests
//!
//! A query may only touch entries of members the caller is allowed to see.
//! This module folds the caller's view permission together with the
//! requested member filters into one set of member ids, or rejects the
//! request when a filter points outside the organization.

use crate::{ApiError, ApiResult};
use crate::api::actor::Actor;

use tt_core::Permission;
use tt_db::MemberRepository;

use std::collections::HashSet;
use std::panic::Location;

use sqlx::SqliteConnection;
use tt_core::ErrorLocation;
use uuid::Uuid;

// =============================================================================
// Query Parameter Parsing
// =============================================================================

/// Parse a single UUID query parameter.
///
/// # Errors
/// `ApiError::Validation` naming `field` when the value is not a UUID.
pub fn parse_uuid_param(raw: &str, field: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation {
        message: format!("Invalid UUID '{}' in {}", raw, field),
        field: Some(field.to_string()),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Parse a comma-separated UUID list query parameter.
///
/// Empty segments are skipped, so trailing commas are harmless.
///
/// # Errors
/// `ApiError::Validation` naming `field` on the first malformed element.
pub fn parse_uuid_list(raw: &str, field: &str) -> ApiResult<Vec<Uuid>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            Uuid::parse_str(part).map_err(|_| ApiError::Validation {
                message: format!("Invalid UUID '{}' in {}", part, field),
                field: Some(field.to_string()),
                location: ErrorLocation::from(Location::caller()),
            })
        })
        .collect()
}

// =============================================================================
// Member Scope
// =============================================================================

/// Resolve the member ids a list or aggregate query is allowed to cover.
///
/// All requested member filters must resolve inside the actor's
/// organization. When several are present their intersection applies, and
/// a caller without "view all" is additionally restricted to their own
/// member id. `Ok(None)` means unrestricted (no filter, "view all" actor).
///
/// # Errors
/// - `ApiError::Forbidden` if the actor has neither view permission
/// - `ApiError::Validation` naming the parameter that is malformed or
///   references another organization
pub async fn resolve_member_scope(
    conn: &mut SqliteConnection,
    actor: &Actor,
    member_id: Option<&str>,
    member_ids: Option<&str>,
    user_id: Option<&str>,
) -> ApiResult<Option<Vec<Uuid>>> {
    let member = &actor.member;
    let view_all = member.has_permission(Permission::ViewAll);

    if !view_all && !member.has_permission(Permission::ViewOwn) {
        return Err(ApiError::Forbidden {
            message: format!("Member {} may not view time entries", member.id),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let mut selections: Vec<Vec<Uuid>> = Vec::new();

    if let Some(raw) = member_id {
        let id = parse_uuid_param(raw, "member_id")?;
        ensure_members_in_organization(&mut *conn, &[id], member.organization_id, "member_id")
            .await?;
        selections.push(vec![id]);
    }

    if let Some(raw) = member_ids {
        let ids = parse_uuid_list(raw, "member_ids")?;
        ensure_members_in_organization(&mut *conn, &ids, member.organization_id, "member_ids")
            .await?;
        selections.push(ids);
    }

    if let Some(raw) = user_id {
        let id = parse_uuid_param(raw, "user_id")?;
        let target =
            MemberRepository::find_by_user_and_organization(&mut *conn, id, member.organization_id)
                .await?
                .ok_or_else(|| ApiError::Validation {
                    message: format!("User {} is not a member of this organization", id),
                    field: Some("user_id".to_string()),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        selections.push(vec![target.id]);
    }

    // Callers without "view all" only ever see their own entries
    if !view_all {
        selections.push(vec![member.id]);
    }

    if selections.is_empty() {
        return Ok(None);
    }

    let mut scope = selections.remove(0);
    for selection in selections {
        let keep: HashSet<Uuid> = selection.into_iter().collect();
        scope.retain(|id| keep.contains(id));
    }

    let mut seen = HashSet::new();
    scope.retain(|id| seen.insert(*id));

    Ok(Some(scope))
}

/// Reject ids that do not belong to a member of the organization.
async fn ensure_members_in_organization(
    conn: &mut SqliteConnection,
    ids: &[Uuid],
    organization_id: Uuid,
    field: &str,
) -> ApiResult<()> {
    let known: HashSet<Uuid> =
        MemberRepository::filter_ids_in_organization(&mut *conn, ids, organization_id)
            .await?
            .into_iter()
            .collect();

    if let Some(unknown) = ids.iter().find(|id| !known.contains(id)) {
        return Err(ApiError::Validation {
            message: format!("Member {} does not belong to this organization", unknown),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}
