//! Request actor resolution
//!
//! Every time-entry operation runs on behalf of a member of the target
//! organization. This module turns an authenticated user ID plus the
//! organization from the URL into that membership, or rejects the request.

use crate::{ApiError, ApiResult};

use tt_core::{Member, User};
use tt_db::{MemberRepository, UserRepository};

use std::panic::Location;

use sqlx::SqliteConnection;
use tt_core::ErrorLocation;
use uuid::Uuid;

/// The membership and user profile a request is acting as.
///
/// The member row carries the role used for permission checks; the user
/// row carries the timezone and week start used by reporting.
pub struct Actor {
    pub member: Member,
    pub user: User,
}

/// Resolve the calling user to their membership in the organization.
///
/// # Errors
/// - `ApiError::Forbidden` if the user has no membership in the organization
/// - `ApiError::Internal` if the membership references a missing user row
pub async fn resolve_actor(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    organization_id: Uuid,
) -> ApiResult<Actor> {
    let member = MemberRepository::find_by_user_and_organization(&mut *conn, user_id, organization_id)
        .await?
        .ok_or_else(|| ApiError::Forbidden {
            message: format!(
                "User {} is not a member of organization {}",
                user_id, organization_id
            ),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let user = UserRepository::find_by_id(&mut *conn, user_id)
        .await?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Member {} references missing user {}", member.id, user_id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Actor { member, user })
}
