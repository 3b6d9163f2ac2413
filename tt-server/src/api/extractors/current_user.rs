//! Axum extractors for REST API authentication

use crate::ApiError;
use crate::state::AppState;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use tt_core::ErrorLocation;
use uuid::Uuid;

/// Extracts the authenticated user ID from the request.
///
/// Reads the `X-User-Id` header set by the authenticating reverse proxy.
/// Requests without a parseable header are rejected before any handler
/// logic runs.
pub struct CurrentUser(pub Uuid);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let headers = &parts.headers;

            #[allow(clippy::collapsible_if)]
            if let Some(header_value) = headers.get("X-User-Id") {
                if let Ok(user_id_str) = header_value.to_str() {
                    if let Ok(uuid) = Uuid::parse_str(user_id_str) {
                        log::debug!("Using user ID from X-User-Id header: {}", uuid);
                        return Ok(CurrentUser(uuid));
                    }
                    log::warn!("Invalid UUID in X-User-Id header: {}", user_id_str);
                }
            }

            Err(ApiError::Forbidden {
                message: "Missing or invalid X-User-Id header".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}
