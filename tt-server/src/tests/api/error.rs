use crate::ApiError;

use std::panic::Location;

use axum::response::IntoResponse;
use http::StatusCode;
use http_body_util::BodyExt;
use tt_core::ErrorLocation;

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let error = ApiError::NotFound {
        message: "Time entry not found".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Time entry not found");
}

#[tokio::test]
async fn test_forbidden_returns_403() {
    let error = ApiError::Forbidden {
        message: "Not a member".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_validation_error_returns_422_with_field() {
    let error = ApiError::Validation {
        message: "Member does not belong to this organization".into(),
        field: Some("member_id".into()),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "member_id");
}

#[tokio::test]
async fn test_validation_error_without_field_omits_field_key() {
    let error = ApiError::Validation {
        message: "Invalid UUID format".into(),
        field: None,
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_bad_request_returns_400_with_domain_code() {
    let error = ApiError::BadRequest {
        code: "TIME_ENTRY_STILL_RUNNING",
        message: "Member already has a running time entry".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "TIME_ENTRY_STILL_RUNNING");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::Internal {
        message: "Database connection failed".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn test_uuid_error_converts_to_validation() {
    let uuid_err = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
    let api_err: ApiError = uuid_err.into();

    match api_err {
        ApiError::Validation { message, field, .. } => {
            assert!(message.contains("Invalid UUID"));
            assert!(field.is_none());
        }
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_row_not_found_converts_to_not_found() {
    let db_err = tt_db::DbError::from(sqlx::Error::RowNotFound);
    let api_err: ApiError = db_err.into();

    assert!(matches!(api_err, ApiError::NotFound { .. }));
}
