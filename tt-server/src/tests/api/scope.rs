use crate::{ApiError, parse_uuid_list, parse_uuid_param};

use uuid::Uuid;

#[test]
fn test_parse_uuid_param_accepts_canonical_form() {
    let id = Uuid::new_v4();

    let parsed = parse_uuid_param(&id.to_string(), "member_id").unwrap();

    assert_eq!(parsed, id);
}

#[test]
fn test_parse_uuid_param_names_the_field() {
    let err = parse_uuid_param("nope", "member_id").unwrap_err();

    match err {
        ApiError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("member_id")),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_parse_uuid_list_splits_on_commas() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    let ids = parse_uuid_list(&format!("{},{}", first, second), "member_ids").unwrap();

    assert_eq!(ids, vec![first, second]);
}

#[test]
fn test_parse_uuid_list_skips_empty_segments() {
    let id = Uuid::new_v4();

    let ids = parse_uuid_list(&format!(" {} , ,", id), "member_ids").unwrap();

    assert_eq!(ids, vec![id]);
}

#[test]
fn test_parse_uuid_list_rejects_malformed_element() {
    let id = Uuid::new_v4();

    let err = parse_uuid_list(&format!("{},broken", id), "tag_ids").unwrap_err();

    match err {
        ApiError::Validation { field, message, .. } => {
            assert_eq!(field.as_deref(), Some("tag_ids"));
            assert!(message.contains("broken"));
        }
        _ => panic!("Expected Validation error"),
    }
}
