use crate::{GroupKind, TimeEntry, start_of_week};

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use uuid::Uuid;

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

fn date(value: &str) -> NaiveDate {
    value.parse().unwrap()
}

fn entry_starting(start: &str) -> TimeEntry {
    TimeEntry::new(Uuid::new_v4(), Uuid::new_v4(), ts(start))
}

#[test]
fn test_parse_all_dimensions() {
    assert_eq!("day".parse::<GroupKind>().unwrap(), GroupKind::Day);
    assert_eq!("week".parse::<GroupKind>().unwrap(), GroupKind::Week);
    assert_eq!("member".parse::<GroupKind>().unwrap(), GroupKind::Member);
    assert_eq!("project".parse::<GroupKind>().unwrap(), GroupKind::Project);
    assert_eq!("task".parse::<GroupKind>().unwrap(), GroupKind::Task);
    assert_eq!("billable".parse::<GroupKind>().unwrap(), GroupKind::Billable);
}

#[test]
fn test_parse_rejects_unknown_dimension() {
    assert!("client".parse::<GroupKind>().is_err());
    assert!("Day".parse::<GroupKind>().is_err());
}

#[test]
fn test_time_dimensions() {
    assert!(GroupKind::Day.is_time_dimension());
    assert!(GroupKind::Week.is_time_dimension());
    assert!(!GroupKind::Member.is_time_dimension());
    assert!(!GroupKind::Billable.is_time_dimension());
}

#[test]
fn test_day_key_uses_requesting_timezone() {
    // 03:00 UTC is still the previous evening in New York
    let entry = entry_starting("2024-01-02T03:00:00Z");

    let utc_key = GroupKind::Day.bucket_key(&entry, Tz::UTC, Weekday::Mon);
    let ny_key = GroupKind::Day.bucket_key(
        &entry,
        "America/New_York".parse::<Tz>().unwrap(),
        Weekday::Mon,
    );

    assert_eq!(utc_key, Some("2024-01-02".to_string()));
    assert_eq!(ny_key, Some("2024-01-01".to_string()));
}

#[test]
fn test_week_key_respects_week_start() {
    // 2024-01-03 is a Wednesday
    let entry = entry_starting("2024-01-03T12:00:00Z");

    let monday_week = GroupKind::Week.bucket_key(&entry, Tz::UTC, Weekday::Mon);
    let sunday_week = GroupKind::Week.bucket_key(&entry, Tz::UTC, Weekday::Sun);

    assert_eq!(monday_week, Some("2024-01-01".to_string()));
    assert_eq!(sunday_week, Some("2023-12-31".to_string()));
}

#[test]
fn test_entity_keys() {
    let mut entry = entry_starting("2024-01-03T12:00:00Z");
    let project_id = Uuid::new_v4();

    assert_eq!(
        GroupKind::Member.bucket_key(&entry, Tz::UTC, Weekday::Mon),
        Some(entry.member_id.to_string())
    );
    assert_eq!(GroupKind::Project.bucket_key(&entry, Tz::UTC, Weekday::Mon), None);
    assert_eq!(GroupKind::Task.bucket_key(&entry, Tz::UTC, Weekday::Mon), None);

    entry.project_id = Some(project_id);
    assert_eq!(
        GroupKind::Project.bucket_key(&entry, Tz::UTC, Weekday::Mon),
        Some(project_id.to_string())
    );

    entry.billable = true;
    assert_eq!(
        GroupKind::Billable.bucket_key(&entry, Tz::UTC, Weekday::Mon),
        Some("true".to_string())
    );
}

#[test]
fn test_start_of_week_is_identity_on_the_start_day() {
    // 2024-01-07 is a Sunday
    assert_eq!(
        start_of_week(date("2024-01-07"), Weekday::Sun),
        date("2024-01-07")
    );
    assert_eq!(
        start_of_week(date("2024-01-07"), Weekday::Mon),
        date("2024-01-01")
    );
}
