use crate::{Member, Organization, Project, TimeEntry, resolve_billable_rate};

use chrono::{DateTime, Utc};
use uuid::Uuid;

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

fn completed_entry(start: &str, end: &str) -> TimeEntry {
    let mut entry = TimeEntry::new(Uuid::new_v4(), Uuid::new_v4(), ts(start));
    entry.end = Some(ts(end));
    entry
}

#[test]
fn test_new_entry_is_running() {
    let entry = TimeEntry::new(Uuid::new_v4(), Uuid::new_v4(), Utc::now());

    assert!(entry.is_running());
    assert_eq!(entry.project_id, None);
    assert_eq!(entry.billable_rate, None);
    assert!(entry.tags.is_empty());
}

#[test]
fn test_duration_of_completed_entry() {
    let entry = completed_entry("2024-03-01T10:00:00Z", "2024-03-01T10:30:00Z");

    assert!(!entry.is_running());
    assert_eq!(entry.duration_seconds(ts("2024-03-05T00:00:00Z")), 1800);
}

#[test]
fn test_duration_of_running_entry_uses_now() {
    let entry = TimeEntry::new(Uuid::new_v4(), Uuid::new_v4(), ts("2024-03-01T10:00:00Z"));

    assert_eq!(entry.duration_seconds(ts("2024-03-01T10:02:00Z")), 120);
}

#[test]
fn test_duration_never_negative() {
    let entry = completed_entry("2024-03-01T10:00:00Z", "2024-03-01T09:00:00Z");

    assert_eq!(entry.duration_seconds(Utc::now()), 0);
}

#[test]
fn test_cost_is_rate_times_hours() {
    let mut entry = completed_entry("2024-03-01T10:00:00Z", "2024-03-01T10:30:00Z");
    entry.billable = true;
    entry.billable_rate = Some(6000);

    assert_eq!(entry.cost(Utc::now()), 3000);
}

#[test]
fn test_cost_rounds_half_away_from_zero() {
    // 1800 s at rate 1 is exactly 0.5 minor units
    let mut entry = completed_entry("2024-03-01T10:00:00Z", "2024-03-01T10:30:00Z");
    entry.billable = true;
    entry.billable_rate = Some(1);

    assert_eq!(entry.cost(Utc::now()), 1);
}

#[test]
fn test_cost_zero_without_rate_or_billable_flag() {
    let now = Utc::now();

    let mut entry = completed_entry("2024-03-01T10:00:00Z", "2024-03-01T11:00:00Z");
    entry.billable = true;
    assert_eq!(entry.cost(now), 0);

    entry.billable = false;
    entry.billable_rate = Some(6000);
    assert_eq!(entry.cost(now), 0);
}

#[test]
fn test_rate_resolution_prefers_project() {
    let mut organization = Organization::new("Acme");
    organization.billable_rate = Some(1000);
    let mut member = Member::new(organization.id, Uuid::new_v4(), "employee");
    member.billable_rate = Some(2000);
    let mut project = Project::new(organization.id, "Website");
    project.billable_rate = Some(3000);

    let rate = resolve_billable_rate(true, Some(&project), &member, &organization);
    assert_eq!(rate, Some(3000));
}

#[test]
fn test_rate_resolution_falls_back_to_member_then_organization() {
    let mut organization = Organization::new("Acme");
    organization.billable_rate = Some(1000);
    let mut member = Member::new(organization.id, Uuid::new_v4(), "employee");
    member.billable_rate = Some(2000);
    let project = Project::new(organization.id, "Website");

    assert_eq!(
        resolve_billable_rate(true, Some(&project), &member, &organization),
        Some(2000)
    );

    member.billable_rate = None;
    assert_eq!(
        resolve_billable_rate(true, Some(&project), &member, &organization),
        Some(1000)
    );

    organization.billable_rate = None;
    assert_eq!(
        resolve_billable_rate(true, Some(&project), &member, &organization),
        None
    );
}

#[test]
fn test_rate_resolution_skips_non_billable() {
    let mut organization = Organization::new("Acme");
    organization.billable_rate = Some(1000);
    let member = Member::new(organization.id, Uuid::new_v4(), "employee");

    assert_eq!(resolve_billable_rate(false, None, &member, &organization), None);
}
