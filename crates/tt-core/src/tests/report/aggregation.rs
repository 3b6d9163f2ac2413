use crate::{AggregateParams, GroupKind, TimeEntry, aggregate};

use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use uuid::Uuid;

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

fn params() -> AggregateParams {
    AggregateParams {
        timezone: Tz::UTC,
        week_start: Weekday::Mon,
        now: ts("2024-06-01T00:00:00Z"),
        start: None,
        end: None,
        fill_gaps: false,
    }
}

fn entry(member_id: Uuid, start: &str, end: &str, project_id: Option<Uuid>) -> TimeEntry {
    let mut entry = TimeEntry::new(Uuid::new_v4(), member_id, ts(start));
    entry.end = Some(ts(end));
    entry.project_id = project_id;
    entry
}

#[test]
fn test_ungrouped_aggregate_is_a_single_total() {
    let member = Uuid::new_v4();
    let entries = vec![
        entry(member, "2024-01-01T10:00:00Z", "2024-01-01T10:00:10Z", None),
        entry(member, "2024-01-01T11:00:00Z", "2024-01-01T11:00:20Z", None),
    ];

    let root = aggregate(&entries, None, None, &params());

    assert_eq!(root.seconds, 30);
    assert_eq!(root.cost, 0);
    assert_eq!(root.grouped_type, None);
    assert_eq!(root.grouped_data, None);
    assert_eq!(root.key, None);
}

#[test]
fn test_two_level_day_project_tree() {
    let member = Uuid::new_v4();
    let website = Uuid::new_v4();
    let backend = Uuid::new_v4();

    // 10 s for every day and project combination, newest first.
    let entries = vec![
        entry(member, "2024-01-02T09:00:00Z", "2024-01-02T09:00:10Z", Some(website)),
        entry(member, "2024-01-02T08:00:00Z", "2024-01-02T08:00:10Z", Some(backend)),
        entry(member, "2024-01-01T09:00:00Z", "2024-01-01T09:00:10Z", Some(website)),
        entry(member, "2024-01-01T08:00:00Z", "2024-01-01T08:00:10Z", Some(backend)),
    ];

    let root = aggregate(
        &entries,
        Some(GroupKind::Day),
        Some(GroupKind::Project),
        &params(),
    );

    assert_eq!(root.seconds, 40);
    assert_eq!(root.grouped_type, Some("day".to_string()));
    assert_eq!(root.key, None);

    let days = root.grouped_data.as_ref().unwrap();
    assert_eq!(days.len(), 2);

    // Most recent day first
    assert_eq!(days[0].key, Some("2024-01-02".to_string()));
    assert_eq!(days[1].key, Some("2024-01-01".to_string()));

    for day in days {
        assert_eq!(day.seconds, 20);
        assert_eq!(day.grouped_type, Some("project".to_string()));

        let projects = day.grouped_data.as_ref().unwrap();
        assert_eq!(projects.len(), 2);
        let child_sum: i64 = projects.iter().map(|node| node.seconds).sum();
        assert_eq!(day.seconds, child_sum);
        for project in projects {
            assert_eq!(project.seconds, 10);
            assert_eq!(project.grouped_type, None);
            assert_eq!(project.grouped_data, None);
        }
    }
}

#[test]
fn test_entity_buckets_keep_first_appearance_order_with_none_last() {
    let member = Uuid::new_v4();
    let website = Uuid::new_v4();
    let backend = Uuid::new_v4();

    let entries = vec![
        entry(member, "2024-01-01T12:00:00Z", "2024-01-01T12:00:10Z", None),
        entry(member, "2024-01-01T11:00:00Z", "2024-01-01T11:00:10Z", Some(website)),
        entry(member, "2024-01-01T10:00:00Z", "2024-01-01T10:00:10Z", Some(backend)),
        entry(member, "2024-01-01T09:00:00Z", "2024-01-01T09:00:10Z", Some(website)),
    ];

    let root = aggregate(&entries, Some(GroupKind::Project), None, &params());
    let projects = root.grouped_data.as_ref().unwrap();

    assert_eq!(projects.len(), 3);
    assert_eq!(projects[0].key, Some(website.to_string()));
    assert_eq!(projects[0].seconds, 20);
    assert_eq!(projects[1].key, Some(backend.to_string()));
    assert_eq!(projects[1].seconds, 10);
    // Entries without a project land in a trailing bucket without a key
    assert_eq!(projects[2].key, None);
    assert_eq!(projects[2].seconds, 10);
}

#[test]
fn test_billable_buckets_use_boolean_keys() {
    let member = Uuid::new_v4();
    let mut billable = entry(member, "2024-01-01T10:00:00Z", "2024-01-01T10:00:30Z", None);
    billable.billable = true;
    billable.billable_rate = Some(3600);
    let free = entry(member, "2024-01-01T09:00:00Z", "2024-01-01T09:00:30Z", None);

    let root = aggregate(
        &[billable, free],
        Some(GroupKind::Billable),
        None,
        &params(),
    );
    let buckets = root.grouped_data.as_ref().unwrap();

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].key, Some("true".to_string()));
    assert_eq!(buckets[0].cost, 30);
    assert_eq!(buckets[1].key, Some("false".to_string()));
    assert_eq!(buckets[1].cost, 0);
    assert_eq!(root.cost, 30);
}

#[test]
fn test_gap_filling_inserts_zero_buckets_in_range() {
    let member = Uuid::new_v4();
    let entries = vec![
        entry(member, "2024-01-03T10:00:00Z", "2024-01-03T10:00:10Z", None),
        entry(member, "2024-01-01T10:00:00Z", "2024-01-01T10:00:10Z", None),
    ];

    let mut params = params();
    params.start = Some(ts("2024-01-01T00:00:00Z"));
    params.end = Some(ts("2024-01-04T23:59:59Z"));
    params.fill_gaps = true;

    let root = aggregate(&entries, Some(GroupKind::Day), None, &params);
    let days = root.grouped_data.as_ref().unwrap();

    let keys: Vec<_> = days.iter().map(|node| node.key.clone().unwrap()).collect();
    assert_eq!(keys, ["2024-01-04", "2024-01-03", "2024-01-02", "2024-01-01"]);
    assert_eq!(days[0].seconds, 0);
    assert_eq!(days[2].seconds, 0);
    assert_eq!(root.seconds, 20);
}

#[test]
fn test_gap_filled_bucket_with_sub_group_has_no_children() {
    let member = Uuid::new_v4();
    let entries = vec![entry(
        member,
        "2024-01-01T10:00:00Z",
        "2024-01-01T10:00:10Z",
        None,
    )];

    let mut params = params();
    params.start = Some(ts("2024-01-01T00:00:00Z"));
    params.end = Some(ts("2024-01-02T23:59:59Z"));
    params.fill_gaps = true;

    let root = aggregate(
        &entries,
        Some(GroupKind::Day),
        Some(GroupKind::Member),
        &params,
    );
    let days = root.grouped_data.as_ref().unwrap();

    assert_eq!(days[0].key, Some("2024-01-02".to_string()));
    assert_eq!(days[0].seconds, 0);
    assert_eq!(days[0].grouped_type, Some("member".to_string()));
    assert_eq!(days[0].grouped_data, Some(Vec::new()));
}

#[test]
fn test_gap_filling_requires_both_bounds() {
    let member = Uuid::new_v4();
    let entries = vec![entry(
        member,
        "2024-01-03T10:00:00Z",
        "2024-01-03T10:00:10Z",
        None,
    )];

    let mut params = params();
    params.start = Some(ts("2024-01-01T00:00:00Z"));
    params.fill_gaps = true;

    let root = aggregate(&entries, Some(GroupKind::Day), None, &params);

    assert_eq!(root.grouped_data.as_ref().unwrap().len(), 1);
}

#[test]
fn test_week_buckets_descend_and_fill() {
    let member = Uuid::new_v4();
    // A Tuesday in week of Jan 1 and a Thursday in week of Jan 15
    let entries = vec![
        entry(member, "2024-01-18T10:00:00Z", "2024-01-18T10:01:00Z", None),
        entry(member, "2024-01-02T10:00:00Z", "2024-01-02T10:01:00Z", None),
    ];

    let mut params = params();
    params.start = Some(ts("2024-01-01T00:00:00Z"));
    params.end = Some(ts("2024-01-21T00:00:00Z"));
    params.fill_gaps = true;

    let root = aggregate(&entries, Some(GroupKind::Week), None, &params);
    let weeks = root.grouped_data.as_ref().unwrap();

    let keys: Vec<_> = weeks.iter().map(|node| node.key.clone().unwrap()).collect();
    assert_eq!(keys, ["2024-01-15", "2024-01-08", "2024-01-01"]);
    assert_eq!(weeks[0].seconds, 60);
    assert_eq!(weeks[1].seconds, 0);
    assert_eq!(weeks[2].seconds, 60);
}

#[test]
fn test_running_entry_counts_up_to_now() {
    let member = Uuid::new_v4();
    let mut running = TimeEntry::new(Uuid::new_v4(), member, ts("2024-05-31T23:59:00Z"));
    running.billable = true;
    running.billable_rate = Some(3600);

    // params().now is 2024-06-01T00:00:00Z, 60 s after the start
    let root = aggregate(&[running], None, None, &params());

    assert_eq!(root.seconds, 60);
    assert_eq!(root.cost, 60);
}

#[test]
fn test_same_input_aggregates_identically() {
    let member = Uuid::new_v4();
    let website = Uuid::new_v4();
    let entries = vec![
        entry(member, "2024-01-02T09:00:00Z", "2024-01-02T09:10:00Z", Some(website)),
        entry(member, "2024-01-01T09:00:00Z", "2024-01-01T09:05:00Z", None),
    ];

    let first = aggregate(&entries, Some(GroupKind::Day), Some(GroupKind::Project), &params());
    let second = aggregate(&entries, Some(GroupKind::Day), Some(GroupKind::Project), &params());

    assert_eq!(first, second);
}
