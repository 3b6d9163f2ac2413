use crate::{TimeEntry, clamp_to_full_days};

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

/// `count` one-minute entries on `day`, newest first.
fn day_of_entries(day: &str, count: usize) -> Vec<TimeEntry> {
    let base = ts(&format!("{day}T20:00:00Z"));
    (0..count)
        .map(|i| {
            let start = base - Duration::minutes(10 * i as i64);
            let mut entry = TimeEntry::new(Uuid::new_v4(), Uuid::new_v4(), start);
            entry.end = Some(start + Duration::minutes(1));
            entry
        })
        .collect()
}

#[test]
fn test_cuts_at_the_day_boundary_once_limit_is_reached() {
    let mut entries = day_of_entries("2024-01-02", 5);
    entries.extend(day_of_entries("2024-01-01", 3));

    let listing = clamp_to_full_days(entries, 5, Tz::UTC);

    assert_eq!(listing.entries.len(), 5);
    assert!(listing.days_over_limit.is_empty());
}

#[test]
fn test_finishes_the_day_past_the_limit() {
    let mut entries = day_of_entries("2024-01-02", 3);
    entries.extend(day_of_entries("2024-01-01", 3));

    let listing = clamp_to_full_days(entries, 5, Tz::UTC);

    // The second day started under the limit, so it is returned whole
    assert_eq!(listing.entries.len(), 6);
    assert!(listing.days_over_limit.is_empty());
}

#[test]
fn test_oversized_day_is_returned_whole_and_reported() {
    let mut entries = day_of_entries("2024-01-02", 7);
    entries.extend(day_of_entries("2024-01-01", 3));

    let listing = clamp_to_full_days(entries, 5, Tz::UTC);

    assert_eq!(listing.entries.len(), 7);
    assert_eq!(
        listing.days_over_limit,
        vec![("2024-01-02".parse().unwrap(), 7)]
    );
}

#[test]
fn test_empty_input() {
    let listing = clamp_to_full_days(Vec::new(), 5, Tz::UTC);

    assert!(listing.entries.is_empty());
    assert!(listing.days_over_limit.is_empty());
}

#[test]
fn test_days_are_local_to_the_given_timezone() {
    // 03:00 and 23:00 UTC on Jan 2: one UTC day, two New York days
    let first = {
        let mut entry = TimeEntry::new(Uuid::new_v4(), Uuid::new_v4(), ts("2024-01-02T23:00:00Z"));
        entry.end = Some(ts("2024-01-02T23:30:00Z"));
        entry
    };
    let second = {
        let mut entry = TimeEntry::new(Uuid::new_v4(), Uuid::new_v4(), ts("2024-01-02T03:00:00Z"));
        entry.end = Some(ts("2024-01-02T03:30:00Z"));
        entry
    };

    let new_york = "America/New_York".parse::<Tz>().unwrap();
    let listing = clamp_to_full_days(vec![first.clone(), second.clone()], 1, new_york);

    // 23:00 UTC is Jan 2 in New York, 03:00 UTC is still Jan 1
    assert_eq!(listing.entries.len(), 1);
    assert_eq!(listing.entries[0].id, first.id);

    let utc_listing = clamp_to_full_days(vec![first, second], 1, Tz::UTC);
    assert_eq!(utc_listing.entries.len(), 2);
}
