use crate::models::time_entry::TimeEntry;
use crate::report::group_kind::{GroupKind, start_of_week};

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

/// One node of the aggregation tree.
///
/// Every field is serialized on every node, in declaration order, so the
/// same request always produces byte-identical JSON. `grouped_type` and
/// `grouped_data` are set together on grouped nodes; `key` is set on every
/// node below the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationNode {
    pub seconds: i64,
    pub cost: i64,
    pub grouped_type: Option<String>,
    pub grouped_data: Option<Vec<AggregationNode>>,
    pub key: Option<String>,
}

/// Request-scoped inputs of one aggregation run.
///
/// `now` is sampled once per request so a running entry contributes the
/// same duration to every node of the tree.
#[derive(Debug, Clone, Copy)]
pub struct AggregateParams {
    pub timezone: Tz,
    pub week_start: Weekday,
    pub now: DateTime<Utc>,
    /// Requested range bounds. Gap filling needs both.
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub fill_gaps: bool,
}

/// Aggregates entries into a totals tree of up to two grouping levels.
///
/// The root carries the overall totals; a node's totals always equal the
/// sum of its children (gap-filled buckets are zero).
pub fn aggregate(
    entries: &[TimeEntry],
    group: Option<GroupKind>,
    sub_group: Option<GroupKind>,
    params: &AggregateParams,
) -> AggregationNode {
    let all: Vec<&TimeEntry> = entries.iter().collect();
    let (seconds, cost) = totals(&all, params.now);

    match group {
        None => AggregationNode {
            seconds,
            cost,
            grouped_type: None,
            grouped_data: None,
            key: None,
        },
        Some(kind) => AggregationNode {
            seconds,
            cost,
            grouped_type: Some(kind.as_str().to_string()),
            grouped_data: Some(group_level(&all, kind, sub_group, params)),
            key: None,
        },
    }
}

fn totals(entries: &[&TimeEntry], now: DateTime<Utc>) -> (i64, i64) {
    entries.iter().fold((0, 0), |(seconds, cost), entry| {
        (seconds + entry.duration_seconds(now), cost + entry.cost(now))
    })
}

/// Buckets one level. Attribute dimensions keep first-appearance order with
/// the inapplicable bucket last; time dimensions are sorted most recent
/// first. ISO date keys sort lexicographically, so string comparison is
/// chronological comparison.
fn group_level(
    entries: &[&TimeEntry],
    kind: GroupKind,
    sub_group: Option<GroupKind>,
    params: &AggregateParams,
) -> Vec<AggregationNode> {
    let mut order: Vec<Option<String>> = Vec::new();
    let mut buckets: HashMap<Option<String>, Vec<&TimeEntry>> = HashMap::new();

    for entry in entries {
        let key = kind.bucket_key(entry, params.timezone, params.week_start);
        if !buckets.contains_key(&key) {
            order.push(key.clone());
        }
        buckets.entry(key).or_default().push(entry);
    }

    if params.fill_gaps && kind.is_time_dimension() {
        if let (Some(range_start), Some(range_end)) = (params.start, params.end) {
            for key in time_keys_in_range(kind, range_start, range_end, params) {
                let key = Some(key);
                if !buckets.contains_key(&key) {
                    order.push(key.clone());
                    buckets.insert(key, Vec::new());
                }
            }
        }
    }

    if kind.is_time_dimension() {
        order.sort_by(|a, b| b.cmp(a));
    } else if let Some(index) = order.iter().position(|key| key.is_none()) {
        let none_key = order.remove(index);
        order.push(none_key);
    }

    order
        .into_iter()
        .map(|key| {
            let bucket = &buckets[&key];
            let (seconds, cost) = totals(bucket, params.now);
            match sub_group {
                None => AggregationNode {
                    seconds,
                    cost,
                    grouped_type: None,
                    grouped_data: None,
                    key,
                },
                Some(sub) => AggregationNode {
                    seconds,
                    cost,
                    grouped_type: Some(sub.as_str().to_string()),
                    grouped_data: Some(group_level(bucket, sub, None, params)),
                    key,
                },
            }
        })
        .collect()
}

/// Every calendar key the requested range touches, oldest first. An empty
/// range (start after end) yields nothing.
fn time_keys_in_range(
    kind: GroupKind,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    params: &AggregateParams,
) -> Vec<String> {
    let first = range_start.with_timezone(&params.timezone).date_naive();
    let last = range_end.with_timezone(&params.timezone).date_naive();

    let mut keys = Vec::new();
    match kind {
        GroupKind::Day => {
            let mut current = first;
            while current <= last {
                keys.push(current.to_string());
                current += Duration::days(1);
            }
        }
        GroupKind::Week => {
            let mut current = start_of_week(first, params.week_start);
            let last_week = start_of_week(last, params.week_start);
            while current <= last_week {
                keys.push(current.to_string());
                current += Duration::days(7);
            }
        }
        _ => {}
    }
    keys
}
