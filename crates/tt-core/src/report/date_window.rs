use crate::models::time_entry::TimeEntry;

use chrono::NaiveDate;
use chrono_tz::Tz;

/// Result of whole-day windowing over a start-descending listing.
#[derive(Debug)]
pub struct FullDateListing {
    pub entries: Vec<TimeEntry>,
    /// Local dates returned whole even though their own entry count
    /// exceeds the limit, with that count. Callers surface these.
    pub days_over_limit: Vec<(NaiveDate, usize)>,
}

/// Cuts a start-descending listing at a whole-day boundary: a local day's
/// entries are either all in the result or all out. Days are consumed
/// newest first until the limit is reached, so the result may run over the
/// limit to finish a day but never splits one.
///
/// Days are local to `timezone`, matching the day buckets of the report
/// aggregation.
pub fn clamp_to_full_days(entries: Vec<TimeEntry>, limit: usize, timezone: Tz) -> FullDateListing {
    let mut day_runs: Vec<(NaiveDate, Vec<TimeEntry>)> = Vec::new();
    for entry in entries {
        let day = entry.start.with_timezone(&timezone).date_naive();
        match day_runs.last_mut() {
            Some((run_day, run)) if *run_day == day => run.push(entry),
            _ => day_runs.push((day, vec![entry])),
        }
    }

    let mut kept = Vec::new();
    let mut days_over_limit = Vec::new();
    for (day, run) in day_runs {
        if kept.len() >= limit {
            break;
        }
        if run.len() > limit {
            days_over_limit.push((day, run.len()));
        }
        kept.extend(run);
    }

    FullDateListing {
        entries: kept,
        days_over_limit,
    }
}
