use crate::error::{CoreError, Result as CoreResult};
use crate::models::time_entry::TimeEntry;

use std::panic::Location;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use chrono_tz::Tz;

use crate::ErrorLocation;

/// A report dimension entries can be bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Day,
    Week,
    Member,
    Project,
    Task,
    Billable,
}

impl GroupKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Member => "member",
            Self::Project => "project",
            Self::Task => "task",
            Self::Billable => "billable",
        }
    }

    /// Day and week buckets are calendar-derived and support gap filling;
    /// the remaining dimensions partition by an entry attribute.
    pub fn is_time_dimension(&self) -> bool {
        matches!(self, Self::Day | Self::Week)
    }

    /// Bucket key of one entry in this dimension. `None` is the
    /// inapplicable bucket (entry without a project or task).
    ///
    /// Calendar keys are ISO dates in the requesting user's timezone; a
    /// week is keyed by its first day per the user's week start.
    pub fn bucket_key(
        &self,
        entry: &TimeEntry,
        timezone: Tz,
        week_start: Weekday,
    ) -> Option<String> {
        match self {
            Self::Day => Some(entry.start.with_timezone(&timezone).date_naive().to_string()),
            Self::Week => {
                let local = entry.start.with_timezone(&timezone).date_naive();
                Some(start_of_week(local, week_start).to_string())
            }
            Self::Member => Some(entry.member_id.to_string()),
            Self::Project => entry.project_id.map(|id| id.to_string()),
            Self::Task => entry.task_id.map(|id| id.to_string()),
            Self::Billable => Some(entry.billable.to_string()),
        }
    }
}

impl FromStr for GroupKind {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "member" => Ok(Self::Member),
            "project" => Ok(Self::Project),
            "task" => Ok(Self::Task),
            "billable" => Ok(Self::Billable),
            _ => Err(CoreError::InvalidGroupKind {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// First day of the week containing `date` for the given week start.
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let days_into_week =
        (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    date - Duration::days(i64::from(days_into_week))
}
