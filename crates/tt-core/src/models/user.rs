use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// IANA zone name, e.g. "Europe/Berlin". Day and week report buckets
    /// are computed in this zone.
    pub timezone: String,
    /// Lowercase English weekday name, e.g. "monday".
    pub week_start: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            timezone: "UTC".to_string(),
            week_start: "monday".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Parsed timezone; an unparseable stored value degrades to UTC
    /// instead of failing the request.
    pub fn tz(&self) -> Tz {
        self.timezone.parse::<Tz>().unwrap_or(Tz::UTC)
    }

    /// Parsed week start; an unparseable stored value degrades to Monday.
    pub fn week_start_day(&self) -> Weekday {
        self.week_start.parse::<Weekday>().unwrap_or(Weekday::Mon)
    }
}
