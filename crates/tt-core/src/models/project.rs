use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub client_id: Option<Uuid>,
    pub name: String,
    /// Project-specific hourly rate, minor units. Strongest override in
    /// the rate fallback chain.
    pub billable_rate: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(organization_id: Uuid, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            client_id: None,
            name: name.to_string(),
            billable_rate: None,
            created_at: Utc::now(),
        }
    }
}
