use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    /// ISO 4217 code; billable rates are minor units of this currency.
    pub currency: String,
    /// Organization-wide default hourly rate, minor units.
    pub billable_rate: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            currency: "EUR".to_string(),
            billable_rate: None,
            created_at: Utc::now(),
        }
    }
}
