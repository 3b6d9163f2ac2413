use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn new(organization_id: Uuid, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }
}
