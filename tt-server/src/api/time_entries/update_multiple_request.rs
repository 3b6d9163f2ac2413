use tt_core::TimeEntryChanges;

use serde::Deserialize;
use uuid::Uuid;

/// Batch update: one change set applied to every listed entry.
#[derive(Debug, Deserialize)]
pub struct UpdateMultipleRequest {
    pub ids: Vec<Uuid>,
    pub changes: TimeEntryChanges,
}
