use serde::Serialize;

/// Per-id outcome of a batch update, in request order.
#[derive(Debug, Serialize)]
pub struct UpdateMultipleResponse {
    pub success: Vec<String>,
    pub error: Vec<String>,
}
