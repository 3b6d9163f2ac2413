use tt_core::AggregationNode;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub aggregation: AggregationNode,
}
