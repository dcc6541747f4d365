use serde::Deserialize;
use serde_json::{Map, Value};

/// Any JSON object response; the payload sits under the descriptor's
/// collection key, next to optional pagination metadata.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total_items: Option<u64>,
}
