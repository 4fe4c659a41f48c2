use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events emitted after successful store mutations, consumed by listeners.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StoreEvent {
    Welcome,
    Created(PageEvent),
    Updated(PageEvent),
    Deleted(PageEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEvent {
    pub document_id: String,
    pub name: String,
    /// Top-level fields written by the mutation; empty for create/delete.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    pub timestamp: DateTime<Utc>,
}
