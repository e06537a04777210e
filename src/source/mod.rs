use serde::Deserialize;

use crate::error::{FeedError, Result};

/// A change notification decoded from the raw bytes of one stream record.
///
/// `id` is assumed unique within the downstream search domain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceEvent {
    pub file_path: String,
    pub id: i64,
}

impl SourceEvent {
    pub fn decode(raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw).map_err(|source| FeedError::Decode { source })
    }
}
