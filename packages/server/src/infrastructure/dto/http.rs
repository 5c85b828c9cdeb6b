//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Connected session summary returned by `/api/sessions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub connection_id: String,
    pub nickname: String,
    /// ISO-8601 (UTC, milliseconds)
    pub connected_at: String,
}
