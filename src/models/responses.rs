use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::panel::ResultGroup;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Result of pushing one batch (or bridge message) to the panel.
#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    /// `added`, `ignored` or `acknowledged`.
    pub status: String,
    pub group_id: Option<Uuid>,
    pub evicted_group_id: Option<Uuid>,
    pub group_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub group_count: usize,
    pub placeholder: Option<String>,
    pub groups: Vec<ResultGroup>,
}
