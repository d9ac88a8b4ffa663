use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionStatus;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BufferCounts {
    pub force: usize,
    pub motor: usize,
    pub camera: usize,
}

/// Read-only view of the session and its buffers, served to query consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub session_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub reading_count: u64,
    pub buffered: BufferCounts,
    pub alert_count: usize,
    pub subscriber_count: usize,
}

/// Totals returned when a recording session is stopped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub session_id: String,
    pub total_readings: u64,
    pub alert_count: usize,
    pub duration_seconds: f64,
}
