use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    Idle,
    Recording,
    Stopped,
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Idle
    }
}

/// Mutable recording-session state. Exactly one exists per process, behind
/// the controller's mutex.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub status: SessionStatus,
    pub session_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub reading_count: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            status: SessionStatus::Idle,
            session_id: None,
            started_at: None,
            reading_count: 0,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting clears nothing; the count keeps accumulating until reset.
    pub fn begin(&mut self, session_id: String, started_at: DateTime<Utc>) {
        self.status = SessionStatus::Recording;
        self.session_id = Some(session_id);
        self.started_at = Some(started_at);
    }

    pub fn stop(&mut self) {
        self.status = SessionStatus::Stopped;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn duration_seconds(&self, now: DateTime<Utc>) -> f64 {
        match self.started_at {
            Some(started_at) => (now - started_at).num_milliseconds() as f64 / 1000.0,
            None => 0.0,
        }
    }
}
