//! Append-only log of timer sessions

use std::sync::{Arc, Mutex, MutexGuard};
use chrono::{DateTime, Utc};
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use tracing::debug;

/// Why a session record was written
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Completed,
    Paused,
}

impl SessionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Completed => "Interval (Complete)",
            SessionKind::Paused => "Interval (Paused)",
        }
    }

    pub fn mood(&self) -> &'static str {
        match self {
            SessionKind::Completed => "😊",
            SessionKind::Paused => "😟",
        }
    }
}

/// One immutable log entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(rename = "type")]
    kind: SessionKind,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    duration_seconds: u64,
}

impl SessionRecord {
    pub fn completed(started_at: DateTime<Utc>, ended_at: DateTime<Utc>, duration_seconds: u64) -> Self {
        Self {
            kind: SessionKind::Completed,
            started_at,
            ended_at,
            duration_seconds,
        }
    }

    pub fn paused(started_at: DateTime<Utc>, ended_at: DateTime<Utc>, duration_seconds: u64) -> Self {
        Self {
            kind: SessionKind::Paused,
            started_at,
            ended_at,
            duration_seconds,
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Record status; always agrees with the kind
    pub fn status(&self) -> &'static str {
        match self.kind {
            SessionKind::Completed => "completed",
            SessionKind::Paused => "paused",
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> DateTime<Utc> {
        self.ended_at
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }
}

// Status and label are derived from the kind, so they are written out but never read back.
impl Serialize for SessionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("SessionRecord", 6)?;
        record.serialize_field("type", &self.kind)?;
        record.serialize_field("status", self.status())?;
        record.serialize_field("label", self.label())?;
        record.serialize_field("startedAt", &self.started_at)?;
        record.serialize_field("endedAt", &self.ended_at)?;
        record.serialize_field("durationSeconds", &self.duration_seconds)?;
        record.end()
    }
}

/// Aggregate view over the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionSummary {
    Empty,
    #[serde(rename_all = "camelCase")]
    Recorded {
        count: usize,
        last_started_at: DateTime<Utc>,
        completed: usize,
        paused: usize,
        total_active_seconds: u64,
    },
}

impl SessionSummary {
    pub fn count(&self) -> usize {
        match self {
            SessionSummary::Empty => 0,
            SessionSummary::Recorded { count, .. } => *count,
        }
    }
}

/// Shared, append-only sequence of [`SessionRecord`]s.
///
/// Cloning yields another handle to the same log.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    records: Arc<Mutex<Vec<SessionRecord>>>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: SessionRecord) {
        let mut records = self.lock();
        debug!(
            "Appending {} session #{} ({}s)",
            record.status(),
            records.len() + 1,
            record.duration_seconds()
        );
        records.push(record);
    }

    /// All records, oldest first
    pub fn all(&self) -> Vec<SessionRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn last(&self) -> Option<SessionRecord> {
        self.lock().last().cloned()
    }

    pub fn summary(&self) -> SessionSummary {
        let records = self.lock();
        let Some(last) = records.last() else {
            return SessionSummary::Empty;
        };

        let completed = records
            .iter()
            .filter(|r| r.kind() == SessionKind::Completed)
            .count();

        SessionSummary::Recorded {
            count: records.len(),
            last_started_at: last.started_at(),
            completed,
            paused: records.len() - completed,
            total_active_seconds: records.iter().map(|r| r.duration_seconds()).sum(),
        }
    }

    // A panic while holding the lock cannot leave a half-written Vec behind,
    // so a poisoned log is still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<SessionRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}
