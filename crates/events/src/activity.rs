//! Activity log for webhook dispatches.
//!
//! Every delivery attempt is appended to a bounded in-memory list (oldest
//! records are dropped past capacity), emitted as a structured `tracing`
//! event, and published to any subscribers over a
//! `tokio::sync::broadcast` channel. Recording never fails: a poisoned lock
//! is recovered and a channel with no receivers is ignored.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use artisan_core::types::now_iso;
use artisan_core::EventName;

/// Default number of retained records, also the subscriber channel buffer.
const DEFAULT_CAPACITY: usize = 256;

// ---------------------------------------------------------------------------
// ActivityRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Success,
    Failed,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded dispatch attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub trigger: EventName,
    pub status: ActivityStatus,
    /// Parsed response body on success, error message on failure.
    pub details: serde_json::Value,
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// ActivityLog
// ---------------------------------------------------------------------------

/// Append-only record of recent dispatch outcomes.
///
/// Holds at most `capacity` records; appending past that drops the oldest.
///
/// Shared via `Arc<ActivityLog>` between the delivery service and anything
/// that wants to inspect or follow it.
pub struct ActivityLog {
    entries: Mutex<VecDeque<ActivityRecord>>,
    capacity: usize,
    sender: broadcast::Sender<ActivityRecord>,
}

impl ActivityLog {
    /// Create a log that retains, and buffers for subscribers, up to
    /// `capacity` records. A `capacity` of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            sender,
        }
    }

    /// Append a record for `trigger`.
    pub fn record(&self, trigger: EventName, status: ActivityStatus, details: serde_json::Value) {
        let record = ActivityRecord {
            trigger,
            status,
            details,
            timestamp: now_iso(),
        };

        match status {
            ActivityStatus::Success => tracing::info!(
                %trigger,
                %status,
                details = %record.details,
                timestamp = %record.timestamp,
                "Automation log"
            ),
            ActivityStatus::Failed => tracing::warn!(
                %trigger,
                %status,
                details = %record.details,
                timestamp = %record.timestamp,
                "Automation log"
            ),
        }

        {
            let mut entries = self.lock();
            if entries.len() == self.capacity {
                entries.pop_front();
            }
            entries.push_back(record.clone());
        }
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(record);
    }

    /// Snapshot of the retained records, oldest first.
    pub fn entries(&self) -> Vec<ActivityRecord> {
        self.lock().iter().cloned().collect()
    }

    /// Maximum number of retained records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Follow records appended after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ActivityRecord> {
        self.sender.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<ActivityRecord>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
