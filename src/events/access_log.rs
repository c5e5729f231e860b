//! Access log entries and the bounded access log
//!
//! This module contains the immutable [`AccessLogEntry`] record and the
//! newest-first [`AccessLog`] that keeps only the most recent entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::{AccessMethod, AccessStatus, EntryId, EntryType};

/// Wall-clock format shown in the log list (`14.05.09`)
pub const TIME_FORMAT: &str = "%H.%M.%S";

/// Calendar format shown in the log list (`19/10/2026`)
pub const DATE_FORMAT: &str = "%-d/%-m/%Y";

/// One access or alert event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessLogEntry {
    /// Unique entry id
    pub id: EntryId,
    /// When the event happened
    pub timestamp: DateTime<Utc>,
    /// Time of day as displayed
    pub time: String,
    /// Date as displayed
    pub date: String,
    /// How the event came about
    pub method: AccessMethod,
    /// Who got in, or the alert reason
    pub user: String,
    /// Whether access was granted
    pub status: AccessStatus,
    /// Entry or alert
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl AccessLogEntry {
    /// A successful entry through the door
    pub fn entry(timestamp: DateTime<Utc>, method: AccessMethod, identifier: impl Into<String>) -> Self {
        Self::new(timestamp, method, identifier.into(), AccessStatus::Success, EntryType::Entry)
    }

    /// An alert; `reason` is stored verbatim in the user field
    pub fn alert(timestamp: DateTime<Utc>, reason: impl Into<String>) -> Self {
        Self::new(timestamp, AccessMethod::Alert, reason.into(), AccessStatus::Failed, EntryType::Alert)
    }

    fn new(
        timestamp: DateTime<Utc>,
        method: AccessMethod,
        user: String,
        status: AccessStatus,
        entry_type: EntryType,
    ) -> Self {
        Self {
            id: EntryId::new(),
            timestamp,
            time: timestamp.format(TIME_FORMAT).to_string(),
            date: timestamp.format(DATE_FORMAT).to_string(),
            method,
            user,
            status,
            entry_type,
        }
    }

    /// Whether access was granted
    pub fn is_success(&self) -> bool {
        self.status == AccessStatus::Success
    }

    /// Whether this entry records an alert
    pub fn is_alert(&self) -> bool {
        self.entry_type == EntryType::Alert
    }
}

/// Bounded access log, newest entry first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessLog {
    entries: VecDeque<AccessLogEntry>,
    capacity: usize,
}

impl AccessLog {
    /// Create an empty log holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Put `entry` at the head, evicting the oldest entries beyond capacity
    pub fn record(&mut self, entry: AccessLogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&AccessLogEntry> {
        self.entries.front()
    }

    /// Entries from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = &AccessLogEntry> {
        self.entries.iter()
    }

    /// Number of entries held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of successful entries held
    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_success()).count()
    }

    /// Number of alerts held
    pub fn alert_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_alert()).count()
    }
}

impl Default for AccessLog {
    fn default() -> Self {
        Self::new(crate::types::defaults::ACCESS_LOG_CAPACITY)
    }
}
