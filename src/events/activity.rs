//! Activity history for the security chart

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::access_log::TIME_FORMAT;

/// One chart sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPoint {
    /// When the sample was taken
    pub timestamp: DateTime<Utc>,
    /// Time of day as displayed
    pub time: String,
    /// 1 when the PIR sensor fired
    pub motion: u8,
    /// 1 when the door was opened since the previous sample
    pub access: u8,
}

impl ActivityPoint {
    /// Create a point from sensor flags
    pub fn new(timestamp: DateTime<Utc>, motion: bool, access: bool) -> Self {
        Self {
            timestamp,
            time: timestamp.format(TIME_FORMAT).to_string(),
            motion: u8::from(motion),
            access: u8::from(access),
        }
    }
}

/// Bounded chronological history; the oldest point is evicted first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityHistory {
    points: VecDeque<ActivityPoint>,
    capacity: usize,
}

impl ActivityHistory {
    /// Create an empty history holding at most `capacity` points
    pub fn new(capacity: usize) -> Self {
        Self { points: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append a point, dropping the oldest ones beyond capacity
    pub fn push(&mut self, point: ActivityPoint) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Points from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &ActivityPoint> {
        self.points.iter()
    }

    /// Newest point
    pub fn latest(&self) -> Option<&ActivityPoint> {
        self.points.back()
    }

    /// Number of points held
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point has been recorded
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of points held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points with motion
    pub fn motion_count(&self) -> usize {
        self.points.iter().filter(|p| p.motion == 1).count()
    }

    /// Points with a door opening
    pub fn access_count(&self) -> usize {
        self.points.iter().filter(|p| p.access == 1).count()
    }
}

impl Default for ActivityHistory {
    fn default() -> Self {
        Self::new(crate::types::defaults::ACTIVITY_HISTORY_CAPACITY)
    }
}
