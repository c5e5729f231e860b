//! Single-threaded virtual-time timer queue
//!
//! Timers are plain data: a [`TimerTask`] tag plus a deadline. The queue owns the
//! virtual clock, hands out due timers in deadline order and re-arms repeating
//! ones. Because the owner of the queue also owns the state the timers act on,
//! dropping the owner discards every pending timer with it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{debug, trace};

use super::TimeManager;
use crate::types::TimerId;

/// Work a timer performs when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerTask {
    /// Periodic face/motion sample
    SampleSensors,
    /// Auto-relock after an unlock
    Relock,
    /// Silence the buzzer after an alert
    ClearBuzzer,
}

impl fmt::Display for TimerTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerTask::SampleSensors => write!(f, "Sample Sensors"),
            TimerTask::Relock => write!(f, "Relock"),
            TimerTask::ClearBuzzer => write!(f, "Clear Buzzer"),
        }
    }
}

/// A timer handed back by [`TimerQueue::pop_due`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    /// Handle the timer was scheduled under
    pub id: TimerId,
    /// Work to perform
    pub task: TimerTask,
    /// Deadline the timer fired at
    pub due: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    task: TimerTask,
    period: Option<Duration>,
}

/// Deadline-ordered queue of pending timers
#[derive(Debug, Clone)]
pub struct TimerQueue {
    time: TimeManager,
    // Keyed by (deadline, id) so equal deadlines fire in scheduling order
    pending: BTreeMap<(DateTime<Utc>, TimerId), PendingTimer>,
    deadlines: HashMap<TimerId, DateTime<Utc>>,
    next_id: u64,
}

impl TimerQueue {
    /// Create an empty queue driven by `time`
    pub fn new(time: TimeManager) -> Self {
        Self { time, pending: BTreeMap::new(), deadlines: HashMap::new(), next_id: 1 }
    }

    /// Current virtual time
    pub fn now(&self) -> DateTime<Utc> {
        self.time.current_simulated_time()
    }

    /// The virtual clock
    pub fn time(&self) -> &TimeManager {
        &self.time
    }

    /// Fire `task` once after `delay`
    pub fn schedule_once(&mut self, task: TimerTask, delay: Duration) -> TimerId {
        self.insert(task, delay, None)
    }

    /// Fire `task` every `period`, first after one period
    ///
    /// A non-positive period schedules a single firing.
    pub fn schedule_repeating(&mut self, task: TimerTask, period: Duration) -> TimerId {
        let period = (period > Duration::zero()).then_some(period);
        self.insert(task, period.unwrap_or_else(Duration::zero), period)
    }

    fn insert(&mut self, task: TimerTask, delay: Duration, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let due = self
            .now()
            .checked_add_signed(delay.max(Duration::zero()))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.pending.insert((due, id), PendingTimer { task, period });
        self.deadlines.insert(id, due);

        debug!(timer = %id, task = %task, due = %due, "Scheduled timer");
        id
    }

    /// Cancel a pending timer; returns false when it already fired or never existed
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(due) => {
                self.pending.remove(&(due, id));
                debug!(timer = %id, "Cancelled timer");
                true
            }
            None => false,
        }
    }

    /// Cancel every pending timer, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        self.deadlines.clear();
        if dropped > 0 {
            debug!("Cancelled {} pending timers", dropped);
        }
        dropped
    }

    /// Whether `id` is still waiting to fire
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Deadline of the earliest pending timer
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove the earliest timer due at or before `until`
    ///
    /// The clock moves to the timer's deadline. Repeating timers are re-armed one
    /// period later under the same id.
    pub fn pop_due(&mut self, until: DateTime<Utc>) -> Option<FiredTimer> {
        let (&(due, id), _) = self.pending.iter().next().filter(|((due, _), _)| *due <= until)?;
        let timer = self.pending.remove(&(due, id))?;
        self.deadlines.remove(&id);
        self.time.advance_to(due);

        // A repeating timer whose next deadline would pass the end of time retires
        if let Some(next) = timer.period.and_then(|period| due.checked_add_signed(period)) {
            self.pending.insert((next, id), timer);
            self.deadlines.insert(id, next);
        }

        trace!(timer = %id, task = %timer.task, "Timer fired");
        Some(FiredTimer { id, task: timer.task, due })
    }

    /// Move the clock forward to `target` without firing anything
    pub fn advance_clock_to(&mut self, target: DateTime<Utc>) {
        self.time.advance_to(target);
    }
}
