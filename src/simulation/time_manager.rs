//! Virtual time management
//!
//! The simulator never reads the wall clock while running. All timers and
//! timestamps come from a [`TimeManager`] that only moves when it is advanced.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

/// Monotonic virtual clock
#[derive(Debug, Clone)]
pub struct TimeManager {
    /// Virtual time at which the session began
    simulation_start: DateTime<Utc>,
    /// Virtual time elapsed since the start
    elapsed: Duration,
}

impl TimeManager {
    /// Create a clock starting at the current wall-clock time
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Create a clock starting at `start`
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        info!("Initializing virtual clock at {}", start);
        Self { simulation_start: start, elapsed: Duration::zero() }
    }

    /// Current virtual time
    pub fn current_simulated_time(&self) -> DateTime<Utc> {
        self.simulation_start + self.elapsed
    }

    /// When the clock started
    pub fn simulation_start(&self) -> DateTime<Utc> {
        self.simulation_start
    }

    /// Virtual time elapsed since the start
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Advance the clock by `duration`; negative durations are ignored
    pub fn advance_by(&mut self, duration: Duration) {
        if duration <= Duration::zero() {
            return;
        }
        self.elapsed = self.elapsed + duration;
        debug!("Advanced virtual clock by {} to {}", duration, self.current_simulated_time());
    }

    /// Move the clock forward to `target`; the clock never runs backwards
    pub fn advance_to(&mut self, target: DateTime<Utc>) {
        let delta = target - self.current_simulated_time();
        self.advance_by(delta);
    }
}

impl Default for TimeManager {
    fn default() -> Self {
        Self::new()
    }
}
