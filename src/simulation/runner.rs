//! Session driver for the command line
//!
//! A [`SessionRunner`] starts the sampler, walks the virtual clock to the end
//! of the session and presses the fingerprint button on a fixed period. In
//! real-time mode it sleeps on the current thread before every advance so the
//! session plays out at wall-clock speed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::thread;
use tracing::{debug, info, instrument};

use super::DoorLockSystem;
use crate::types::SimulationConfig;

/// How the runner maps virtual time to wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// Jump straight from event to event
    #[default]
    Virtual,
    /// Sleep until each event is due
    RealTime,
}

/// What a run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Fingerprint button presses
    pub scans: usize,
    /// Timers fired
    pub timers_fired: usize,
}

/// Drives a [`DoorLockSystem`] through a fixed-length session
#[derive(Debug, Clone)]
pub struct SessionRunner {
    duration: Duration,
    scan_every: Option<Duration>,
    pacing: Pacing,
}

impl SessionRunner {
    /// Create a virtual-time runner
    pub fn new(duration: Duration, scan_every: Option<Duration>) -> Self {
        Self { duration, scan_every, pacing: Pacing::Virtual }
    }

    /// Create a runner from the session settings of `config`
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.session_duration(), config.scan_period())
    }

    /// Choose the pacing mode
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Session length
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Fingerprint button period
    pub fn scan_every(&self) -> Option<Duration> {
        self.scan_every
    }

    /// Pacing mode
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Run the session to completion
    ///
    /// Timers due at the same instant as a scan fire before the scan.
    #[instrument(skip_all, fields(duration_ms = self.duration.num_milliseconds()))]
    pub fn run(&self, system: &mut DoorLockSystem) -> RunSummary {
        let mut summary = RunSummary::default();
        if !system.start() {
            return summary;
        }

        let start = system.now();
        let end = start.checked_add_signed(self.duration).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut next_scan = self
            .scan_every
            .filter(|period| *period > Duration::zero())
            .and_then(|period| start.checked_add_signed(period));

        info!("Running session until {}", end);

        while system.now() < end {
            let mut target = end;
            if let Some(scan_at) = next_scan {
                target = target.min(scan_at);
            }
            if self.pacing == Pacing::RealTime {
                if let Some(deadline) = system.next_deadline() {
                    target = target.min(deadline);
                }
                self.sleep_until(system.now(), target);
            }

            summary.timers_fired += system.advance_to(target);

            if next_scan == Some(target) {
                if let Some(outcome) = system.scan_fingerprint() {
                    debug!(?outcome, "Scheduled fingerprint scan");
                    summary.scans += 1;
                }
                next_scan = self.scan_every.and_then(|period| target.checked_add_signed(period));
            }
        }

        info!(
            "Session finished: {} scans, {} timers fired",
            summary.scans, summary.timers_fired
        );
        summary
    }

    fn sleep_until(&self, now: DateTime<Utc>, target: DateTime<Utc>) {
        let wait = (target - now).to_std().unwrap_or_default();
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}
