//! Door lock state machine
//!
//! The [`LockController`] owns the door state, the sensor snapshot and the access
//! log. Every transition replaces the snapshot wholesale. Relock and buzzer-clear
//! delays are scheduled on the caller's [`TimerQueue`]; the configured
//! [`TimerPolicy`] decides whether a repeated action replaces the timer already
//! pending or adds another one.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{FiredTimer, SensorSample, TimerQueue, TimerTask};
use crate::events::{AccessLog, AccessLogEntry};
use crate::lock_event;
use crate::sensors::{FingerprintReading, RandomSource, SensorSnapshot};
use crate::types::{
    defaults, AccessMethod, DoorState, FingerprintId, SimulationConfig, TimerId, TimerPolicy,
};

/// Result of pressing the fingerprint button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanOutcome {
    /// The finger matched and the door was unlocked
    Matched(FingerprintId),
    /// The finger matched nothing and an alert was raised
    Rejected,
}

impl ScanOutcome {
    /// Matched template, if any
    pub fn user_id(&self) -> Option<FingerprintId> {
        match self {
            ScanOutcome::Matched(id) => Some(*id),
            ScanOutcome::Rejected => None,
        }
    }
}

/// Lock state machine
#[derive(Debug, Clone)]
pub struct LockController {
    door_state: DoorState,
    snapshot: SensorSnapshot,
    access_log: AccessLog,
    relock_delay: Duration,
    alert_clear_delay: Duration,
    match_threshold: f64,
    fingerprint_id_range: u32,
    timer_policy: TimerPolicy,
    pending_relock: Option<TimerId>,
    pending_buzzer_clear: Option<TimerId>,
}

impl LockController {
    /// Create a controller in the power-on state: locked, red LED, buzzer off
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            door_state: DoorState::Locked,
            snapshot: SensorSnapshot::initial(),
            access_log: AccessLog::new(config.access_log_capacity),
            relock_delay: config.relock_delay(),
            alert_clear_delay: config.alert_clear_delay(),
            match_threshold: config.fingerprint_match_threshold,
            fingerprint_id_range: config.fingerprint_id_range,
            timer_policy: config.timer_policy,
            pending_relock: None,
            pending_buzzer_clear: None,
        }
    }

    /// Read the fingerprint sensor and unlock or raise an alert
    ///
    /// The snapshot's fingerprint reading is updated before either branch runs.
    pub fn scan_fingerprint(
        &mut self,
        source: &mut dyn RandomSource,
        timers: &mut TimerQueue,
    ) -> ScanOutcome {
        let matched = source.chance_above(self.match_threshold);

        if matched {
            let slot = source.pick_index(self.fingerprint_id_range as usize) as u32;
            let user_id = FingerprintId::new(slot);
            self.snapshot = self.snapshot.with_fingerprint(FingerprintReading::matched(user_id));
            debug!(user_id = %user_id, "Fingerprint matched");
            self.unlock(AccessMethod::Fingerprint, user_id.to_string(), timers);
            ScanOutcome::Matched(user_id)
        } else {
            self.snapshot = self.snapshot.with_fingerprint(FingerprintReading::rejected());
            debug!("Fingerprint rejected");
            self.trigger_alert(defaults::UNREGISTERED_FINGERPRINT, timers);
            ScanOutcome::Rejected
        }
    }

    /// Retract the bolt, log the entry and schedule the auto-relock
    pub fn unlock(
        &mut self,
        method: AccessMethod,
        identifier: impl Into<String>,
        timers: &mut TimerQueue,
    ) -> TimerId {
        let identifier = identifier.into();

        self.door_state = DoorState::Unlocked;
        self.snapshot = self.snapshot.unlocked();
        self.access_log.record(AccessLogEntry::entry(timers.now(), method, identifier.as_str()));

        if self.timer_policy == TimerPolicy::Debounce {
            if let Some(previous) = self.pending_relock.take() {
                timers.cancel(previous);
            }
        }
        let relock = timers.schedule_once(TimerTask::Relock, self.relock_delay);
        self.pending_relock = Some(relock);

        lock_event!(info, "Door unlocked", method = %method, user = %identifier, relock = %relock);
        relock
    }

    /// Engage the bolt; the buzzer is left as it is
    pub fn lock(&mut self) {
        self.door_state = DoorState::Locked;
        self.snapshot = self.snapshot.locked();
        lock_event!(info, "Door locked");
    }

    /// Sound the buzzer, log the alert and schedule the buzzer clear
    ///
    /// `reason` is stored verbatim as the log entry's user field.
    pub fn trigger_alert(&mut self, reason: impl Into<String>, timers: &mut TimerQueue) -> TimerId {
        let reason = reason.into();

        self.snapshot = self.snapshot.alerting();
        self.access_log.record(AccessLogEntry::alert(timers.now(), reason.as_str()));

        if self.timer_policy == TimerPolicy::Debounce {
            if let Some(previous) = self.pending_buzzer_clear.take() {
                timers.cancel(previous);
            }
        }
        let clear = timers.schedule_once(TimerTask::ClearBuzzer, self.alert_clear_delay);
        self.pending_buzzer_clear = Some(clear);

        lock_event!(warn, "Alert raised", reason = %reason, clear = %clear);
        clear
    }

    /// Silence the buzzer; the LEDs keep whatever they show
    pub fn clear_buzzer(&mut self) {
        self.snapshot = self.snapshot.silenced();
        debug!("Buzzer cleared");
    }

    /// Apply a camera/PIR sample; fingerprint and actuators are untouched
    pub fn observe(&mut self, sample: &SensorSample) {
        self.snapshot = self.snapshot.with_observation(sample.face.clone(), sample.pir);
    }

    /// Run a relock or buzzer-clear timer; returns false for tasks it does not own
    pub fn handle_timer(&mut self, fired: &FiredTimer) -> bool {
        match fired.task {
            TimerTask::Relock => {
                if self.pending_relock == Some(fired.id) {
                    self.pending_relock = None;
                }
                self.lock();
                true
            }
            TimerTask::ClearBuzzer => {
                if self.pending_buzzer_clear == Some(fired.id) {
                    self.pending_buzzer_clear = None;
                }
                self.clear_buzzer();
                true
            }
            TimerTask::SampleSensors => {
                warn!(timer = %fired.id, "Sampler timer routed to lock controller");
                false
            }
        }
    }

    /// Current door state
    pub fn door_state(&self) -> DoorState {
        self.door_state
    }

    /// Current sensor snapshot
    pub fn snapshot(&self) -> &SensorSnapshot {
        &self.snapshot
    }

    /// Access log, newest first
    pub fn access_log(&self) -> &AccessLog {
        &self.access_log
    }

    /// Overlapping timer policy in force
    pub fn timer_policy(&self) -> TimerPolicy {
        self.timer_policy
    }

    /// Most recently scheduled relock timer
    pub fn pending_relock(&self) -> Option<TimerId> {
        self.pending_relock
    }

    /// Most recently scheduled buzzer-clear timer
    pub fn pending_buzzer_clear(&self) -> Option<TimerId> {
        self.pending_buzzer_clear
    }

    /// Forget pending timer handles after the queue was torn down
    pub fn forget_timers(&mut self) {
        self.pending_relock = None;
        self.pending_buzzer_clear = None;
    }
}
