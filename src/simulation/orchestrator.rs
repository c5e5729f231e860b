//! Door lock system orchestrator
//!
//! [`DoorLockSystem`] owns every moving part of a session: the virtual timer
//! queue, the sensor sampler, the lock controller, the randomness source, the
//! observers and the statistics. Time only moves through [`DoorLockSystem::advance_by`]
//! and [`DoorLockSystem::advance_to`], which fire due timers in deadline order.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::events::{AccessLog, AccessLogEntry, ActivityHistory, ActivityPoint};
use crate::sensors::{LiveSource, RandomSource, SensorSnapshot};
use crate::simulation::{
    FiredTimer, LockController, ObserverRegistry, ScanOutcome, SessionStatistics,
    SimulationClock, SimulationResult, StateChange, StateObserver, StateView, SubscriptionId,
    TimeManager, TimerQueue, TimerTask,
};
use crate::types::{AccessMethod, DoorState, SessionId, SimulationConfig, TimerPolicy};

/// Serializable summary of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Session identifier
    pub session_id: SessionId,
    /// Virtual time the session started at
    pub started_at: DateTime<Utc>,
    /// Virtual time the report was taken at
    pub ended_at: DateTime<Utc>,
    /// Overlapping timer policy in force
    pub timer_policy: TimerPolicy,
    /// Door state at the end
    pub door_state: DoorState,
    /// Sensor snapshot at the end
    pub snapshot: SensorSnapshot,
    /// Access log, newest first
    pub access_log: Vec<AccessLogEntry>,
    /// Chart history, oldest first
    pub activity: Vec<ActivityPoint>,
    /// Session counters
    pub statistics: SessionStatistics,
}

impl SessionReport {
    /// Render the report as pretty-printed JSON
    pub fn to_json(&self) -> SimulationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Owner of a simulated door lock
#[derive(Debug)]
pub struct DoorLockSystem {
    session_id: SessionId,
    config: SimulationConfig,
    source: Box<dyn RandomSource>,
    timers: TimerQueue,
    clock: SimulationClock,
    controller: LockController,
    observers: ObserverRegistry,
    statistics: SessionStatistics,
    version: u64,
    shut_down: bool,
}

impl DoorLockSystem {
    /// Create a system driven by a seeded or entropy PRNG, starting now
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        let source = LiveSource::new(config.seed);
        Self::with_source(config, source)
    }

    /// Create a system drawing from `source`, starting now
    pub fn with_source(
        config: SimulationConfig,
        source: impl RandomSource + 'static,
    ) -> SimulationResult<Self> {
        Self::with_source_at(config, source, Utc::now())
    }

    /// Create a system drawing from `source` whose virtual clock starts at `start`
    #[instrument(skip(config, source), fields(policy = %config.timer_policy))]
    pub fn with_source_at(
        config: SimulationConfig,
        source: impl RandomSource + 'static,
        start: DateTime<Utc>,
    ) -> SimulationResult<Self> {
        config.validate()?;

        let session_id = SessionId::new();
        info!("Initializing door lock session {}", session_id);

        Ok(Self {
            session_id,
            timers: TimerQueue::new(TimeManager::starting_at(start)),
            clock: SimulationClock::new(&config),
            controller: LockController::new(&config),
            source: Box::new(source),
            observers: ObserverRegistry::new(),
            statistics: SessionStatistics::new(),
            version: 0,
            shut_down: false,
            config,
        })
    }

    /// Arm the periodic sensor sampler
    pub fn start(&mut self) -> bool {
        if self.shut_down {
            return false;
        }
        self.clock.start(&mut self.timers);
        true
    }

    /// Press the fingerprint button
    #[instrument(skip_all)]
    pub fn scan_fingerprint(&mut self) -> Option<ScanOutcome> {
        if self.shut_down {
            return None;
        }
        let outcome = self.controller.scan_fingerprint(&mut *self.source, &mut self.timers);
        if let ScanOutcome::Matched(_) = outcome {
            self.clock.note_access();
        }
        self.publish(StateChange::FingerprintScanned { user_id: outcome.user_id() }, false);
        Some(outcome)
    }

    /// Unlock the door directly
    #[instrument(skip_all, fields(method = %method))]
    pub fn unlock(&mut self, method: AccessMethod, identifier: impl Into<String>) -> bool {
        if self.shut_down {
            return false;
        }
        let identifier = identifier.into();
        self.controller.unlock(method, identifier.as_str(), &mut self.timers);
        self.clock.note_access();
        self.publish(StateChange::Unlocked { method, identifier }, false);
        true
    }

    /// Lock the door directly
    pub fn lock(&mut self) -> bool {
        if self.shut_down {
            return false;
        }
        self.controller.lock();
        self.publish(StateChange::Locked { automatic: false }, false);
        true
    }

    /// Raise an alert directly
    #[instrument(skip_all)]
    pub fn trigger_alert(&mut self, reason: impl Into<String>) -> bool {
        if self.shut_down {
            return false;
        }
        let reason = reason.into();
        self.controller.trigger_alert(reason.as_str(), &mut self.timers);
        self.publish(StateChange::AlertRaised { reason }, false);
        true
    }

    /// Move virtual time forward, firing every timer that falls due
    ///
    /// Returns the number of timers fired. Non-positive durations fire nothing.
    pub fn advance_by(&mut self, duration: Duration) -> usize {
        let target = self.now() + duration;
        self.advance_to(target)
    }

    /// Move virtual time forward to `target`, firing every timer that falls due
    pub fn advance_to(&mut self, target: DateTime<Utc>) -> usize {
        if self.shut_down {
            return 0;
        }
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(target) {
            self.dispatch(timer);
            fired += 1;
        }
        self.timers.advance_clock_to(target);
        self.statistics.set_elapsed(self.timers.time().elapsed());
        if fired > 0 {
            debug!("Fired {} timers up to {}", fired, target);
        }
        fired
    }

    /// Deadline of the next pending timer
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        if self.shut_down {
            return None;
        }
        self.timers.next_due()
    }

    fn dispatch(&mut self, fired: FiredTimer) {
        match fired.task {
            TimerTask::SampleSensors => {
                let sample = self.clock.sample(&mut *self.source, fired.due);
                self.controller.observe(&sample);
                let change = StateChange::SensorsSampled {
                    face_detected: sample.face.detected,
                    motion: sample.pir.motion,
                };
                self.publish(change, sample.face.is_known());
            }
            TimerTask::Relock => {
                self.controller.handle_timer(&fired);
                self.publish(StateChange::Locked { automatic: true }, false);
            }
            TimerTask::ClearBuzzer => {
                self.controller.handle_timer(&fired);
                self.publish(StateChange::BuzzerCleared, false);
            }
        }
    }

    fn publish(&mut self, change: StateChange, known_face: bool) {
        self.version += 1;
        self.statistics.record(&change, known_face);

        let view = StateView {
            now: self.timers.now(),
            version: self.version,
            door_state: self.controller.door_state(),
            snapshot: self.controller.snapshot(),
            access_log: self.controller.access_log(),
            activity: self.clock.history(),
        };
        self.observers.notify(&change, &view);
    }

    /// Subscribe a closure to state changes; `None` after shutdown
    pub fn subscribe<F>(&mut self, observer: F) -> Option<SubscriptionId>
    where
        F: FnMut(&StateChange, &StateView<'_>) + 'static,
    {
        self.subscribe_observer(Box::new(observer))
    }

    /// Subscribe a boxed observer to state changes; `None` after shutdown
    pub fn subscribe_observer(&mut self, observer: Box<dyn StateObserver>) -> Option<SubscriptionId> {
        if self.shut_down {
            return None;
        }
        Some(self.observers.subscribe(observer))
    }

    /// Remove an observer
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Cancel every timer and drop every observer
    ///
    /// Every later operation is a no-op. Returns false if already shut down.
    pub fn shutdown(&mut self) -> bool {
        if self.shut_down {
            return false;
        }
        self.clock.stop(&mut self.timers);
        let dropped = self.timers.cancel_all();
        self.controller.forget_timers();
        self.observers.clear();
        self.shut_down = true;
        info!("Door lock session {} shut down ({} timers dropped)", self.session_id, dropped);
        true
    }

    /// Whether [`shutdown`](Self::shutdown) has run
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Current virtual time
    pub fn now(&self) -> DateTime<Utc> {
        self.timers.now()
    }

    /// Session identifier
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Configuration the system was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current sensor snapshot
    pub fn snapshot(&self) -> &SensorSnapshot {
        self.controller.snapshot()
    }

    /// Current door state
    pub fn door_state(&self) -> DoorState {
        self.controller.door_state()
    }

    /// Access log, newest first
    pub fn access_log(&self) -> &AccessLog {
        self.controller.access_log()
    }

    /// Chart history, oldest first
    pub fn activity_history(&self) -> &ActivityHistory {
        self.clock.history()
    }

    /// Session counters
    pub fn statistics(&self) -> &SessionStatistics {
        &self.statistics
    }

    /// Number of state changes published so far
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of pending timers
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether the sensor sampler is armed
    pub fn is_sampling(&self) -> bool {
        self.clock.is_running()
    }

    /// Read-only view of the current state
    pub fn view(&self) -> StateView<'_> {
        StateView {
            now: self.timers.now(),
            version: self.version,
            door_state: self.controller.door_state(),
            snapshot: self.controller.snapshot(),
            access_log: self.controller.access_log(),
            activity: self.clock.history(),
        }
    }

    /// Build a serializable summary of the session so far
    pub fn report(&self) -> SessionReport {
        let mut statistics = self.statistics.clone();
        statistics.set_elapsed(self.timers.time().elapsed());

        SessionReport {
            session_id: self.session_id,
            started_at: self.timers.time().simulation_start(),
            ended_at: self.timers.now(),
            timer_policy: self.controller.timer_policy(),
            door_state: self.controller.door_state(),
            snapshot: self.controller.snapshot().clone(),
            access_log: self.controller.access_log().iter().cloned().collect(),
            activity: self.clock.history().iter().cloned().collect(),
            statistics,
        }
    }
}
