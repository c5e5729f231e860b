//! Periodic face and motion sampler
//!
//! The [`SimulationClock`] owns the repeating `SampleSensors` timer and the
//! activity history. Each tick draws a new camera/PIR reading from the random
//! source and records a chart point.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{TimerQueue, TimerTask};
use crate::events::{ActivityHistory, ActivityPoint};
use crate::sensors::{FaceRecognition, PirReading, RandomSource};
use crate::types::{defaults, SimulationConfig, TimerId};

/// One camera/PIR observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// When the sample was taken
    pub timestamp: DateTime<Utc>,
    /// Camera reading
    pub face: FaceRecognition,
    /// PIR reading
    pub pir: PirReading,
}

/// Probabilities and name pool used to synthesise samples
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerSettings {
    /// A draw above this means a face is in frame
    pub face_detection_threshold: f64,
    /// A draw above this means the face is enrolled
    pub known_person_threshold: f64,
    /// A draw above this means the PIR sensor fired
    pub motion_threshold: f64,
    /// Enrolled names
    pub known_names: Vec<String>,
}

impl From<&SimulationConfig> for SamplerSettings {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            face_detection_threshold: config.face_detection_threshold,
            known_person_threshold: config.known_person_threshold,
            motion_threshold: config.motion_threshold,
            known_names: config.known_names.clone(),
        }
    }
}

/// Periodic sampler and chart history
#[derive(Debug, Clone)]
pub struct SimulationClock {
    interval: Duration,
    settings: SamplerSettings,
    history: ActivityHistory,
    timer: Option<TimerId>,
    access_since_last_sample: bool,
    ticks: u64,
}

impl SimulationClock {
    /// Create a stopped sampler
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            interval: config.sample_interval(),
            settings: SamplerSettings::from(config),
            history: ActivityHistory::new(config.activity_history_capacity),
            timer: None,
            access_since_last_sample: false,
            ticks: 0,
        }
    }

    /// Arm the repeating sample timer; a running sampler keeps its timer
    pub fn start(&mut self, timers: &mut TimerQueue) -> TimerId {
        if let Some(id) = self.timer.filter(|id| timers.is_pending(*id)) {
            return id;
        }
        let id = timers.schedule_repeating(TimerTask::SampleSensors, self.interval);
        debug!(timer = %id, interval_ms = self.interval.num_milliseconds(), "Sensor sampler started");
        self.timer = Some(id);
        id
    }

    /// Cancel the sample timer; returns false if it was not running
    pub fn stop(&mut self, timers: &mut TimerQueue) -> bool {
        match self.timer.take() {
            Some(id) => timers.cancel(id),
            None => false,
        }
    }

    /// Whether the sample timer is armed
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Handle of the sample timer
    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer
    }

    /// Remember that the door opened so the next chart point flags it
    pub fn note_access(&mut self) {
        self.access_since_last_sample = true;
    }

    /// Draw a new observation and record it in the history
    ///
    /// Draw order: face detected, known person, motion, name (known faces only),
    /// confidence (detected faces only).
    #[instrument(skip_all)]
    pub fn sample(&mut self, source: &mut dyn RandomSource, now: DateTime<Utc>) -> SensorSample {
        let face_detected = source.chance_above(self.settings.face_detection_threshold);
        let known_person = source.chance_above(self.settings.known_person_threshold);
        let motion = source.chance_above(self.settings.motion_threshold);

        let face = if face_detected {
            let name = if known_person {
                let index = source.pick_index(self.settings.known_names.len());
                self.settings.known_names[index].clone()
            } else {
                defaults::UNKNOWN_PERSON.to_string()
            };
            let confidence = if known_person {
                source.uniform_in(85.0, 15.0)
            } else {
                source.uniform_in(30.0, 40.0)
            };
            FaceRecognition { detected: true, name, confidence }
        } else {
            FaceRecognition::none()
        };

        self.history.push(ActivityPoint::new(now, motion, self.access_since_last_sample));
        self.access_since_last_sample = false;
        self.ticks += 1;

        debug!(
            face_detected,
            name = %face.name,
            confidence = face.confidence,
            motion,
            "Sensor sample"
        );

        SensorSample { timestamp: now, face, pir: PirReading { motion } }
    }

    /// Chart history
    pub fn history(&self) -> &ActivityHistory {
        &self.history
    }

    /// Samples taken so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Sampling period
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::ScriptedSource;
    use crate::simulation::TimeManager;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 2, 7, 0, 0).unwrap()
    }

    #[test]
    fn test_no_face_no_motion() {
        let mut clock = SimulationClock::new(&SimulationConfig::default());
        let mut source = ScriptedSource::new([0.1, 0.9, 0.2]);

        let sample = clock.sample(&mut source, now());
        assert_eq!(sample.face, FaceRecognition::none());
        assert!(!sample.pir.motion);
        // Only the three flag draws are consumed
        assert_eq!(source.drawn(), 3);
        assert_eq!(clock.history().latest().unwrap().motion, 0);
    }

    #[test]
    fn test_known_face() {
        let mut clock = SimulationClock::new(&SimulationConfig::default());
        // detected, known, motion, name index 1, confidence 85 + 0.5 * 15
        let mut source = ScriptedSource::new([0.8, 0.6, 0.7, 0.5, 0.5]);

        let sample = clock.sample(&mut source, now());
        assert!(sample.face.detected);
        assert_eq!(sample.face.name, "Jane Smith");
        assert_eq!(sample.face.confidence, 92.5);
        assert!(sample.pir.motion);
        assert_eq!(clock.history().latest().unwrap().motion, 1);
    }

    #[test]
    fn test_unknown_face() {
        let mut clock = SimulationClock::new(&SimulationConfig::default());
        // detected, not known, no motion, confidence 30 + 0.25 * 40
        let mut source = ScriptedSource::new([0.95, 0.1, 0.0, 0.25]);

        let sample = clock.sample(&mut source, now());
        assert_eq!(sample.face.name, "Unknown");
        assert_eq!(sample.face.confidence, 40.0);
        assert!(!sample.face.is_known());
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_access_flag_is_consumed_by_next_sample() {
        let mut clock = SimulationClock::new(&SimulationConfig::default());
        let mut source = ScriptedSource::new(Vec::<f64>::new());

        clock.note_access();
        clock.sample(&mut source, now());
        clock.sample(&mut source, now());

        let flags: Vec<_> = clock.history().iter().map(|p| p.access).collect();
        assert_eq!(flags, vec![1, 0]);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut clock = SimulationClock::new(&SimulationConfig::default());
        let mut source = ScriptedSource::new(Vec::<f64>::new()).with_fallback(0.99);

        for i in 0..30 {
            clock.sample(&mut source, now() + Duration::seconds(3 * i));
        }
        assert_eq!(clock.history().len(), 20);
        assert_eq!(clock.history().iter().next().unwrap().timestamp, now() + Duration::seconds(30));
    }

    #[test]
    fn test_start_and_stop() {
        let mut timers = TimerQueue::new(TimeManager::starting_at(now()));
        let mut clock = SimulationClock::new(&SimulationConfig::default());

        let id = clock.start(&mut timers);
        assert_eq!(clock.start(&mut timers), id);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.next_due(), Some(now() + Duration::seconds(3)));

        assert!(clock.stop(&mut timers));
        assert!(!clock.is_running());
        assert!(timers.is_empty());
        assert!(!clock.stop(&mut timers));
    }
}
