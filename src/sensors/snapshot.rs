//! Sensor and actuator snapshot
//!
//! A [`SensorSnapshot`] is a point-in-time copy of every sensor reading and
//! actuator output on the lock. The controller never edits a snapshot in place;
//! each transition builds a new one from the previous value.

use serde::{Deserialize, Serialize};

use crate::types::FingerprintId;

/// Camera face recognition result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FaceRecognition {
    /// Whether a face is in frame
    pub detected: bool,
    /// Recognised name, "Unknown" for strangers, empty when nothing is detected
    pub name: String,
    /// Match confidence in percent (0-100)
    pub confidence: f64,
}

impl FaceRecognition {
    /// Nobody in frame
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the detected face belongs to an enrolled person
    pub fn is_known(&self) -> bool {
        self.detected && self.name != crate::types::defaults::UNKNOWN_PERSON
    }
}

/// Last fingerprint sensor reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FingerprintReading {
    /// Whether the finger matched an enrolled template
    pub matched: bool,
    /// Template slot of the match
    pub user_id: Option<FingerprintId>,
}

impl FingerprintReading {
    /// A successful match
    pub fn matched(user_id: FingerprintId) -> Self {
        Self { matched: true, user_id: Some(user_id) }
    }

    /// A finger that matched nothing
    pub fn rejected() -> Self {
        Self { matched: false, user_id: None }
    }
}

/// PIR motion sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PirReading {
    /// Whether motion was sensed
    pub motion: bool,
}

/// Lock servo position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServoState {
    /// Horn angle in degrees
    pub angle_degrees: u16,
    /// Whether the bolt is engaged
    pub locked: bool,
}

impl ServoState {
    /// Servo angle when the bolt is engaged
    pub const LOCKED_ANGLE: u16 = 0;
    /// Servo angle when the bolt is retracted
    pub const UNLOCKED_ANGLE: u16 = 90;

    /// Bolt engaged
    pub fn locked() -> Self {
        Self { angle_degrees: Self::LOCKED_ANGLE, locked: true }
    }

    /// Bolt retracted
    pub fn unlocked() -> Self {
        Self { angle_degrees: Self::UNLOCKED_ANGLE, locked: false }
    }
}

impl Default for ServoState {
    fn default() -> Self {
        Self::locked()
    }
}

/// Status LED pair; exactly one colour is lit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedState {
    /// Red LED lit
    pub red: bool,
    /// Green LED lit
    pub green: bool,
}

impl LedState {
    /// Red on, green off
    pub fn red() -> Self {
        Self { red: true, green: false }
    }

    /// Green on, red off
    pub fn green() -> Self {
        Self { red: false, green: true }
    }

    /// Whether exactly one LED is lit
    pub fn is_exclusive(&self) -> bool {
        self.red != self.green
    }
}

impl Default for LedState {
    fn default() -> Self {
        Self::red()
    }
}

/// Buzzer output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BuzzerState {
    /// Whether the buzzer is sounding
    pub active: bool,
}

/// Every sensor reading and actuator output at one moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SensorSnapshot {
    /// Camera face recognition
    pub face_recognition: FaceRecognition,
    /// Fingerprint sensor
    pub fingerprint: FingerprintReading,
    /// PIR motion sensor
    pub pir: PirReading,
    /// Lock servo
    pub servo: ServoState,
    /// Status LEDs
    pub led: LedState,
    /// Buzzer
    pub buzzer: BuzzerState,
}

impl SensorSnapshot {
    /// Power-on state: nothing sensed, door locked, red LED, buzzer off
    pub fn initial() -> Self {
        Self::default()
    }

    /// Copy with new camera and PIR readings, actuators untouched
    pub fn with_observation(&self, face_recognition: FaceRecognition, pir: PirReading) -> Self {
        Self { face_recognition, pir, ..self.clone() }
    }

    /// Copy with a new fingerprint reading
    pub fn with_fingerprint(&self, fingerprint: FingerprintReading) -> Self {
        Self { fingerprint, ..self.clone() }
    }

    /// Copy with the actuators driven to the unlocked position
    pub fn unlocked(&self) -> Self {
        Self {
            servo: ServoState::unlocked(),
            led: LedState::green(),
            buzzer: BuzzerState { active: false },
            ..self.clone()
        }
    }

    /// Copy with the actuators driven to the locked position; buzzer untouched
    pub fn locked(&self) -> Self {
        Self { servo: ServoState::locked(), led: LedState::red(), ..self.clone() }
    }

    /// Copy with the buzzer sounding and the red LED lit
    pub fn alerting(&self) -> Self {
        Self { buzzer: BuzzerState { active: true }, led: LedState::red(), ..self.clone() }
    }

    /// Copy with the buzzer silenced; LEDs untouched
    pub fn silenced(&self) -> Self {
        Self { buzzer: BuzzerState { active: false }, ..self.clone() }
    }

    /// Whether the snapshot satisfies the actuator invariants
    pub fn is_consistent(&self) -> bool {
        let servo_matches = self.servo.locked == (self.servo.angle_degrees == ServoState::LOCKED_ANGLE);
        self.led.is_exclusive() && servo_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_snapshot() {
        let snapshot = SensorSnapshot::initial();
        assert!(!snapshot.face_recognition.detected);
        assert_eq!(snapshot.face_recognition.name, "");
        assert!(!snapshot.fingerprint.matched);
        assert!(snapshot.fingerprint.user_id.is_none());
        assert!(!snapshot.pir.motion);
        assert_eq!(snapshot.servo, ServoState { angle_degrees: 0, locked: true });
        assert!(snapshot.led.red && !snapshot.led.green);
        assert!(!snapshot.buzzer.active);
        assert!(snapshot.is_consistent());
    }

    #[test]
    fn test_unlocked_clears_buzzer_and_lights_green() {
        let snapshot = SensorSnapshot::initial().alerting().unlocked();
        assert_eq!(snapshot.servo.angle_degrees, 90);
        assert!(!snapshot.servo.locked);
        assert_eq!(snapshot.led, LedState::green());
        assert!(!snapshot.buzzer.active);
        assert!(snapshot.is_consistent());
    }

    #[test]
    fn test_locked_leaves_buzzer_alone() {
        let snapshot = SensorSnapshot::initial().unlocked().alerting().locked();
        assert!(snapshot.buzzer.active);
        assert_eq!(snapshot.led, LedState::red());
        assert!(snapshot.servo.locked);
    }

    #[test]
    fn test_silenced_keeps_led() {
        let snapshot = SensorSnapshot::initial().alerting().silenced();
        assert!(!snapshot.buzzer.active);
        assert_eq!(snapshot.led, LedState::red());
    }

    #[test]
    fn test_with_observation_keeps_actuators() {
        let before = SensorSnapshot::initial().unlocked();
        let face = FaceRecognition { detected: true, name: "Admin".to_string(), confidence: 91.0 };
        let after = before.with_observation(face.clone(), PirReading { motion: true });

        assert_eq!(after.face_recognition, face);
        assert!(after.pir.motion);
        assert_eq!(after.servo, before.servo);
        assert_eq!(after.led, before.led);
        assert!(after.face_recognition.is_known());
    }

    #[test]
    fn test_led_exclusivity_check() {
        assert!(LedState::red().is_exclusive());
        assert!(!LedState { red: true, green: true }.is_exclusive());
        assert!(!LedState { red: false, green: false }.is_exclusive());
    }
}
