//! Text panels for the door lock dashboard
//!
//! Each function reads a [`StateView`] and returns the panel as a string. None
//! of them hold state or make decisions beyond formatting.

use crate::simulation::StateView;
use crate::types::DoorState;

/// Title shown above the dashboard
pub const DASHBOARD_TITLE: &str = "Smart Door Lock System";

/// Hardware line shown under the title
pub const DASHBOARD_SUBTITLE: &str = "ESP32 CAM + Face Recognition & Fingerprint";

/// Prompt shown while no fingerprint has matched
pub const FINGERPRINT_PROMPT: &str = "Place finger on sensor to unlock";

const INDENT: &str = "  ";

/// Title, subtitle and door status badge
pub fn door_status_header(view: &StateView<'_>) -> String {
    let badge = match view.door_state {
        DoorState::Locked => "[LOCKED]",
        DoorState::Unlocked => "[UNLOCKED]",
    };
    format!("{}  {}\n{}", DASHBOARD_TITLE, badge, DASHBOARD_SUBTITLE)
}

/// Camera feed placeholder with face and motion readings
pub fn camera_panel(view: &StateView<'_>) -> String {
    let face = &view.snapshot.face_recognition;
    let mut panel = String::from("ESP32 CAM Feed\n");

    if face.detected {
        let label = if face.is_known() { "Recognized" } else { "Unrecognized" };
        panel.push_str(&format!(
            "{}{}: {} ({:.1}% confidence)\n",
            INDENT, label, face.name, face.confidence
        ));
    } else {
        panel.push_str(&format!("{}No face detected\n", INDENT));
    }

    let motion = if view.snapshot.pir.motion { "DETECTED" } else { "none" };
    panel.push_str(&format!("{}Motion: {}", INDENT, motion));
    panel
}

/// Fingerprint sensor result or prompt
pub fn fingerprint_panel(view: &StateView<'_>) -> String {
    let fingerprint = &view.snapshot.fingerprint;
    let mut panel = String::from("Fingerprint Sensor\n");

    match fingerprint.user_id.filter(|_| fingerprint.matched) {
        Some(user_id) => {
            panel.push_str(&format!("{}✓ Fingerprint Matched\n", INDENT));
            panel.push_str(&format!("{}User ID: {}\n", INDENT, user_id));
        }
        None => panel.push_str(&format!("{}{}\n", INDENT, FINGERPRINT_PROMPT)),
    }

    panel.push_str(&format!("{}Sensor: R307 Fingerprint Module (UART)", INDENT));
    panel
}

/// Servo, LED and buzzer outputs
pub fn actuator_panel(view: &StateView<'_>) -> String {
    let servo = view.snapshot.servo;
    let led = if view.snapshot.led.green { "GREEN" } else { "RED" };
    let buzzer = if view.snapshot.buzzer.active { "ON" } else { "OFF" };
    let position = if servo.locked { "locked" } else { "unlocked" };

    format!(
        "Actuators\n{i}Servo: {}° ({})\n{i}LED: {}\n{i}Buzzer: {}",
        servo.angle_degrees,
        position,
        led,
        buzzer,
        i = INDENT
    )
}

/// Access log, newest first
pub fn access_log_panel(view: &StateView<'_>) -> String {
    let mut panel = format!("Access Log ({}/{})", view.access_log.len(), view.access_log.capacity());

    if view.access_log.is_empty() {
        panel.push_str(&format!("\n{}No access events yet", INDENT));
        return panel;
    }

    for entry in view.access_log.iter() {
        let status = if entry.is_success() { "SUCCESS" } else { "FAILED" };
        panel.push_str(&format!(
            "\n{}{} {:<10} {:<16} {:<28} {}",
            INDENT,
            entry.time,
            entry.date,
            entry.method.to_string(),
            entry.user,
            status
        ));
    }
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{AccessLog, AccessLogEntry, ActivityHistory};
    use crate::sensors::{FaceRecognition, FingerprintReading, PirReading, SensorSnapshot};
    use crate::types::{AccessMethod, FingerprintId};
    use chrono::{TimeZone, Utc};

    fn render<R>(
        door_state: DoorState,
        snapshot: &SensorSnapshot,
        log: &AccessLog,
        f: impl FnOnce(&StateView<'_>) -> R,
    ) -> R {
        let activity = ActivityHistory::new(20);
        let view = StateView {
            now: Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 3).unwrap(),
            version: 1,
            door_state,
            snapshot,
            access_log: log,
            activity: &activity,
        };
        f(&view)
    }

    #[test]
    fn test_header() {
        let snapshot = SensorSnapshot::initial();
        let log = AccessLog::default();
        let header = render(DoorState::Locked, &snapshot, &log, |v| door_status_header(v));
        assert!(header.starts_with("Smart Door Lock System  [LOCKED]"));
        let header = render(DoorState::Unlocked, &snapshot, &log, |v| door_status_header(v));
        assert!(header.contains("[UNLOCKED]"));
    }

    #[test]
    fn test_camera_panel() {
        let log = AccessLog::default();
        let idle = SensorSnapshot::initial();
        let panel = render(DoorState::Locked, &idle, &log, |v| camera_panel(v));
        assert!(panel.contains("No face detected"));
        assert!(panel.contains("Motion: none"));

        let face = FaceRecognition { detected: true, name: "Jane Smith".to_string(), confidence: 92.5 };
        let seen = idle.with_observation(face, PirReading { motion: true });
        let panel = render(DoorState::Locked, &seen, &log, |v| camera_panel(v));
        assert!(panel.contains("Recognized: Jane Smith (92.5% confidence)"));
        assert!(panel.contains("Motion: DETECTED"));
    }

    #[test]
    fn test_fingerprint_panel() {
        let log = AccessLog::default();
        let idle = SensorSnapshot::initial();
        let panel = render(DoorState::Locked, &idle, &log, |v| fingerprint_panel(v));
        assert!(panel.contains(FINGERPRINT_PROMPT));

        let matched = idle.with_fingerprint(FingerprintReading::matched(FingerprintId::new(42)));
        let panel = render(DoorState::Unlocked, &matched, &log, |v| fingerprint_panel(v));
        assert!(panel.contains("✓ Fingerprint Matched"));
        assert!(panel.contains("User ID: FP-42"));
        assert!(!panel.contains(FINGERPRINT_PROMPT));
    }

    #[test]
    fn test_actuator_panel() {
        let log = AccessLog::default();
        let open = SensorSnapshot::initial().unlocked();
        let panel = render(DoorState::Unlocked, &open, &log, |v| actuator_panel(v));
        assert!(panel.contains("Servo: 90° (unlocked)"));
        assert!(panel.contains("LED: GREEN"));
        assert!(panel.contains("Buzzer: OFF"));

        let alarm = SensorSnapshot::initial().alerting();
        let panel = render(DoorState::Locked, &alarm, &log, |v| actuator_panel(v));
        assert!(panel.contains("Servo: 0° (locked)"));
        assert!(panel.contains("LED: RED"));
        assert!(panel.contains("Buzzer: ON"));
    }

    #[test]
    fn test_access_log_panel() {
        let snapshot = SensorSnapshot::initial();
        let mut log = AccessLog::default();
        let panel = render(DoorState::Locked, &snapshot, &log, |v| access_log_panel(v));
        assert!(panel.contains("No access events yet"));

        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 3).unwrap();
        log.record(AccessLogEntry::entry(at, AccessMethod::Fingerprint, "FP-42"));
        log.record(AccessLogEntry::alert(at, "Fingerprint tidak terdaftar"));
        let panel = render(DoorState::Locked, &snapshot, &log, |v| access_log_panel(v));

        let lines: Vec<_> = panel.lines().collect();
        assert_eq!(lines[0], "Access Log (2/10)");
        assert!(lines[1].contains("Fingerprint tidak terdaftar"));
        assert!(lines[1].ends_with("FAILED"));
        assert!(lines[2].starts_with("  09.05.03 7/3/2024"));
        assert!(lines[2].ends_with("SUCCESS"));
    }
}
