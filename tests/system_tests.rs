//! End-to-end tests for the door lock system

use chrono::{DateTime, Duration, TimeZone, Utc};
use smart_door_lock_simulator::sensors::ScriptedSource;
use smart_door_lock_simulator::simulation::{
    DoorLockSystem, SessionRunner, SimulationError, StateChange, StateView,
};
use smart_door_lock_simulator::types::{
    AccessMethod, ConfigValidationError, DoorState, SimulationConfig, TimerPolicy,
};
use smart_door_lock_simulator::views;
use std::cell::RefCell;
use std::rc::Rc;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 17, 8, 0, 0).unwrap()
}

fn system_with(config: SimulationConfig, draws: Vec<f64>, fallback: f64) -> DoorLockSystem {
    DoorLockSystem::with_source_at(config, ScriptedSource::new(draws).with_fallback(fallback), start())
        .unwrap()
}

#[test]
fn test_unlock_then_relock_after_five_seconds() {
    let mut system = system_with(SimulationConfig::default(), Vec::new(), 0.0);
    system.start();
    system.unlock(AccessMethod::Fingerprint, "FP-7");

    system.advance_by(Duration::milliseconds(4999));
    assert_eq!(system.door_state(), DoorState::Unlocked);
    assert_eq!(system.snapshot().servo.angle_degrees, 90);

    system.advance_by(Duration::milliseconds(1));
    assert_eq!(system.door_state(), DoorState::Locked);
    assert_eq!(system.snapshot().servo.angle_degrees, 0);
}

#[test]
fn test_alert_clears_after_three_seconds() {
    let mut system = system_with(SimulationConfig::default(), Vec::new(), 0.0);
    system.trigger_alert("Fingerprint tidak terdaftar");
    assert!(system.snapshot().buzzer.active);

    system.advance_by(Duration::milliseconds(3000));
    assert!(!system.snapshot().buzzer.active);
    assert!(system.snapshot().led.red);
}

#[test]
fn test_led_exclusive_across_a_busy_session() {
    let seen_inconsistent = Rc::new(RefCell::new(0));
    let counter = seen_inconsistent.clone();

    let mut system = system_with(SimulationConfig::default(), Vec::new(), 0.65);
    system.subscribe(move |_: &StateChange, view: &StateView<'_>| {
        let led = view.snapshot.led;
        if led.red == led.green || view.snapshot.servo.locked != view.door_state.is_locked() {
            *counter.borrow_mut() += 1;
        }
    });

    let summary = SessionRunner::new(Duration::minutes(2), Some(Duration::seconds(4))).run(&mut system);
    assert_eq!(summary.scans, 30);
    assert_eq!(*seen_inconsistent.borrow(), 0);
}

#[test]
fn test_history_is_bounded_fifo() {
    let mut system = system_with(SimulationConfig::default(), Vec::new(), 0.0);
    system.start();
    system.advance_by(Duration::seconds(3 * 25));

    let history = system.activity_history();
    assert_eq!(history.len(), 20);
    assert_eq!(history.iter().next().unwrap().timestamp, start() + Duration::seconds(18));
    assert_eq!(history.latest().unwrap().timestamp, start() + Duration::seconds(75));
}

#[test]
fn test_observers_and_unsubscribe() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut system = system_with(SimulationConfig::default(), vec![0.1], 0.0);

    let sink = seen.clone();
    let id = system
        .subscribe(move |change: &StateChange, _: &StateView<'_>| sink.borrow_mut().push(change.clone()))
        .unwrap();

    system.scan_fingerprint();
    system.lock();
    assert!(system.unsubscribe(id));
    system.unlock(AccessMethod::Manual, "ignored");

    assert_eq!(
        *seen.borrow(),
        vec![StateChange::FingerprintScanned { user_id: None }, StateChange::Locked { automatic: false }]
    );
    assert_eq!(system.version(), 3);
}

#[test]
fn test_shutdown_stops_late_timers() {
    let mut system = system_with(SimulationConfig::default(), Vec::new(), 0.0);
    system.start();
    system.unlock(AccessMethod::Manual, "operator");
    system.trigger_alert("tamper");
    system.shutdown();

    system.advance_by(Duration::minutes(10));
    assert_eq!(system.door_state(), DoorState::Unlocked);
    assert!(system.snapshot().buzzer.active);
    assert!(system.activity_history().is_empty());
}

#[test]
fn test_debounce_system() {
    let config = SimulationConfig { timer_policy: TimerPolicy::Debounce, ..Default::default() };
    let mut system = system_with(config, Vec::new(), 0.0);

    system.unlock(AccessMethod::Manual, "a");
    system.advance_by(Duration::seconds(4));
    system.unlock(AccessMethod::Manual, "b");
    assert_eq!(system.pending_timers(), 1);

    system.advance_by(Duration::seconds(4));
    assert_eq!(system.door_state(), DoorState::Unlocked);
    system.advance_by(Duration::seconds(1));
    assert_eq!(system.door_state(), DoorState::Locked);
    assert_eq!(system.statistics().auto_relocks, 1);
}

#[test]
fn test_seeded_sessions_are_reproducible() {
    let run = || {
        let config = SimulationConfig { seed: Some(1234), ..Default::default() };
        let mut system = DoorLockSystem::new(config).unwrap();
        SessionRunner::new(Duration::seconds(60), Some(Duration::seconds(5))).run(&mut system);
        let report = system.report();
        (
            report.statistics.samples,
            report.statistics.faces_detected,
            report.statistics.fingerprint_matches,
            report.access_log.iter().map(|e| e.user.clone()).collect::<Vec<_>>(),
        )
    };
    assert_eq!(run(), run());
}

#[test]
fn test_dashboard_after_session() {
    let mut system = system_with(SimulationConfig::default(), vec![0.9, 0.9, 0.9, 0.0, 0.0], 0.0);
    system.start();
    system.advance_by(Duration::seconds(3));

    let text = views::dashboard(&system.view());
    assert!(text.contains("Recognized: John Doe (85.0% confidence)"));
    assert!(text.contains("Motion: DETECTED"));
    assert!(text.contains("Motion █"));
}

#[test]
fn test_oversized_timing_is_rejected_at_construction() {
    for config in [
        SimulationConfig { relock_delay_ms: 1 << 62, ..Default::default() },
        SimulationConfig { relock_delay_ms: u64::MAX, ..Default::default() },
        SimulationConfig { duration_secs: 10_000_000_000_000, ..Default::default() },
    ] {
        let result =
            DoorLockSystem::with_source_at(config, ScriptedSource::new(Vec::<f64>::new()), start());
        assert!(matches!(
            result,
            Err(SimulationError::Validation(ConfigValidationError::ValueTooLarge { .. }))
        ));
    }
}

#[test]
fn test_longest_relock_delay_does_not_fire_early() {
    let config = SimulationConfig { relock_delay_ms: 86_400_000, ..Default::default() };
    let mut system = system_with(config, Vec::new(), 0.0);
    system.unlock(AccessMethod::Manual, "operator");

    system.advance_by(Duration::zero());
    assert_eq!(system.door_state(), DoorState::Unlocked);
    system.advance_by(Duration::hours(24));
    assert_eq!(system.door_state(), DoorState::Locked);
}
