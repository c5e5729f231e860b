//! Text presentation of the door lock
//!
//! Views are pure functions from a [`StateView`] to a string. The
//! [`WatchPrinter`] observer re-renders the dashboard whenever the lock changes.
//!
//! # Usage Example
//!
//! ```rust
//! use smart_door_lock_simulator::sensors::ScriptedSource;
//! use smart_door_lock_simulator::simulation::DoorLockSystem;
//! use smart_door_lock_simulator::types::SimulationConfig;
//! use smart_door_lock_simulator::views::dashboard;
//!
//! let system = DoorLockSystem::with_source(SimulationConfig::default(), ScriptedSource::new([0.5])).unwrap();
//! let text = dashboard(&system.view());
//! assert!(text.contains("[LOCKED]"));
//! assert!(text.contains("Place finger on sensor to unlock"));
//! ```

pub mod chart;
pub mod panels;

pub use chart::*;
pub use panels::*;

use std::io::Write;
use tracing::warn;

use crate::events::TIME_FORMAT;
use crate::simulation::{StateChange, StateObserver, StateView};

const RULE: &str = "--------------------------------------------------------------";

/// Every panel stacked into one screen
pub fn dashboard(view: &StateView<'_>) -> String {
    [
        door_status_header(view),
        camera_panel(view),
        fingerprint_panel(view),
        actuator_panel(view),
        access_log_panel(view),
        activity_chart(view),
    ]
    .join(&format!("\n{}\n", RULE))
}

/// One-line description of a change, prefixed with the virtual time
pub fn change_line(change: &StateChange, view: &StateView<'_>) -> String {
    format!("[{}] #{} {}", view.now.format(TIME_FORMAT), view.version, change)
}

/// Observer that writes a change line, and optionally the dashboard, per change
#[derive(Debug)]
pub struct WatchPrinter<W: Write> {
    writer: W,
    full_dashboard: bool,
    skip_samples: bool,
}

impl<W: Write> WatchPrinter<W> {
    /// Print a change line and the full dashboard for every change
    pub fn new(writer: W) -> Self {
        Self { writer, full_dashboard: true, skip_samples: false }
    }

    /// Print only the change lines
    pub fn lines_only(mut self) -> Self {
        self.full_dashboard = false;
        self
    }

    /// Ignore periodic sensor samples
    pub fn skip_samples(mut self) -> Self {
        self.skip_samples = true;
        self
    }

    fn write_change(&mut self, change: &StateChange, view: &StateView<'_>) -> std::io::Result<()> {
        writeln!(self.writer, "{}", change_line(change, view))?;
        if self.full_dashboard {
            writeln!(self.writer, "{}\n", dashboard(view))?;
        }
        self.writer.flush()
    }
}

impl<W: Write> StateObserver for WatchPrinter<W> {
    fn on_change(&mut self, change: &StateChange, view: &StateView<'_>) {
        if self.skip_samples && matches!(change, StateChange::SensorsSampled { .. }) {
            return;
        }
        if let Err(e) = self.write_change(change, view) {
            warn!("Failed to write dashboard: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::ScriptedSource;
    use crate::simulation::DoorLockSystem;
    use crate::types::{AccessMethod, SimulationConfig};
    use chrono::{Duration, TimeZone, Utc};
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    fn system() -> DoorLockSystem {
        DoorLockSystem::with_source_at(
            SimulationConfig::default(),
            ScriptedSource::new(Vec::<f64>::new()),
            Utc.with_ymd_and_hms(2024, 3, 7, 9, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_dashboard_has_every_panel() {
        let system = system();
        let text = dashboard(&system.view());
        for heading in [
            "Smart Door Lock System",
            "ESP32 CAM Feed",
            "Fingerprint Sensor",
            "Actuators",
            "Access Log",
            "Security Activity",
        ] {
            assert!(text.contains(heading), "missing {}", heading);
        }
    }

    #[test]
    fn test_watch_printer_follows_changes() {
        let buffer = SharedBuffer::default();
        let mut system = system();
        system.subscribe_observer(Box::new(WatchPrinter::new(buffer.clone())));

        system.unlock(AccessMethod::Manual, "operator");
        let out = buffer.contents();
        assert!(out.starts_with("[09.00.00] #1 Unlocked by Manual (operator)"));
        assert!(out.contains("[UNLOCKED]"));

        system.advance_by(Duration::seconds(5));
        assert!(buffer.contents().contains("[09.00.05] #2 Auto-relocked"));
    }

    #[test]
    fn test_watch_printer_lines_only_skipping_samples() {
        let buffer = SharedBuffer::default();
        let mut system = system();
        system.subscribe_observer(Box::new(
            WatchPrinter::new(buffer.clone()).lines_only().skip_samples(),
        ));

        system.start();
        system.trigger_alert("tamper");
        system.advance_by(Duration::seconds(3));

        let out = buffer.contents();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines, vec!["[09.00.00] #1 Alert: tamper", "[09.00.03] #3 Buzzer cleared"]);
    }
}
