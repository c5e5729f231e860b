//! Session statistics collection and reporting
//!
//! Counters are updated from the same [`StateChange`] stream the observers see,
//! so the numbers always agree with what a view displayed.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateChange;

/// Counters over one simulator session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatistics {
    /// Camera/PIR samples taken
    pub samples: usize,
    /// Samples with a face in frame
    pub faces_detected: usize,
    /// Samples with an enrolled face
    pub known_faces: usize,
    /// Samples where the PIR sensor fired
    pub motion_events: usize,
    /// Fingerprint button presses
    pub fingerprint_scans: usize,
    /// Scans that matched a template
    pub fingerprint_matches: usize,
    /// Scans that matched nothing
    pub fingerprint_rejections: usize,
    /// Successful unlocks from any method
    pub unlocks: usize,
    /// Locks from any cause
    pub locks: usize,
    /// Locks performed by the relock timer
    pub auto_relocks: usize,
    /// Alerts raised
    pub alerts: usize,
    /// Buzzer clears
    pub buzzer_clears: usize,
    /// Virtual time covered, in milliseconds
    pub elapsed_ms: i64,
}

impl SessionStatistics {
    /// Create zeroed statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one change
    ///
    /// A fingerprint scan counts as a scan plus the unlock or alert it caused.
    pub fn record(&mut self, change: &StateChange, known_face: bool) {
        match change {
            StateChange::SensorsSampled { face_detected, motion } => {
                self.samples += 1;
                if *face_detected {
                    self.faces_detected += 1;
                    if known_face {
                        self.known_faces += 1;
                    }
                }
                if *motion {
                    self.motion_events += 1;
                }
            }
            StateChange::FingerprintScanned { user_id } => {
                self.fingerprint_scans += 1;
                if user_id.is_some() {
                    self.fingerprint_matches += 1;
                    self.unlocks += 1;
                } else {
                    self.fingerprint_rejections += 1;
                    self.alerts += 1;
                }
            }
            StateChange::Unlocked { .. } => self.unlocks += 1,
            StateChange::Locked { automatic } => {
                self.locks += 1;
                if *automatic {
                    self.auto_relocks += 1;
                }
            }
            StateChange::AlertRaised { .. } => self.alerts += 1,
            StateChange::BuzzerCleared => self.buzzer_clears += 1,
        }
    }

    /// Record how much virtual time the session covered
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_ms = elapsed.num_milliseconds();
    }

    /// Share of scans that matched, in percent
    pub fn match_percentage(&self) -> f64 {
        if self.fingerprint_scans == 0 {
            0.0
        } else {
            (self.fingerprint_matches as f64 / self.fingerprint_scans as f64) * 100.0
        }
    }

    /// Share of samples with a face in frame, in percent
    pub fn face_percentage(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            (self.faces_detected as f64 / self.samples as f64) * 100.0
        }
    }

    /// Share of samples where the PIR sensor fired, in percent
    pub fn motion_percentage(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            (self.motion_events as f64 / self.samples as f64) * 100.0
        }
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "Session Summary: {} samples | Scans: {} ({:.1}% matched) | Unlocks: {} | Auto-relocks: {} | Alerts: {}",
            self.samples,
            self.fingerprint_scans,
            self.match_percentage(),
            self.unlocks,
            self.auto_relocks,
            self.alerts
        )
    }

    /// Multi-line report
    pub fn generate_summary_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Door Lock Session Report ===\n\n");
        report.push_str(&format!(
            "Virtual Time Covered: {:.1} seconds\n\n",
            self.elapsed_ms as f64 / 1000.0
        ));

        report.push_str("Sensors:\n");
        report.push_str(&format!("  • Samples: {}\n", self.samples));
        report.push_str(&format!(
            "  • Faces Detected: {} ({:.1}%), {} known\n",
            self.faces_detected,
            self.face_percentage(),
            self.known_faces
        ));
        report.push_str(&format!(
            "  • Motion Events: {} ({:.1}%)\n\n",
            self.motion_events,
            self.motion_percentage()
        ));

        report.push_str("Access:\n");
        report.push_str(&format!(
            "  • Fingerprint Scans: {} ({} matched, {} rejected)\n",
            self.fingerprint_scans, self.fingerprint_matches, self.fingerprint_rejections
        ));
        report.push_str(&format!("  • Unlocks: {}\n", self.unlocks));
        report.push_str(&format!("  • Locks: {} ({} automatic)\n", self.locks, self.auto_relocks));
        report.push_str(&format!("  • Alerts: {} ({} cleared)\n", self.alerts, self.buzzer_clears));

        report
    }
}

impl fmt::Display for SessionStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_report())
    }
}
