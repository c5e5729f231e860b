//! Simulated sensors and actuators
//!
//! This module holds the sensor/actuator snapshot the controller publishes and
//! the randomness sources that stand in for real hardware readings.
//!
//! # Usage Example
//!
//! ```rust
//! use smart_door_lock_simulator::sensors::*;
//!
//! let mut source = ScriptedSource::new([0.9]);
//! assert!(source.chance_above(0.7));
//!
//! let snapshot = SensorSnapshot::initial().unlocked();
//! assert_eq!(snapshot.servo.angle_degrees, 90);
//! assert!(snapshot.is_consistent());
//! ```

pub mod snapshot;
pub mod source;

pub use snapshot::*;
pub use source::*;
