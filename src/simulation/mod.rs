//! Simulation core: virtual time, sampler, lock controller and session owner
//!
//! # Overview
//!
//! - **TimeManager** / **TimerQueue**: monotonic virtual clock and deadline-ordered timers
//! - **SimulationClock**: periodic face/motion sampler and chart history
//! - **LockController**: door state machine with auto-relock and buzzer clear
//! - **DoorLockSystem**: owns everything and publishes changes to observers
//! - **SessionRunner**: drives a fixed-length session for the command line
//! - **SessionStatistics** / **SimulationError** / **LoggingConfig**: ambient plumbing
//!
//! # Usage Example
//!
//! ```rust
//! use smart_door_lock_simulator::sensors::ScriptedSource;
//! use smart_door_lock_simulator::simulation::*;
//! use smart_door_lock_simulator::types::*;
//! use chrono::Duration;
//!
//! let source = ScriptedSource::new([0.9, 0.042]);
//! let mut system = DoorLockSystem::with_source(SimulationConfig::default(), source).unwrap();
//!
//! system.scan_fingerprint();
//! assert_eq!(system.door_state(), DoorState::Unlocked);
//!
//! system.advance_by(Duration::milliseconds(5000));
//! assert_eq!(system.door_state(), DoorState::Locked);
//! ```

pub mod clock;
pub mod controller;
pub mod error;
pub mod logging;
pub mod observer;
pub mod orchestrator;
pub mod runner;
pub mod statistics;
pub mod time_manager;
pub mod timer_queue;

// Re-export all public types for convenience
pub use clock::*;
pub use controller::*;
pub use error::*;
pub use logging::*;
pub use observer::*;
pub use orchestrator::*;
pub use runner::*;
pub use statistics::*;
pub use time_manager::*;
pub use timer_queue::*;
