//! Smart Door Lock Simulator
//!
//! A simulated smart door lock built around an ESP32 camera, a fingerprint
//! sensor, a PIR motion sensor, a lock servo, status LEDs and a buzzer.
//!
//! # Overview
//!
//! The simulator never touches hardware. A periodic sampler synthesises
//! face-recognition and motion readings, fingerprint scans either unlock the
//! door or raise an alert, and one-shot timers relock the door and silence the
//! buzzer. Everything runs on a single thread against a virtual clock, so a
//! session can be replayed exactly with a seeded or scripted random source.
//!
//! ## Key Features
//!
//! - **Virtual Time**: deadline-ordered timers advanced explicitly, no wall clock
//! - **Injectable Randomness**: seeded PRNG or a scripted sequence for tests
//! - **Observable State**: subscribers receive every change with a read-only view
//! - **Bounded Histories**: newest-first access log and a chronological activity chart
//! - **Text Views**: status header, sensor and actuator panels, log and chart
//!
//! ## Quick Start
//!
//! ```rust
//! use smart_door_lock_simulator::*;
//! use chrono::Duration;
//!
//! let mut system = DoorLockSystem::new(SimulationConfig { seed: Some(7), ..Default::default() })?;
//! system.start();
//!
//! system.unlock(AccessMethod::Manual, "operator");
//! assert_eq!(system.door_state(), DoorState::Unlocked);
//!
//! system.advance_by(Duration::seconds(5));
//! assert_eq!(system.door_state(), DoorState::Locked);
//! println!("{}", views::dashboard(&system.view()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums and configuration
//! - [`sensors`]: Sensor/actuator snapshot and random sources
//! - [`events`]: Access log and activity history
//! - [`simulation`]: Virtual time, sampler, controller and session owner
//! - [`views`]: Text renderers and the watch observer
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ TimerQueue  │───►│ Simulation  │───►│    Lock     │
//! │ (virtual    │    │   Clock     │    │ Controller  │
//! │  time)      │───────────────────────►│             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                                     │
//!        │                                     ▼
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ DoorLock    │───►│  Observers  │───►│    Views    │
//! │  System     │    │             │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod events;
pub mod sensors;
pub mod simulation;
pub mod types;
pub mod views;

// Core types and identifiers
pub use types::{
    // Enums
    AccessMethod,
    AccessStatus,
    // Configuration
    ConfigValidationError,
    DoorState,
    EntryType,
    // Identifiers
    FingerprintId,
    OutputFormat,
    SessionId,
    SimulationConfig,
    TimerPolicy,
};

// Sensors
pub use sensors::{LiveSource, RandomSource, ScriptedSource, SensorSnapshot};

// Events
pub use events::{AccessLog, AccessLogEntry, ActivityHistory, ActivityPoint};

// Simulation types and functionality
pub use simulation::{
    DoorLockSystem, LockController, ScanOutcome, SessionReport, SessionRunner, SessionStatistics,
    SimulationClock, SimulationError, StateChange, StateObserver, StateView, SubscriptionId,
    TimeManager, TimerQueue,
};
