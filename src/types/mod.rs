//! Core types and identifiers for the door lock simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulator.
//!
//! # Overview
//!
//! - **Identifiers**: log entry and session ids, fingerprint slots, timer handles
//! - **Enums**: door state, access methods, log classification, timer policy
//! - **Configuration**: simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use smart_door_lock_simulator::types::*;
//!
//! let fingerprint = FingerprintId::new(42);
//! assert_eq!(fingerprint.to_string(), "FP-42");
//!
//! let config = SimulationConfig {
//!     timer_policy: TimerPolicy::Debounce,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
