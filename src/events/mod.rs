//! Access log and activity history
//!
//! This module holds the two bounded histories the lock keeps:
//!
//! - **AccessLog**: the most recent access and alert events, newest first
//! - **ActivityHistory**: the most recent motion/access chart samples, oldest first
//!
//! # Usage Example
//!
//! ```rust
//! use smart_door_lock_simulator::events::*;
//! use smart_door_lock_simulator::types::AccessMethod;
//! use chrono::Utc;
//!
//! let mut log = AccessLog::new(10);
//! log.record(AccessLogEntry::entry(Utc::now(), AccessMethod::Fingerprint, "FP-42"));
//! log.record(AccessLogEntry::alert(Utc::now(), "Fingerprint tidak terdaftar"));
//! assert!(log.latest().unwrap().is_alert());
//!
//! let mut history = ActivityHistory::new(20);
//! history.push(ActivityPoint::new(Utc::now(), true, false));
//! assert_eq!(history.motion_count(), 1);
//! ```

pub mod access_log;
pub mod activity;

// Re-export all public types for convenience
pub use access_log::*;
pub use activity::*;
