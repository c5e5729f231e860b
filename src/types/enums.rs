//! Enumeration types for the door lock simulator
//!
//! This module contains the enumerations shared across the simulator: door state,
//! access methods, log entry classification, timer policy and output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical state of the door lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DoorState {
    /// Servo at 0 degrees, bolt engaged
    #[default]
    Locked,
    /// Servo at 90 degrees, bolt retracted
    Unlocked,
}

impl DoorState {
    /// Whether the bolt is engaged
    pub fn is_locked(&self) -> bool {
        matches!(self, DoorState::Locked)
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoorState::Locked => write!(f, "LOCKED"),
            DoorState::Unlocked => write!(f, "UNLOCKED"),
        }
    }
}

impl FromStr for DoorState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "locked" => Ok(DoorState::Locked),
            "unlocked" => Ok(DoorState::Unlocked),
            _ => Err(format!("Unknown door state: {}", s)),
        }
    }
}

/// How an access log entry came about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMethod {
    /// Fingerprint sensor match
    Fingerprint,
    /// Camera face recognition
    FaceRecognition,
    /// Manual override (operator or CLI)
    Manual,
    /// Alert raised by the controller
    Alert,
}

impl fmt::Display for AccessMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMethod::Fingerprint => write!(f, "Fingerprint"),
            AccessMethod::FaceRecognition => write!(f, "Face Recognition"),
            AccessMethod::Manual => write!(f, "Manual"),
            AccessMethod::Alert => write!(f, "Alert"),
        }
    }
}

impl FromStr for AccessMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fingerprint" => Ok(AccessMethod::Fingerprint),
            "face recognition" | "facerecognition" | "face" => Ok(AccessMethod::FaceRecognition),
            "manual" => Ok(AccessMethod::Manual),
            "alert" => Ok(AccessMethod::Alert),
            _ => Err(format!("Unknown access method: {}", s)),
        }
    }
}

/// Outcome recorded on an access log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessStatus {
    /// Access granted
    Success,
    /// Access refused or alert raised
    Failed,
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessStatus::Success => write!(f, "success"),
            AccessStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Kind of access log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Someone came through the door
    Entry,
    /// The buzzer was sounded
    Alert,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::Entry => write!(f, "entry"),
            EntryType::Alert => write!(f, "alert"),
        }
    }
}

/// What happens to a pending one-shot timer when the same action is repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimerPolicy {
    /// Every scheduled relock or buzzer clear fires on its own
    #[default]
    Independent,
    /// A new relock or buzzer clear replaces the pending one
    Debounce,
}

impl fmt::Display for TimerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerPolicy::Independent => write!(f, "independent"),
            TimerPolicy::Debounce => write!(f, "debounce"),
        }
    }
}

impl FromStr for TimerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "independent" => Ok(TimerPolicy::Independent),
            "debounce" | "cancel" => Ok(TimerPolicy::Debounce),
            _ => Err(format!("Unknown timer policy: {}", s)),
        }
    }
}

/// Output formats for the session report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Rendered text dashboard
    Text,
    /// JSON session report
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "TEXT"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
