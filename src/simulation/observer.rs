//! Change notification for presentation layers
//!
//! Views never poll or mutate the lock. They subscribe a [`StateObserver`] and
//! receive a [`StateChange`] plus a read-only [`StateView`] after every
//! transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::events::{AccessLog, ActivityHistory};
use crate::sensors::SensorSnapshot;
use crate::types::{AccessMethod, DoorState, FingerprintId};

/// What just happened to the lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StateChange {
    /// The sampler produced a new camera/PIR reading
    SensorsSampled {
        /// Whether a face was in frame
        face_detected: bool,
        /// Whether the PIR sensor fired
        motion: bool,
    },
    /// The fingerprint button was pressed
    FingerprintScanned {
        /// Matched template, if any
        user_id: Option<FingerprintId>,
    },
    /// The door was unlocked directly
    Unlocked {
        /// How access was granted
        method: AccessMethod,
        /// Who was let in
        identifier: String,
    },
    /// The door was locked
    Locked {
        /// Whether the auto-relock timer did it
        automatic: bool,
    },
    /// An alert was raised directly
    AlertRaised {
        /// Alert reason
        reason: String,
    },
    /// The buzzer went quiet after an alert
    BuzzerCleared,
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateChange::SensorsSampled { face_detected, motion } => {
                write!(f, "Sensors sampled (face: {}, motion: {})", face_detected, motion)
            }
            StateChange::FingerprintScanned { user_id: Some(id) } => {
                write!(f, "Fingerprint matched {}", id)
            }
            StateChange::FingerprintScanned { user_id: None } => write!(f, "Fingerprint rejected"),
            StateChange::Unlocked { method, identifier } => {
                write!(f, "Unlocked by {} ({})", method, identifier)
            }
            StateChange::Locked { automatic: true } => write!(f, "Auto-relocked"),
            StateChange::Locked { automatic: false } => write!(f, "Locked"),
            StateChange::AlertRaised { reason } => write!(f, "Alert: {}", reason),
            StateChange::BuzzerCleared => write!(f, "Buzzer cleared"),
        }
    }
}

/// Read-only view of the lock after a transition
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    /// Virtual time of the transition
    pub now: DateTime<Utc>,
    /// Monotonic change counter
    pub version: u64,
    /// Door state
    pub door_state: DoorState,
    /// Sensor and actuator readings
    pub snapshot: &'a SensorSnapshot,
    /// Access log, newest first
    pub access_log: &'a AccessLog,
    /// Chart history, oldest first
    pub activity: &'a ActivityHistory,
}

/// Receiver of state change notifications
pub trait StateObserver {
    /// Called after every transition
    fn on_change(&mut self, change: &StateChange, view: &StateView<'_>);
}

impl<F> StateObserver for F
where
    F: FnMut(&StateChange, &StateView<'_>),
{
    fn on_change(&mut self, change: &StateChange, view: &StateView<'_>) {
        self(change, view)
    }
}

/// Handle returned by a subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Ordered set of observers
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(SubscriptionId, Box<dyn StateObserver>)>,
    next_id: u64,
}

impl ObserverRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; observers are notified in subscription order
    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.push((id, observer));
        id
    }

    /// Register a closure as an observer
    pub fn subscribe_fn<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StateChange, &StateView<'_>) + 'static,
    {
        self.subscribe(Box::new(observer))
    }

    /// Remove an observer; returns false when the id is unknown
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Deliver a change to every observer
    pub fn notify(&mut self, change: &StateChange, view: &StateView<'_>) {
        for (_, observer) in self.observers.iter_mut() {
            observer.on_change(change, view);
        }
    }

    /// Drop every observer
    pub fn clear(&mut self) {
        self.observers.clear();
    }

    /// Number of observers
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observer is registered
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
