//! Error types and handling
//!
//! Lock operations themselves never fail. Errors only come from the edges:
//! validating the configuration a system is built from and serializing its
//! session report.

use thiserror::Error;

use crate::types::ConfigValidationError;

/// Errors that can occur while setting up or reporting on a session
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration failed validation
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ConfigValidationError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SimulationError {
    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::Validation(_) => "Validation",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
