//! Error types raised by the engine, the simulation store and the service layer

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures originating in the calculation engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Not enough years of work to qualify for a pension
    #[error("insufficient years of work: {years_of_work} given, minimum required is {minimum}")]
    Eligibility { minimum: i32, years_of_work: i32 },

    /// A field failed boundary validation
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Arithmetic produced a value that cannot be reported
    #[error("calculation error: {0}")]
    Computation(String),
}

impl EngineError {
    /// Stable machine-readable kind for error payloads
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Eligibility { .. } => ErrorKind::Eligibility,
            EngineError::InvalidInput { .. } => ErrorKind::InvalidInput,
            EngineError::Computation(_) => ErrorKind::Computation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Eligibility,
    InvalidInput,
    Computation,
}

/// Serializable failure payload stored in place of an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    pub kind: ErrorKind,

    /// Minimum years of work, present for eligibility failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_years: Option<i32>,
}

impl From<&EngineError> for ErrorPayload {
    fn from(err: &EngineError) -> Self {
        let minimum_years = match err {
            EngineError::Eligibility { minimum, .. } => Some(*minimum),
            _ => None,
        };
        Self {
            error: err.to_string(),
            kind: err.kind(),
            minimum_years,
        }
    }
}

/// Failures of a simulation store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("simulation {0} not found")]
    NotFound(u64),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Failures surfaced by the service layer
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("report error: {0}")]
    Report(#[from] csv::Error),

    #[error("report rendering failed")]
    Render(#[from] std::fmt::Error),
}
