//! Pension Simulator - retirement benefit estimation for the Polish pension system
//!
//! This library provides:
//! - Eligibility checks and input resolution
//! - Capital accumulation with salary indexation and sick-leave drag
//! - Capital-to-pension conversion with a statutory floor
//! - Real values, replacement rate and deferral scenarios
//! - Sensitivity scenarios and salary history analysis
//! - An in-memory simulation store with text and CSV reports

pub mod simulation;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod error;
pub mod store;
pub mod service;
pub mod report;

// Re-export commonly used types
pub use simulation::{SimulationInput, Sex};
pub use assumptions::Assumptions;
pub use projection::{PensionEngine, EngineConfig, PensionEstimate, SimulationOutcome};
pub use scenario::ScenarioRunner;
pub use error::{EngineError, ServiceError, StoreError};
pub use store::{InMemoryStore, SimulationStore, SimulationRecord};
pub use service::SimulationService;
