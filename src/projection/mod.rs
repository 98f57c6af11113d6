//! Pension projection: capital accumulation, conversion, valuation and deferral

mod engine;
mod estimate;
pub mod accumulation;
pub mod conversion;
pub mod deferral;
pub mod trajectory;
pub mod valuation;

pub use engine::{PensionEngine, EngineConfig};
pub use estimate::{PensionEstimate, CalculationDetails, SimulationRun, SimulationOutcome, LedgerSummary};
pub use accumulation::{AccumulationRow, ContributionPhase};
pub use deferral::{DeferralBenefit, DEFERRAL_HORIZONS};
pub use trajectory::TrajectoryPoint;
