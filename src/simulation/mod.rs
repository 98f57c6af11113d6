//! Simulation inputs, batch loading and validation

mod data;
pub mod loader;
pub mod validation;

pub use data::{SimulationInput, Sex};
pub use loader::{load_inputs, load_inputs_from_reader};
pub use validation::{validate, statutory_retirement_year, ResolvedInput};
