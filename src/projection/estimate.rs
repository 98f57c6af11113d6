//! Output structures for a single simulation

use super::accumulation::AccumulationRow;
use super::deferral::DeferralBenefit;
use crate::error::{EngineError, ErrorPayload};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inputs echoed back alongside the estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationDetails {
    pub base_salary: f64,

    /// Years between the valuation year and retirement
    pub indexation_years: i32,

    /// Average monthly salary lost to sick leave (0 when not included)
    pub sick_leave_impact: f64,
}

/// Complete pension estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PensionEstimate {
    /// Nominal monthly pension
    pub actual_amount: f64,

    /// Monthly pension in valuation-year prices
    pub real_amount: f64,

    /// Nominal pension over gross salary, in percent
    pub replacement_rate: f64,

    pub accumulated_capital: f64,
    pub years_of_work: i32,
    pub retirement_year: i32,

    /// Average pension in the retirement year, for comparison only
    pub average_pension_comparison: f64,

    /// Keyed `"1_years"`, `"2_years"`, `"5_years"`
    pub deferral_benefits: BTreeMap<String, DeferralBenefit>,

    pub calculation_details: CalculationDetails,
}

impl PensionEstimate {
    /// Deferral benefit for a horizon in years
    pub fn deferral(&self, years: u32) -> Option<&DeferralBenefit> {
        self.deferral_benefits.get(&super::deferral::deferral_key(years))
    }

    /// Whether the statutory minimum pension is binding
    pub fn is_floored(&self, minimum_pension: f64) -> bool {
        (self.actual_amount - minimum_pension).abs() < 0.005
    }
}

/// Either a finished estimate or the error that replaced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimulationOutcome {
    Completed(PensionEstimate),
    Failed(ErrorPayload),
}

impl SimulationOutcome {
    pub fn estimate(&self) -> Option<&PensionEstimate> {
        match self {
            SimulationOutcome::Completed(estimate) => Some(estimate),
            SimulationOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorPayload> {
        match self {
            SimulationOutcome::Completed(_) => None,
            SimulationOutcome::Failed(payload) => Some(payload),
        }
    }
}

impl From<Result<PensionEstimate, EngineError>> for SimulationOutcome {
    fn from(result: Result<PensionEstimate, EngineError>) -> Self {
        match result {
            Ok(estimate) => SimulationOutcome::Completed(estimate),
            Err(err) => SimulationOutcome::Failed(ErrorPayload::from(&err)),
        }
    }
}

/// Estimate plus the optional accumulation ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub estimate: PensionEstimate,
    pub ledger: Vec<AccumulationRow>,
}

impl SimulationRun {
    /// Summary statistics over the ledger
    pub fn summary(&self) -> LedgerSummary {
        let total_contributions: f64 = self.ledger.iter().map(|r| r.contribution).sum();
        let past_years = self
            .ledger
            .iter()
            .filter(|r| r.phase == super::accumulation::ContributionPhase::Past)
            .count() as u32;

        LedgerSummary {
            total_years: self.ledger.len() as u32,
            past_years,
            future_years: self.ledger.len() as u32 - past_years,
            total_contributions,
            final_capital: self.ledger.last().map(|r| r.capital).unwrap_or(0.0),
        }
    }
}

/// Summary statistics for a ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_years: u32,
    pub past_years: u32,
    pub future_years: u32,
    pub total_contributions: f64,
    pub final_capital: f64,
}
