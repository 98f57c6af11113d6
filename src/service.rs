//! Request-level service: validates raw payloads, runs the engine and keeps
//! every simulation in a store

use crate::assumptions::Assumptions;
use crate::error::ServiceError;
use crate::projection::{PensionEngine, SimulationOutcome};
use crate::report;
use crate::scenario::{AdvancedAnalysis, ScenarioRunner};
use crate::simulation::SimulationInput;
use crate::store::{InMemoryStore, SimulationRecord, SimulationStore, StoreStatistics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;

/// Fields a payload must carry before it is deserialized
pub const REQUIRED_FIELDS: [&str; 4] = ["age", "sex", "gross_salary", "work_start_year"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub simulation_id: u64,
    pub outcome: SimulationOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragePensions {
    pub general: f64,
    pub men: f64,
    pub women: f64,
    pub by_voivodeship: BTreeMap<String, f64>,
}

/// Static figures shown next to the simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub average_pensions: AveragePensions,
    pub did_you_know: Vec<String>,
}

impl DashboardSnapshot {
    pub fn reference() -> Self {
        let by_voivodeship = [("mazowieckie", 2700.0), ("małopolskie", 2400.0), ("śląskie", 2900.0)]
            .into_iter()
            .map(|(name, amount)| (name.to_string(), amount))
            .collect();

        Self {
            average_pensions: AveragePensions {
                general: 2500.0,
                men: 2800.0,
                women: 2200.0,
                by_voivodeship,
            },
            did_you_know: vec![
                "The highest pension in Poland is paid in the Silesian voivodeship and amounts to 15 000 PLN".into(),
                "An average worker in Poland spends 14 days a year on sick leave".into(),
                "Every year of delayed retirement raises the pension noticeably".into(),
            ],
        }
    }
}

pub struct SimulationService {
    store: Box<dyn SimulationStore>,
    engine: PensionEngine,
    runner: ScenarioRunner,
}

impl SimulationService {
    pub fn new(store: Box<dyn SimulationStore>, assumptions: Assumptions) -> Self {
        Self {
            store,
            engine: PensionEngine::with_assumptions(assumptions.clone()),
            runner: ScenarioRunner::with_assumptions(assumptions),
        }
    }

    /// Service over an empty in-memory store
    pub fn in_memory(assumptions: Assumptions) -> Self {
        Self::new(Box::new(InMemoryStore::new()), assumptions)
    }

    /// Validate, persist and compute one simulation payload
    ///
    /// Engine failures are stored on the record and returned as the outcome;
    /// only malformed payloads and store failures are errors here.
    pub fn simulate(&self, payload: &serde_json::Value) -> Result<SimulationResponse, ServiceError> {
        for field in REQUIRED_FIELDS {
            if payload.get(field).map_or(true, serde_json::Value::is_null) {
                return Err(ServiceError::MissingField(field));
            }
        }

        let input: SimulationInput = serde_json::from_value(payload.clone())?;
        self.submit(input)
    }

    /// Persist and compute an already typed input
    pub fn submit(&self, input: SimulationInput) -> Result<SimulationResponse, ServiceError> {
        let record = self.store.create(input)?;
        let outcome = SimulationOutcome::from(self.engine.compute(&record.input));

        if let Some(err) = outcome.error() {
            log::info!("simulation {} failed: {}", record.id, err.error);
        }

        let record = self.store.update(record.id, outcome.clone())?;
        log::debug!("simulation {} {}", record.id, record.status.as_str());

        Ok(SimulationResponse {
            simulation_id: record.id,
            outcome,
        })
    }

    pub fn get(&self, id: u64) -> Result<SimulationRecord, ServiceError> {
        Ok(self.store.get(id)?)
    }

    /// Re-run the sensitivity analysis on a stored input
    pub fn advanced(&self, id: u64) -> Result<AdvancedAnalysis, ServiceError> {
        let record = self.store.get(id)?;
        Ok(self.runner.advanced_analysis(&record.input)?)
    }

    pub fn summary_report(&self, id: u64) -> Result<String, ServiceError> {
        Ok(report::summary_report(&self.store.get(id)?)?)
    }

    /// Usage report over every stored simulation, newest first
    pub fn write_usage_report<W: io::Write>(&self, writer: W) -> Result<(), ServiceError> {
        let records = self.store.list(usize::MAX, 0)?;
        report::write_usage_report(&records, writer)?;
        Ok(())
    }

    pub fn list(&self, limit: usize, offset: usize) -> Result<Vec<SimulationRecord>, ServiceError> {
        Ok(self.store.list(limit, offset)?)
    }

    pub fn statistics(&self) -> Result<StoreStatistics, ServiceError> {
        Ok(self.store.statistics()?)
    }

    pub fn dashboard(&self) -> DashboardSnapshot {
        DashboardSnapshot::reference()
    }

    pub fn store(&self) -> &dyn SimulationStore {
        self.store.as_ref()
    }
}
