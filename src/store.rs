//! Simulation records and the store that keeps them
//!
//! A record is created in `processing` state before the engine runs and is
//! completed with either the estimate or the error payload afterwards.

use crate::error::StoreError;
use crate::projection::SimulationOutcome;
use crate::simulation::SimulationInput;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    Processing,
    Completed,
}

impl SimulationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationStatus::Processing => "processing",
            SimulationStatus::Completed => "completed",
        }
    }
}

/// One stored simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub id: u64,
    pub input: SimulationInput,

    /// `None` while processing
    pub outcome: Option<SimulationOutcome>,

    pub status: SimulationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate activity counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub total_simulations: usize,
    pub status_breakdown: BTreeMap<SimulationStatus, usize>,
    pub recent_7_days: usize,
    pub last_30_days: usize,

    /// Simulations per day over the last 30 days, rounded to 2 dp
    pub avg_per_day: f64,
}

/// Persistence seam for simulation records
pub trait SimulationStore: Send + Sync {
    /// Insert a new record in `processing` state
    fn create(&self, input: SimulationInput) -> Result<SimulationRecord, StoreError>;

    fn get(&self, id: u64) -> Result<SimulationRecord, StoreError>;

    /// Attach the outcome and mark the record completed
    fn update(&self, id: u64, outcome: SimulationOutcome) -> Result<SimulationRecord, StoreError>;

    /// Records newest first
    fn list(&self, limit: usize, offset: usize) -> Result<Vec<SimulationRecord>, StoreError>;

    fn delete(&self, id: u64) -> Result<(), StoreError>;

    fn count(&self) -> Result<usize, StoreError>;

    /// Records created within `[from, to]`, newest first
    fn range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<SimulationRecord>, StoreError>;

    /// Remove every record, returning how many were removed
    fn clear(&self) -> Result<usize, StoreError>;

    fn statistics_at(&self, now: DateTime<Utc>) -> Result<StoreStatistics, StoreError>;

    fn statistics(&self) -> Result<StoreStatistics, StoreError> {
        self.statistics_at(Utc::now())
    }
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    records: BTreeMap<u64, SimulationRecord>,
}

/// Process-local store; ids start at 1 and are never reused
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl SimulationStore for InMemoryStore {
    fn create(&self, input: SimulationInput) -> Result<SimulationRecord, StoreError> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let now = Utc::now();

        let record = SimulationRecord {
            id: inner.next_id,
            input,
            outcome: None,
            status: SimulationStatus::Processing,
            created_at: now,
            updated_at: now,
        };
        inner.records.insert(record.id, record.clone());

        log::debug!("created simulation {}", record.id);
        Ok(record)
    }

    fn get(&self, id: u64) -> Result<SimulationRecord, StoreError> {
        self.lock()?.records.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn update(&self, id: u64, outcome: SimulationOutcome) -> Result<SimulationRecord, StoreError> {
        let mut inner = self.lock()?;
        let record = inner.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        record.outcome = Some(outcome);
        record.status = SimulationStatus::Completed;
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    fn list(&self, limit: usize, offset: usize) -> Result<Vec<SimulationRecord>, StoreError> {
        Ok(self
            .lock()?
            .records
            .values()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.lock()?
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.records.len())
    }

    fn range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<SimulationRecord>, StoreError> {
        Ok(self
            .lock()?
            .records
            .values()
            .rev()
            .filter(|r| r.created_at >= from && r.created_at <= to)
            .cloned()
            .collect())
    }

    fn clear(&self) -> Result<usize, StoreError> {
        let mut inner = self.lock()?;
        let removed = inner.records.len();
        inner.records.clear();

        log::info!("cleared {} simulations", removed);
        Ok(removed)
    }

    fn statistics_at(&self, now: DateTime<Utc>) -> Result<StoreStatistics, StoreError> {
        let inner = self.lock()?;
        let week_ago = now - Duration::days(7);
        let month_ago = now - Duration::days(30);

        let mut status_breakdown = BTreeMap::new();
        let mut recent_7_days = 0;
        let mut last_30_days = 0;

        for record in inner.records.values() {
            *status_breakdown.entry(record.status).or_insert(0) += 1;
            if record.created_at >= week_ago {
                recent_7_days += 1;
            }
            if record.created_at >= month_ago {
                last_30_days += 1;
            }
        }

        Ok(StoreStatistics {
            total_simulations: inner.records.len(),
            status_breakdown,
            recent_7_days,
            last_30_days,
            avg_per_day: crate::projection::valuation::round2(last_30_days as f64 / 30.0),
        })
    }
}
