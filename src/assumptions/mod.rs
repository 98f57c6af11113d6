//! Actuarial assumptions: economic rates, demographic tables and the valuation year

mod demographics;
mod rates;
pub mod loader;

pub use demographics::{BySex, Demographics};
pub use rates::EconomicRates;
pub use loader::LoadedAssumptions;

use chrono::Datelike;
use std::path::Path;

/// Container for every constant the engine reads
///
/// Passed explicitly into each engine call so tests and scenario runs can
/// substitute alternate tables without touching global state.
#[derive(Debug, Clone, PartialEq)]
pub struct Assumptions {
    pub rates: EconomicRates,
    pub demographics: Demographics,

    /// Calendar year the model treats as "now"
    pub valuation_year: i32,
}

impl Assumptions {
    /// Reference constants valued at the current calendar year
    pub fn reference() -> Self {
        Self::reference_for_year(current_calendar_year())
    }

    /// Reference constants valued at a fixed year
    pub fn reference_for_year(valuation_year: i32) -> Self {
        Self {
            rates: EconomicRates::reference(),
            demographics: Demographics::reference(),
            valuation_year,
        }
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let loaded = LoadedAssumptions::load_from(path)?;
        Ok(Self::from_loaded(&loaded))
    }

    /// Build from already-loaded tables; missing entries keep reference values
    pub fn from_loaded(loaded: &LoadedAssumptions) -> Self {
        Self {
            rates: EconomicRates::from_loaded(loaded),
            demographics: Demographics::from_loaded(loaded),
            valuation_year: loaded.valuation_year().unwrap_or_else(current_calendar_year),
        }
    }

    /// Copy of these assumptions valued at another year
    pub fn at_year(mut self, valuation_year: i32) -> Self {
        self.valuation_year = valuation_year;
        self
    }

    /// Copy of these assumptions with salary growth scaled by `multiplier`
    pub fn with_salary_growth_multiplier(mut self, multiplier: f64) -> Self {
        self.rates.salary_growth *= multiplier;
        self
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::reference()
    }
}

fn current_calendar_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_matches_reference_tables() {
        let loaded = Assumptions::from_csv().expect("Failed to load assumptions");
        let reference = Assumptions::reference();

        assert_eq!(loaded.rates, reference.rates);
        assert_eq!(loaded.demographics, reference.demographics);
    }

    #[test]
    fn test_growth_multiplier_only_touches_growth() {
        let base = Assumptions::reference_for_year(2025);
        let scaled = base.clone().with_salary_growth_multiplier(1.5);

        assert!((scaled.rates.salary_growth - 0.045).abs() < 1e-12);
        assert_eq!(scaled.rates.inflation, base.rates.inflation);
        assert_eq!(scaled.valuation_year, 2025);
    }

    #[test]
    fn test_loaded_valuation_year_wins() {
        let mut loaded = LoadedAssumptions::default();
        loaded.rates.insert("valuation_year".to_string(), 2031.0);
        loaded.demographics.insert("retirement_age".to_string(), (62.0, 67.0));

        let assumptions = Assumptions::from_loaded(&loaded);
        assert_eq!(assumptions.valuation_year, 2031);
        assert_eq!(assumptions.demographics.retirement_age.male, 67);
        assert_eq!(assumptions.rates, EconomicRates::reference());
    }
}
