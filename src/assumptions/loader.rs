//! CSV-based assumption loader
//!
//! Loads the actuarial constant tables from CSV files in data/assumptions/

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// Environment variable that overrides the default assumptions directory
pub const ASSUMPTIONS_PATH_ENV: &str = "PENSION_ASSUMPTIONS_PATH";

/// Directory to load tables from: explicit override, then the environment, then the default
pub fn assumptions_dir(override_path: Option<&Path>) -> PathBuf {
    match override_path {
        Some(path) => path.to_path_buf(),
        None => std::env::var_os(ASSUMPTIONS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSUMPTIONS_PATH)),
    }
}

/// Load scalar rates from rates.csv
/// Returns HashMap<parameter, value>
pub fn load_rates(path: &Path) -> Result<HashMap<String, f64>, Box<dyn Error>> {
    let file = File::open(path.join("rates.csv"))?;
    load_rates_from_reader(file)
}

/// Load scalar rates from any reader with `parameter,value` rows
pub fn load_rates_from_reader<R: Read>(reader: R) -> Result<HashMap<String, f64>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rates = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let name = column(&record, 0, "parameter")?.to_string();
        let value: f64 = column(&record, 1, "value")?.parse()?;
        rates.insert(name, value);
    }

    Ok(rates)
}

/// Load sex-dependent parameters from demographics.csv
/// Returns HashMap<parameter, (female, male)>
pub fn load_demographics(path: &Path) -> Result<HashMap<String, (f64, f64)>, Box<dyn Error>> {
    let file = File::open(path.join("demographics.csv"))?;
    load_demographics_from_reader(file)
}

/// Load sex-dependent parameters from any reader with `parameter,female,male` rows
pub fn load_demographics_from_reader<R: Read>(
    reader: R,
) -> Result<HashMap<String, (f64, f64)>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut table = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let name = column(&record, 0, "parameter")?.to_string();
        let female: f64 = column(&record, 1, "female")?.parse()?;
        let male: f64 = column(&record, 2, "male")?.parse()?;
        table.insert(name, (female, male));
    }

    Ok(table)
}

/// Trimmed field at `idx`, or an error naming the missing column
fn column<'a>(record: &'a csv::StringRecord, idx: usize, name: &str) -> Result<&'a str, Box<dyn Error>> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| format!("missing '{}' column in row {:?}", name, record).into())
}

/// Raw tables loaded from the given directory
#[derive(Debug, Clone, Default)]
pub struct LoadedAssumptions {
    pub rates: HashMap<String, f64>,
    pub demographics: HashMap<String, (f64, f64)>,
}

impl LoadedAssumptions {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, Box<dyn Error>> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        log::debug!("loading assumption tables from {}", path.display());
        Ok(Self {
            rates: load_rates(path)?,
            demographics: load_demographics(path)?,
        })
    }

    /// Valuation year pinned in rates.csv, if any
    pub fn valuation_year(&self) -> Option<i32> {
        self.rates.get("valuation_year").map(|y| y.round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let dir = assumptions_dir(Some(Path::new("/tmp/tables")));
        assert_eq!(dir, PathBuf::from("/tmp/tables"));
    }

    #[test]
    fn test_load_default_assumptions() {
        let result = LoadedAssumptions::load_default();
        assert!(result.is_ok(), "Failed to load assumptions: {:?}", result.err());

        let loaded = result.unwrap();

        assert_eq!(loaded.rates.get("contribution_rate"), Some(&0.1952));
        assert_eq!(loaded.rates.get("minimum_pension"), Some(&1588.44));
        assert_eq!(loaded.demographics.get("life_expectancy_years"), Some(&(23.8, 19.5)));
        assert_eq!(loaded.demographics.get("minimum_years"), Some(&(20.0, 25.0)));
    }

    #[test]
    fn test_load_rates_from_reader() {
        let data = "parameter,value\nsalary_growth,0.045\nvaluation_year,2030\n";
        let rates = load_rates_from_reader(data.as_bytes()).unwrap();

        assert_eq!(rates.get("salary_growth"), Some(&0.045));
        let loaded = LoadedAssumptions {
            rates,
            demographics: HashMap::new(),
        };
        assert_eq!(loaded.valuation_year(), Some(2030));
    }

    #[test]
    fn test_malformed_value_is_rejected() {
        let data = "parameter,female,male\nretirement_age,sixty,65\n";
        assert!(load_demographics_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_columns_are_errors() {
        let rates = "parameter\nsalary_growth\n";
        let demographics = "parameter,female\nretirement_age,60\n";

        let err = load_rates_from_reader(rates.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'value'"));

        let err = load_demographics_from_reader(demographics.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'male'"));
    }
}
