//! Load simulation inputs from CSV for batch runs

use super::{SimulationInput, Sex};
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row; optional columns may be left empty
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    age: u32,
    sex: String,
    gross_salary: f64,
    work_start_year: i32,
    #[serde(default)]
    work_end_year: Option<i32>,
    #[serde(default)]
    zus_funds: Option<f64>,
    #[serde(default)]
    include_sick_leave: Option<String>,
    #[serde(default)]
    postal_code: Option<String>,
}

impl CsvRow {
    fn to_input(self) -> Result<SimulationInput, Box<dyn Error>> {
        let sex: Sex = self.sex.parse()?;

        let include_sick_leave = match self.include_sick_leave.as_deref().map(str::trim) {
            None | Some("") => None,
            Some("true") | Some("1") | Some("yes") => Some(true),
            Some("false") | Some("0") | Some("no") => Some(false),
            Some(other) => return Err(format!("Unknown include_sick_leave flag: {}", other).into()),
        };

        Ok(SimulationInput {
            age: self.age,
            sex,
            gross_salary: self.gross_salary,
            work_start_year: self.work_start_year,
            work_end_year: self.work_end_year,
            zus_funds: self.zus_funds,
            include_sick_leave,
            historical_salaries: None,
            postal_code: self.postal_code.filter(|code| !code.trim().is_empty()),
            expected_pension: None,
        })
    }
}

/// Load all simulation inputs from a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<SimulationInput>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    collect_inputs(reader)
}

/// Load simulation inputs from any reader (e.g., string buffer, stdin)
pub fn load_inputs_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<SimulationInput>, Box<dyn Error>> {
    collect_inputs(Reader::from_reader(reader))
}

fn collect_inputs<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<SimulationInput>, Box<dyn Error>> {
    let mut inputs = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        inputs.push(row.to_input()?);
    }

    Ok(inputs)
}
