//! Simulation input records as submitted by callers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sex of the insured person; drives every sex-dependent constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "m", alias = "M", alias = "male", alias = "Male")]
    Male,
    #[serde(
        rename = "f",
        alias = "F",
        alias = "k",
        alias = "K",
        alias = "female",
        alias = "Female"
    )]
    Female,
}

impl Sex {
    /// Short code used in payloads and reports
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "m",
            Sex::Female => "f",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Sex::Male),
            "f" | "k" | "female" => Ok(Sex::Female),
            other => Err(format!("Unknown sex: {}", other)),
        }
    }
}

/// A single simulation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Age in completed years at the valuation year
    pub age: u32,

    pub sex: Sex,

    /// Monthly gross salary in current-year PLN
    pub gross_salary: f64,

    /// First calendar year of work
    pub work_start_year: i32,

    /// Last (exclusive) year of work; statutory retirement year when absent
    #[serde(default)]
    pub work_end_year: Option<i32>,

    /// Balance already recorded on the pension account
    #[serde(default)]
    pub zus_funds: Option<f64>,

    #[serde(default)]
    pub include_sick_leave: Option<bool>,

    /// Past monthly salaries, oldest first (sensitivity analysis only)
    #[serde(default)]
    pub historical_salaries: Option<Vec<f64>>,

    /// Free-form postal code, carried through to usage reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// Pension the person hopes for, carried through to usage reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_pension: Option<f64>,
}

impl SimulationInput {
    /// Create an input with only the required fields set
    pub fn new(age: u32, sex: Sex, gross_salary: f64, work_start_year: i32) -> Self {
        Self {
            age,
            sex,
            gross_salary,
            work_start_year,
            work_end_year: None,
            zus_funds: None,
            include_sick_leave: None,
            historical_salaries: None,
            postal_code: None,
            expected_pension: None,
        }
    }

    pub fn with_work_end_year(mut self, year: i32) -> Self {
        self.work_end_year = Some(year);
        self
    }

    pub fn with_zus_funds(mut self, funds: f64) -> Self {
        self.zus_funds = Some(funds);
        self
    }

    pub fn with_sick_leave(mut self, include: bool) -> Self {
        self.include_sick_leave = Some(include);
        self
    }

    pub fn with_historical_salaries(mut self, salaries: Vec<f64>) -> Self {
        self.historical_salaries = Some(salaries);
        self
    }

    /// Whether sick leave drag applies (absent means no)
    pub fn sick_leave_included(&self) -> bool {
        self.include_sick_leave.unwrap_or(false)
    }
}
