//! Sex-dependent demographic constants
//!
//! Every value here is a placeholder standing in for published ZUS/GUS
//! statistics. Tables are stored as `(female, male)` pairs, matching the
//! column order of `demographics.csv`.

use crate::simulation::Sex;

/// A value that differs between women and men
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BySex<T> {
    pub female: T,
    pub male: T,
}

impl<T: Copy> BySex<T> {
    pub fn new(female: T, male: T) -> Self {
        Self { female, male }
    }

    pub fn get(&self, sex: Sex) -> T {
        match sex {
            Sex::Male => self.male,
            Sex::Female => self.female,
        }
    }
}

/// Demographic table used by eligibility, conversion and benchmarking
#[derive(Debug, Clone, PartialEq)]
pub struct Demographics {
    /// Statutory retirement age in years
    pub retirement_age: BySex<u32>,

    /// Minimum contribution years for eligibility
    pub minimum_years: BySex<i32>,

    /// Average sick-leave days per year
    pub sick_leave_days: BySex<f64>,

    /// Further life expectancy at retirement, in years (annuitization divisor)
    pub life_expectancy_years: BySex<f64>,

    /// Average pension in the valuation year, used for illustrative comparison
    pub benchmark_pension: BySex<f64>,
}

impl Demographics {
    /// Reference table for the Polish system
    pub fn reference() -> Self {
        Self {
            retirement_age: BySex::new(60, 65),
            minimum_years: BySex::new(20, 25),
            sick_leave_days: BySex::new(16.0, 12.0),
            life_expectancy_years: BySex::new(23.8, 19.5),
            benchmark_pension: BySex::new(2100.0, 2500.0),
        }
    }

    /// Override entries present in a loaded `parameter -> (female, male)` map
    pub fn from_loaded(loaded: &super::loader::LoadedAssumptions) -> Self {
        let mut table = Self::reference();

        for (name, &(female, male)) in &loaded.demographics {
            match name.as_str() {
                "retirement_age" => {
                    table.retirement_age = BySex::new(female.round() as u32, male.round() as u32)
                }
                "minimum_years" => {
                    table.minimum_years = BySex::new(female.round() as i32, male.round() as i32)
                }
                "sick_leave_days" => table.sick_leave_days = BySex::new(female, male),
                "life_expectancy_years" => table.life_expectancy_years = BySex::new(female, male),
                "benchmark_pension" => table.benchmark_pension = BySex::new(female, male),
                other => log::warn!("ignoring unknown demographic parameter '{}'", other),
            }
        }

        table
    }
}

impl Default for Demographics {
    fn default() -> Self {
        Self::reference()
    }
}
