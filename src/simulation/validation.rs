//! Boundary validation and eligibility gate
//!
//! Every optional field is defaulted here, once. Downstream code only ever
//! sees a [`ResolvedInput`].

use super::{SimulationInput, Sex};
use crate::assumptions::Assumptions;
use crate::error::EngineError;

/// A validated input with all defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInput {
    pub age: u32,
    pub sex: Sex,
    pub gross_salary: f64,
    pub work_start_year: i32,
    pub work_end_year: i32,
    pub years_of_work: i32,
    pub zus_funds: f64,
    pub include_sick_leave: bool,
}

/// Oldest age accepted
pub const MAX_AGE: u32 = 120;

/// Largest distance, in years, between a work year and the valuation year
pub const MAX_YEAR_DISTANCE: i64 = 150;

/// Year in which a person of `age` reaches the statutory retirement age
///
/// `None` when the year does not fit an `i32`.
pub fn statutory_retirement_year(age: u32, sex: Sex, assumptions: &Assumptions) -> Option<i32> {
    let birth_year = assumptions.valuation_year.checked_sub(i32::try_from(age).ok()?)?;
    let retirement_age = i32::try_from(assumptions.demographics.retirement_age.get(sex)).ok()?;
    birth_year.checked_add(retirement_age)
}

fn check_year(field: &'static str, year: i32, valuation_year: i32) -> Result<(), EngineError> {
    if (i64::from(year) - i64::from(valuation_year)).abs() > MAX_YEAR_DISTANCE {
        return Err(EngineError::InvalidInput {
            field,
            reason: format!(
                "{} is more than {} years away from {}",
                year, MAX_YEAR_DISTANCE, valuation_year
            ),
        });
    }
    Ok(())
}

/// Validate fields and check eligibility before any projection runs
pub fn validate(input: &SimulationInput, assumptions: &Assumptions) -> Result<ResolvedInput, EngineError> {
    if input.age == 0 || input.age > MAX_AGE {
        return Err(EngineError::InvalidInput {
            field: "age",
            reason: format!("must be between 1 and {}, got {}", MAX_AGE, input.age),
        });
    }

    if !input.gross_salary.is_finite() || input.gross_salary <= 0.0 {
        return Err(EngineError::InvalidInput {
            field: "gross_salary",
            reason: format!("must be a positive amount, got {}", input.gross_salary),
        });
    }

    let zus_funds = input.zus_funds.unwrap_or(0.0);
    if !zus_funds.is_finite() || zus_funds < 0.0 {
        return Err(EngineError::InvalidInput {
            field: "zus_funds",
            reason: format!("must be a non-negative amount, got {}", zus_funds),
        });
    }

    let valuation_year = assumptions.valuation_year;
    check_year("work_start_year", input.work_start_year, valuation_year)?;

    let work_end_year = match input.work_end_year {
        Some(year) => year,
        None => statutory_retirement_year(input.age, input.sex, assumptions).ok_or_else(|| {
            EngineError::InvalidInput {
                field: "work_end_year",
                reason: "statutory retirement year is out of range".to_string(),
            }
        })?,
    };
    check_year("work_end_year", work_end_year, valuation_year)?;

    // Both years are within a few hundred years of each other here
    let years_of_work = work_end_year - input.work_start_year;

    let minimum = assumptions.demographics.minimum_years.get(input.sex);
    if years_of_work < minimum {
        log::debug!(
            "rejecting simulation: {} years of work, {} required for {}",
            years_of_work,
            minimum,
            input.sex
        );
        return Err(EngineError::Eligibility {
            minimum,
            years_of_work,
        });
    }

    Ok(ResolvedInput {
        age: input.age,
        sex: input.sex,
        gross_salary: input.gross_salary,
        work_start_year: input.work_start_year,
        work_end_year,
        years_of_work,
        zus_funds,
        include_sick_leave: input.sick_leave_included(),
    })
}
