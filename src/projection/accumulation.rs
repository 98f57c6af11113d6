//! Capital accumulation on the pension account
//!
//! Years before the valuation year are indexed to current-year terms relative
//! to the valuation year; the valuation year and later are compounded forward
//! from the start of work. Both formulas feed the reported capital.

use crate::assumptions::Assumptions;
use crate::simulation::{ResolvedInput, Sex};
use serde::{Deserialize, Serialize};

/// Which salary formula produced a ledger row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionPhase {
    /// Year before the valuation year, indexed to current-year terms
    Past,
    /// Valuation year or later, projected forward from the start year
    Future,
}

impl ContributionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionPhase::Past => "past",
            ContributionPhase::Future => "future",
        }
    }
}

/// One year of the accumulation ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulationRow {
    pub year: i32,
    pub phase: ContributionPhase,

    /// Monthly salary after indexation and sick-leave drag
    pub salary: f64,

    pub contribution: f64,

    /// Running capital after this year's contribution
    pub capital: f64,
}

/// Terminal capital plus the optional per-year ledger
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationResult {
    pub terminal_capital: f64,
    pub rows: Vec<AccumulationRow>,
}

/// Fraction of salary lost to sick leave for the given sex
pub fn sick_leave_reduction(sex: Sex, assumptions: &Assumptions) -> f64 {
    let days = assumptions.demographics.sick_leave_days.get(sex);
    days / 365.0 * assumptions.rates.sick_leave_pay_ratio
}

/// Run the accumulation model over the half-open work interval
pub fn accumulate_capital(
    input: &ResolvedInput,
    assumptions: &Assumptions,
    detailed_output: bool,
) -> AccumulationResult {
    let growth = 1.0 + assumptions.rates.salary_growth;
    let valuation_year = assumptions.valuation_year;
    let start = input.work_start_year;
    let end = input.work_end_year;

    let sick_leave_factor = if input.include_sick_leave {
        1.0 - sick_leave_reduction(input.sex, assumptions)
    } else {
        1.0
    };

    let mut capital = input.zus_funds;
    let mut rows = Vec::new();

    let past_years = start..end.min(valuation_year);
    let future_years = start.max(valuation_year)..end;

    let salaries = past_years
        .map(|year| {
            let salary = input.gross_salary * growth.powi(valuation_year - year);
            (year, ContributionPhase::Past, salary)
        })
        .chain(future_years.map(|year| {
            let salary = input.gross_salary * growth.powi(year - start + 1);
            (year, ContributionPhase::Future, salary)
        }));

    for (year, phase, salary) in salaries {
        let salary = salary * sick_leave_factor;
        let contribution = salary * assumptions.rates.contribution_rate;
        capital += contribution;

        if detailed_output {
            rows.push(AccumulationRow {
                year,
                phase,
                salary,
                contribution,
                capital,
            });
        }
    }

    AccumulationResult {
        terminal_capital: capital,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn resolved(start: i32, end: i32) -> ResolvedInput {
        ResolvedInput {
            age: 30,
            sex: Sex::Male,
            gross_salary: 5000.0,
            work_start_year: start,
            work_end_year: end,
            years_of_work: end - start,
            zus_funds: 0.0,
            include_sick_leave: false,
        }
    }

    #[test]
    fn test_past_and_future_formulas() {
        let assumptions = Assumptions::reference_for_year(2025);
        let result = accumulate_capital(&resolved(2023, 2027), &assumptions, true);

        let years: Vec<i32> = result.rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2023, 2024, 2025, 2026]);

        // 2023: indexed to 2025 terms, two years of growth
        assert_eq!(result.rows[0].phase, ContributionPhase::Past);
        assert_relative_eq!(result.rows[0].salary, 5000.0 * 1.03_f64.powi(2), epsilon = 1e-9);
        // 2024: one year of growth
        assert_relative_eq!(result.rows[1].salary, 5000.0 * 1.03, epsilon = 1e-9);
        // 2025 belongs to the forward projection: (2025 - 2023 + 1) years of growth
        assert_eq!(result.rows[2].phase, ContributionPhase::Future);
        assert_relative_eq!(result.rows[2].salary, 5000.0 * 1.03_f64.powi(3), epsilon = 1e-9);
        assert_relative_eq!(result.rows[3].salary, 5000.0 * 1.03_f64.powi(4), epsilon = 1e-9);
    }

    #[test]
    fn test_terminal_capital_is_seed_plus_contributions() {
        let assumptions = Assumptions::reference_for_year(2025);
        let mut input = resolved(2000, 2040);
        input.zus_funds = 12_345.0;

        let result = accumulate_capital(&input, &assumptions, true);
        let contributions: f64 = result.rows.iter().map(|r| r.contribution).sum();

        assert_eq!(result.rows.len(), 40);
        assert_relative_eq!(result.terminal_capital, 12_345.0 + contributions, epsilon = 1e-6);
        assert_relative_eq!(result.terminal_capital, result.rows.last().unwrap().capital);
    }

    #[test]
    fn test_capital_never_decreases() {
        let assumptions = Assumptions::reference_for_year(2025);
        let result = accumulate_capital(&resolved(1990, 2060), &assumptions, true);

        for pair in result.rows.windows(2) {
            assert!(pair[1].capital >= pair[0].capital);
        }
    }

    #[test]
    fn test_sick_leave_reduces_every_year() {
        let assumptions = Assumptions::reference_for_year(2025);
        let mut with_leave = resolved(2010, 2050);
        with_leave.include_sick_leave = true;

        let base = accumulate_capital(&resolved(2010, 2050), &assumptions, false);
        let reduced = accumulate_capital(&with_leave, &assumptions, false);

        let factor = 1.0 - 12.0 / 365.0 * 0.8;
        assert_relative_eq!(reduced.terminal_capital, base.terminal_capital * factor, epsilon = 1e-6);
    }

    #[test]
    fn test_summary_mode_skips_rows() {
        let assumptions = Assumptions::reference_for_year(2025);
        let result = accumulate_capital(&resolved(2000, 2040), &assumptions, false);

        assert!(result.rows.is_empty());
        assert!(result.terminal_capital > 0.0);
    }

    #[test]
    fn test_career_entirely_in_past() {
        let assumptions = Assumptions::reference_for_year(2025);
        let result = accumulate_capital(&resolved(1980, 2010), &assumptions, true);

        assert!(result.rows.iter().all(|r| r.phase == ContributionPhase::Past));
        assert_eq!(result.rows.len(), 30);
    }
}
