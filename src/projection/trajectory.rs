//! Simplified forward-only capital trajectory for charting
//!
//! This is not the accumulation model: salaries are always compounded from the
//! start of work and capital is a rough share of salary times years worked.
//! Reported capital always comes from the accumulation model.

use super::valuation::round2;
use crate::assumptions::Assumptions;
use crate::simulation::ResolvedInput;
use serde::{Deserialize, Serialize};

/// One point of the trajectory view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub year: i32,
    pub projected_salary: f64,
    pub projected_capital: f64,
}

/// Project salary and capital for every year from start to end of work, inclusive
pub fn project_trajectory(input: &ResolvedInput, assumptions: &Assumptions) -> Vec<TrajectoryPoint> {
    let growth = 1.0 + assumptions.rates.salary_growth;
    let capital_factor = assumptions.rates.contribution_rate * assumptions.rates.trajectory_capital_share;

    (input.work_start_year..=input.work_end_year)
        .map(|year| {
            let years_worked = year - input.work_start_year + 1;
            let projected_salary = input.gross_salary * growth.powi(years_worked);
            let projected_capital = projected_salary * years_worked as f64 * capital_factor;

            TrajectoryPoint {
                year,
                projected_salary: round2(projected_salary),
                projected_capital: round2(projected_capital),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Sex;

    fn resolved() -> ResolvedInput {
        ResolvedInput {
            age: 30,
            sex: Sex::Female,
            gross_salary: 5000.0,
            work_start_year: 2020,
            work_end_year: 2045,
            years_of_work: 25,
            zus_funds: 0.0,
            include_sick_leave: false,
        }
    }

    #[test]
    fn test_trajectory_includes_end_year() {
        let points = project_trajectory(&resolved(), &Assumptions::reference_for_year(2025));

        assert_eq!(points.len(), 26);
        assert_eq!(points.first().unwrap().year, 2020);
        assert_eq!(points.last().unwrap().year, 2045);
    }

    #[test]
    fn test_first_point_values() {
        let points = project_trajectory(&resolved(), &Assumptions::reference_for_year(2025));

        // One year worked: 5000 * 1.03, capital = salary * 1 * 0.1952 * 0.7
        assert_eq!(points[0].projected_salary, 5150.0);
        assert_eq!(points[0].projected_capital, round2(5150.0 * 0.1952 * 0.7));
    }

    #[test]
    fn test_trajectory_capital_monotonic() {
        let points = project_trajectory(&resolved(), &Assumptions::reference_for_year(2025));

        for pair in points.windows(2) {
            assert!(pair[1].projected_capital >= pair[0].projected_capital);
        }
    }

    #[test]
    fn test_trajectory_ignores_valuation_year() {
        let early = project_trajectory(&resolved(), &Assumptions::reference_for_year(2000));
        let late = project_trajectory(&resolved(), &Assumptions::reference_for_year(2040));
        assert_eq!(early, late);
    }
}
