//! Core pension engine: validation through deferral scenarios

use super::accumulation::accumulate_capital;
use super::conversion::monthly_pension;
use super::deferral::deferral_benefits;
use super::estimate::{CalculationDetails, PensionEstimate, SimulationRun};
use super::trajectory::{project_trajectory, TrajectoryPoint};
use super::valuation::{benchmark_pension, replacement_rate, round2, sick_leave_impact, InflationDiscount};
use crate::assumptions::Assumptions;
use crate::error::EngineError;
use crate::simulation::{validate, ResolvedInput, SimulationInput};

/// Configuration for an engine run
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Whether to keep the per-year accumulation ledger
    pub detailed_output: bool,
}

/// Main pension engine
///
/// Pure: holds only its constant table and config, so one engine can serve
/// any number of independent inputs.
#[derive(Debug, Clone)]
pub struct PensionEngine {
    assumptions: Assumptions,
    config: EngineConfig,
}

impl PensionEngine {
    /// Create a new engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: EngineConfig) -> Self {
        Self { assumptions, config }
    }

    /// Create an engine with default config
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self::new(assumptions, EngineConfig::default())
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Compute the pension estimate for one input
    pub fn compute(&self, input: &SimulationInput) -> Result<PensionEstimate, EngineError> {
        self.run(input).map(|run| run.estimate)
    }

    /// Compute the estimate and, in detailed mode, the accumulation ledger
    pub fn run(&self, input: &SimulationInput) -> Result<SimulationRun, EngineError> {
        // Eligibility gate: nothing is projected for a rejected input
        let resolved = validate(input, &self.assumptions)?;

        let accumulation = accumulate_capital(&resolved, &self.assumptions, self.config.detailed_output);
        let estimate = self.estimate_from_capital(&resolved, accumulation.terminal_capital)?;

        log::debug!(
            "simulated {} years for {}: capital {:.2}, pension {:.2}",
            resolved.years_of_work,
            resolved.sex,
            estimate.accumulated_capital,
            estimate.actual_amount
        );

        Ok(SimulationRun {
            estimate,
            ledger: accumulation.rows,
        })
    }

    /// Forward-only trajectory view for a valid input
    pub fn trajectory(&self, input: &SimulationInput) -> Result<Vec<TrajectoryPoint>, EngineError> {
        let resolved = validate(input, &self.assumptions)?;
        Ok(project_trajectory(&resolved, &self.assumptions))
    }

    /// Convert, value and defer an accumulated capital
    fn estimate_from_capital(&self, input: &ResolvedInput, capital: f64) -> Result<PensionEstimate, EngineError> {
        let assumptions = &self.assumptions;
        let retirement_year = input.work_end_year;

        ensure_finite("accumulated capital", capital)?;

        let actual_amount = round2(monthly_pension(capital, input.sex, assumptions));
        let discount = InflationDiscount::from_assumptions(assumptions);
        let real_amount = round2(discount.real_value(actual_amount, retirement_year));
        let replacement = round2(replacement_rate(actual_amount, input.gross_salary)?);
        let average_pension = round2(benchmark_pension(retirement_year, input.sex, assumptions));

        ensure_finite("pension amount", actual_amount)?;
        ensure_finite("real pension amount", real_amount)?;
        ensure_finite("replacement rate", replacement)?;

        let sick_leave = if input.include_sick_leave {
            round2(sick_leave_impact(input.gross_salary, input.sex, assumptions))
        } else {
            0.0
        };

        Ok(PensionEstimate {
            actual_amount,
            real_amount,
            replacement_rate: replacement,
            accumulated_capital: round2(capital),
            years_of_work: input.years_of_work,
            retirement_year,
            average_pension_comparison: average_pension,
            deferral_benefits: deferral_benefits(capital, retirement_year, input.sex, assumptions),
            calculation_details: CalculationDetails {
                base_salary: input.gross_salary,
                indexation_years: retirement_year - assumptions.valuation_year,
                sick_leave_impact: sick_leave,
            },
        })
    }
}

fn ensure_finite(name: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::Computation(format!("{} is not a finite number", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Sex;

    fn engine() -> PensionEngine {
        PensionEngine::with_assumptions(Assumptions::reference_for_year(2025))
    }

    fn example_input() -> SimulationInput {
        SimulationInput::new(30, Sex::Male, 5000.0, 2020)
            .with_work_end_year(2065)
            .with_zus_funds(0.0)
            .with_sick_leave(false)
    }

    #[test]
    fn test_example_end_to_end() {
        let estimate = engine().compute(&example_input()).unwrap();

        assert_eq!(estimate.years_of_work, 45);
        assert_eq!(estimate.retirement_year, 2065);
        assert!(estimate.accumulated_capital > 0.0);
        assert!(estimate.actual_amount >= 1588.44);
        assert_eq!(
            estimate.replacement_rate,
            round2(estimate.actual_amount / 5000.0 * 100.0)
        );

        let keys: Vec<&str> = estimate.deferral_benefits.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["1_years", "2_years", "5_years"]);
        assert!(estimate.deferral_benefits.values().all(|d| d.increase_percentage >= 0.0));
        assert_eq!(estimate.calculation_details.indexation_years, 40);
        assert_eq!(estimate.calculation_details.sick_leave_impact, 0.0);
    }

    #[test]
    fn test_eligibility_rejects_before_projection() {
        let input = SimulationInput::new(30, Sex::Male, 5000.0, 2020).with_work_end_year(2040);
        let engine = PensionEngine::new(
            Assumptions::reference_for_year(2025),
            EngineConfig { detailed_output: true },
        );

        let err = engine.run(&input).unwrap_err();
        assert_eq!(
            err,
            EngineError::Eligibility {
                minimum: 25,
                years_of_work: 20
            }
        );
    }

    #[test]
    fn test_small_capital_hits_floor_exactly() {
        let estimate = engine().compute(&example_input()).unwrap();

        // 5000 PLN/month over 45 years accumulates well under 234 * 1588.44
        assert_eq!(estimate.actual_amount, 1588.44);
        assert!(estimate.is_floored(1588.44));
    }

    #[test]
    fn test_real_value_law() {
        let input = example_input().with_zus_funds(900_000.0);
        let estimate = engine().compute(&input).unwrap();

        let expected = round2(estimate.actual_amount / 1.025_f64.powi(2065 - 2025));
        assert_eq!(estimate.real_amount, expected);
    }

    #[test]
    fn test_deferral_monotonic_with_large_capital() {
        let input = example_input().with_zus_funds(1_500_000.0);
        let estimate = engine().compute(&input).unwrap();

        let one = estimate.deferral(1).unwrap().actual_amount;
        let two = estimate.deferral(2).unwrap().actual_amount;
        let five = estimate.deferral(5).unwrap().actual_amount;

        assert!(five > two);
        assert!(two > one);
        assert!(one >= estimate.actual_amount);
    }

    #[test]
    fn test_base_conversion_matches_deferral_base() {
        let input = example_input().with_zus_funds(1_500_000.0);
        let estimate = engine().compute(&input).unwrap();

        // 8% compounding on capital above the floor gives exactly 8% more pension
        let one = estimate.deferral(1).unwrap();
        assert_eq!(one.increase_percentage, 8.0);
        assert!((one.actual_amount / estimate.actual_amount - 1.08).abs() < 1e-4);
    }

    #[test]
    fn test_sick_leave_details() {
        let input = example_input().with_sick_leave(true).with_zus_funds(1_000_000.0);
        let with_leave = engine().compute(&input).unwrap();
        let without = engine().compute(&example_input().with_zus_funds(1_000_000.0)).unwrap();

        assert!(with_leave.accumulated_capital < without.accumulated_capital);
        assert_eq!(
            with_leave.calculation_details.sick_leave_impact,
            round2(12.0 / 365.0 * 5000.0 * 0.2)
        );
    }

    #[test]
    fn test_detailed_run_keeps_ledger() {
        let engine = PensionEngine::new(
            Assumptions::reference_for_year(2025),
            EngineConfig { detailed_output: true },
        );
        let run = engine.run(&example_input()).unwrap();
        let summary = run.summary();

        assert_eq!(summary.total_years, 45);
        assert_eq!(summary.past_years, 5);
        assert_eq!(summary.future_years, 40);
        assert_eq!(round2(summary.final_capital), run.estimate.accumulated_capital);
    }

    #[test]
    fn test_replacement_rate_above_floor() {
        let input = example_input().with_zus_funds(900_000.0);
        let estimate = engine().compute(&input).unwrap();

        assert!(estimate.actual_amount > 1588.44);
        assert_eq!(
            estimate.replacement_rate,
            round2(estimate.actual_amount / 5000.0 * 100.0)
        );
    }

    #[test]
    fn test_distant_start_year_rejected_before_accumulation() {
        let engine = PensionEngine::new(
            Assumptions::reference_for_year(2025),
            EngineConfig { detailed_output: true },
        );
        let input = SimulationInput::new(30, Sex::Male, 5000.0, -50_000_000).with_work_end_year(2065);

        assert!(matches!(
            engine.run(&input),
            Err(EngineError::InvalidInput { field: "work_start_year", .. })
        ));
        assert!(matches!(
            engine.trajectory(&input),
            Err(EngineError::InvalidInput { field: "work_start_year", .. })
        ));
    }

    #[test]
    fn test_compute_is_repeatable() {
        let engine = engine();
        let first = engine.compute(&example_input()).unwrap();
        let second = engine.compute(&example_input()).unwrap();
        assert_eq!(first, second);
    }
}
