//! Scenario runner for what-if pension comparisons
//!
//! Pre-loads assumptions once, then reruns the full engine under perturbed
//! constants or inputs. Every variant is computed independently: a variant that
//! fails validation only fails itself.

use crate::assumptions::Assumptions;
use crate::error::EngineError;
use crate::projection::{PensionEngine, PensionEstimate, SimulationOutcome, TrajectoryPoint};
use crate::simulation::SimulationInput;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Growth multiplier for the optimistic default scenario
pub const HIGHER_GROWTH_MULTIPLIER: f64 = 1.5;

/// Growth multiplier for the pessimistic default scenario
pub const LOWER_GROWTH_MULTIPLIER: f64 = 0.7;

/// A single perturbation of the base run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioVariant {
    /// Scale the salary growth constant for this run only
    SalaryGrowth { multiplier: f64 },
    /// Force sick-leave drag on
    WithSickLeave,
    /// Replace the end of work with a fixed year
    WorkEndYear(i32),
}

/// A named variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub variant: ScenarioVariant,
}

impl Scenario {
    pub fn new(name: impl Into<String>, variant: ScenarioVariant) -> Self {
        Self {
            name: name.into(),
            variant,
        }
    }

    /// Standard sensitivity set for an input
    ///
    /// Higher and lower salary growth always; sick leave only when the input
    /// did not already include it.
    pub fn defaults_for(input: &SimulationInput) -> Vec<Scenario> {
        let mut scenarios = vec![
            Scenario::new(
                "higher_salary_growth",
                ScenarioVariant::SalaryGrowth {
                    multiplier: HIGHER_GROWTH_MULTIPLIER,
                },
            ),
            Scenario::new(
                "lower_salary_growth",
                ScenarioVariant::SalaryGrowth {
                    multiplier: LOWER_GROWTH_MULTIPLIER,
                },
            ),
        ];

        if !input.sick_leave_included() {
            scenarios.push(Scenario::new("with_sick_leave", ScenarioVariant::WithSickLeave));
        }

        scenarios
    }
}

/// Summary of a salary history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalAnalysis {
    /// Mean year-over-year growth; absent with fewer than two salaries
    pub average_annual_growth: Option<f64>,

    /// Population standard deviation of the yearly growth rates
    pub salary_volatility: Option<f64>,

    pub projected_future_salary: f64,
}

/// Ratio applied to the latest salary for the illustrative projection
const PROJECTED_SALARY_RATIO: f64 = 1.5;

/// Analyze a salary history, oldest first
pub fn analyze_historical_salaries(salaries: &[f64]) -> Option<HistoricalAnalysis> {
    let latest = *salaries.last()?;

    let growth_rates: Vec<f64> = salaries
        .windows(2)
        .filter(|pair| pair[0] > 0.0)
        .map(|pair| pair[1] / pair[0] - 1.0)
        .collect();

    let (average_annual_growth, salary_volatility) = if growth_rates.is_empty() {
        (None, None)
    } else {
        let n = growth_rates.len() as f64;
        let mean = growth_rates.iter().sum::<f64>() / n;
        let variance = growth_rates.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / n;
        (Some(mean), Some(variance.sqrt()))
    };

    Some(HistoricalAnalysis {
        average_annual_growth,
        salary_volatility,
        projected_future_salary: crate::projection::valuation::round2(latest * PROJECTED_SALARY_RATIO),
    })
}

/// Base estimate with its sensitivity scenarios and trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedAnalysis {
    pub base_results: PensionEstimate,
    pub scenarios: BTreeMap<String, SimulationOutcome>,
    pub historical_analysis: Option<HistoricalAnalysis>,
    pub capital_accumulation_projection: Vec<TrajectoryPoint>,
}

/// Pre-loaded scenario runner for what-if analysis
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::with_assumptions(Assumptions::from_csv()?);
/// let analysis = runner.advanced_analysis(&input)?;
/// for (name, outcome) in &analysis.scenarios {
///     println!("{}: {:?}", name, outcome.estimate().map(|e| e.actual_amount));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Pre-loaded base assumptions
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Run the unperturbed engine
    pub fn run_base(&self, input: &SimulationInput) -> Result<PensionEstimate, EngineError> {
        PensionEngine::with_assumptions(self.base_assumptions.clone()).compute(input)
    }

    /// Run a single variant; the base assumptions are never modified
    pub fn run(&self, input: &SimulationInput, variant: &ScenarioVariant) -> Result<PensionEstimate, EngineError> {
        let (assumptions, input) = match variant {
            ScenarioVariant::SalaryGrowth { multiplier } => (
                self.base_assumptions.clone().with_salary_growth_multiplier(*multiplier),
                input.clone(),
            ),
            ScenarioVariant::WithSickLeave => (self.base_assumptions.clone(), input.clone().with_sick_leave(true)),
            ScenarioVariant::WorkEndYear(year) => {
                (self.base_assumptions.clone(), input.clone().with_work_end_year(*year))
            }
        };

        PensionEngine::with_assumptions(assumptions).compute(&input)
    }

    /// Run multiple scenarios for a single input, keyed by scenario name
    pub fn run_scenarios(&self, input: &SimulationInput, scenarios: &[Scenario]) -> BTreeMap<String, SimulationOutcome> {
        scenarios
            .iter()
            .map(|scenario| {
                let result = self.run(input, &scenario.variant);
                if let Err(err) = &result {
                    log::info!("scenario '{}' failed: {}", scenario.name, err);
                }
                (scenario.name.clone(), SimulationOutcome::from(result))
            })
            .collect()
    }

    /// Base estimate, default scenarios, salary history and trajectory
    ///
    /// Fails only when the base input itself is rejected.
    pub fn advanced_analysis(&self, input: &SimulationInput) -> Result<AdvancedAnalysis, EngineError> {
        let engine = PensionEngine::with_assumptions(self.base_assumptions.clone());
        let base_results = engine.compute(input)?;
        let capital_accumulation_projection = engine.trajectory(input)?;

        let scenarios = self.run_scenarios(input, &Scenario::defaults_for(input));
        let historical_analysis = input
            .historical_salaries
            .as_deref()
            .and_then(analyze_historical_salaries);

        Ok(AdvancedAnalysis {
            base_results,
            scenarios,
            historical_analysis,
            capital_accumulation_projection,
        })
    }

    /// Get reference to base assumptions for inspection
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Sex;

    fn runner() -> ScenarioRunner {
        ScenarioRunner::with_assumptions(Assumptions::reference_for_year(2025))
    }

    fn test_input() -> SimulationInput {
        SimulationInput::new(40, Sex::Female, 8000.0, 2005)
            .with_work_end_year(2045)
            .with_zus_funds(600_000.0)
    }

    #[test]
    fn test_growth_multiplier_is_applied() {
        let runner = runner();
        let input = test_input();

        let base = runner.run_base(&input).unwrap();
        let higher = runner
            .run(&input, &ScenarioVariant::SalaryGrowth { multiplier: 1.5 })
            .unwrap();
        let lower = runner
            .run(&input, &ScenarioVariant::SalaryGrowth { multiplier: 0.7 })
            .unwrap();

        assert!(higher.accumulated_capital > base.accumulated_capital);
        assert!(lower.accumulated_capital < base.accumulated_capital);
        // Base constants are untouched by the variants
        assert_eq!(runner.assumptions().rates.salary_growth, 0.03);
    }

    #[test]
    fn test_default_scenarios_skip_sick_leave_when_included() {
        let without = Scenario::defaults_for(&test_input());
        let with = Scenario::defaults_for(&test_input().with_sick_leave(true));

        assert_eq!(without.len(), 3);
        assert_eq!(with.len(), 2);
        assert!(with.iter().all(|s| s.name != "with_sick_leave"));
    }

    #[test]
    fn test_failing_variant_is_isolated() {
        let runner = runner();
        let scenarios = vec![
            Scenario::new("too_short", ScenarioVariant::WorkEndYear(2010)),
            Scenario::new("higher_salary_growth", ScenarioVariant::SalaryGrowth { multiplier: 1.5 }),
            Scenario::new("with_sick_leave", ScenarioVariant::WithSickLeave),
        ];

        let results = runner.run_scenarios(&test_input(), &scenarios);

        assert_eq!(results.len(), 3);
        let failure = results["too_short"].error().unwrap();
        assert_eq!(failure.minimum_years, Some(20));
        assert!(results["higher_salary_growth"].estimate().is_some());
        assert!(results["with_sick_leave"].estimate().is_some());
    }

    #[test]
    fn test_advanced_analysis() {
        let input = test_input().with_historical_salaries(vec![6000.0, 6600.0, 7260.0]);
        let analysis = runner().advanced_analysis(&input).unwrap();

        assert_eq!(analysis.scenarios.len(), 3);
        assert_eq!(analysis.capital_accumulation_projection.len(), 41);
        assert_eq!(analysis.base_results.years_of_work, 40);

        let history = analysis.historical_analysis.unwrap();
        assert!((history.average_annual_growth.unwrap() - 0.10).abs() < 1e-9);
        assert!(history.salary_volatility.unwrap() < 1e-9);
        assert_eq!(history.projected_future_salary, 10_890.0);
    }

    #[test]
    fn test_advanced_analysis_rejects_ineligible_base() {
        let input = SimulationInput::new(40, Sex::Male, 8000.0, 2020).with_work_end_year(2030);
        assert!(matches!(
            runner().advanced_analysis(&input),
            Err(EngineError::Eligibility { minimum: 25, .. })
        ));
    }

    #[test]
    fn test_historical_analysis_edge_cases() {
        assert_eq!(analyze_historical_salaries(&[]), None);

        let single = analyze_historical_salaries(&[4000.0]).unwrap();
        assert_eq!(single.average_annual_growth, None);
        assert_eq!(single.salary_volatility, None);
        assert_eq!(single.projected_future_salary, 6000.0);
    }
}
