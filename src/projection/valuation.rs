//! Valuation adjustments: inflation discounting, replacement rate and benchmarks
//!
//! Supports:
//! - Real (inflation-discounted) value of a future nominal benefit
//! - Replacement rate against the current gross salary
//! - Illustrative average-pension benchmark in the retirement year

use crate::assumptions::Assumptions;
use crate::error::EngineError;
use crate::simulation::Sex;

/// Round to 2 decimal places, as every reported amount is
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Inflation discount anchored at the valuation year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationDiscount {
    /// Annual inflation rate
    pub rate: f64,

    /// Year whose prices are "today's" prices
    pub valuation_year: i32,
}

impl InflationDiscount {
    pub fn from_assumptions(assumptions: &Assumptions) -> Self {
        Self {
            rate: assumptions.rates.inflation,
            valuation_year: assumptions.valuation_year,
        }
    }

    /// real = nominal / (1 + inflation)^(year - valuation_year)
    pub fn real_value(&self, nominal: f64, year: i32) -> f64 {
        nominal / (1.0 + self.rate).powi(year - self.valuation_year)
    }
}

/// Pension as a percentage of gross salary
pub fn replacement_rate(pension: f64, gross_salary: f64) -> Result<f64, EngineError> {
    if gross_salary <= 0.0 || !gross_salary.is_finite() {
        return Err(EngineError::Computation(format!(
            "replacement rate undefined for gross salary {}",
            gross_salary
        )));
    }
    Ok(pension / gross_salary * 100.0)
}

/// Average pension in `year`, grown from the valuation-year benchmark
pub fn benchmark_pension(year: i32, sex: Sex, assumptions: &Assumptions) -> f64 {
    let base = assumptions.demographics.benchmark_pension.get(sex);
    base * (1.0 + assumptions.rates.benchmark_growth).powi(year - assumptions.valuation_year)
}

/// Monthly salary not covered by sick-leave benefits, on average
pub fn sick_leave_impact(gross_salary: f64, sex: Sex, assumptions: &Assumptions) -> f64 {
    let days = assumptions.demographics.sick_leave_days.get(sex);
    days / 365.0 * gross_salary * assumptions.rates.sick_leave_uncovered_ratio()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1588.4449), 1588.44);
        assert_eq!(round2(1588.4471), 1588.45);
        assert_eq!(round2(-2.004), -2.0);
    }

    #[test]
    fn test_real_value_discounts_future() {
        let discount = InflationDiscount {
            rate: 0.025,
            valuation_year: 2025,
        };

        let real = discount.real_value(3000.0, 2045);
        assert_relative_eq!(real, 3000.0 / 1.025_f64.powi(20), epsilon = 1e-9);
        assert!(real < 3000.0);
        assert_eq!(discount.real_value(3000.0, 2025), 3000.0);
    }

    #[test]
    fn test_real_value_in_past_is_an_increase() {
        let discount = InflationDiscount {
            rate: 0.025,
            valuation_year: 2025,
        };

        let real = discount.real_value(3000.0, 2020);
        assert!(real > 3000.0);
        assert_relative_eq!(real, 3000.0 * 1.025_f64.powi(5), epsilon = 1e-9);
    }

    #[test]
    fn test_replacement_rate() {
        assert_relative_eq!(replacement_rate(2500.0, 5000.0).unwrap(), 50.0);
        assert!(matches!(
            replacement_rate(2500.0, 0.0),
            Err(EngineError::Computation(_))
        ));
    }

    #[test]
    fn test_benchmark_growth() {
        let assumptions = Assumptions::reference_for_year(2025);

        assert_eq!(benchmark_pension(2025, Sex::Male, &assumptions), 2500.0);
        assert_eq!(benchmark_pension(2025, Sex::Female, &assumptions), 2100.0);
        assert_relative_eq!(
            benchmark_pension(2035, Sex::Male, &assumptions),
            2500.0 * 1.02_f64.powi(10),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_sick_leave_impact() {
        let assumptions = Assumptions::reference_for_year(2025);
        let impact = sick_leave_impact(5000.0, Sex::Female, &assumptions);
        assert_relative_eq!(impact, 16.0 / 365.0 * 5000.0 * 0.2, epsilon = 1e-9);
    }
}
