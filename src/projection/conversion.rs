//! Conversion of accumulated capital into a monthly benefit

use crate::assumptions::Assumptions;
use crate::simulation::Sex;

/// Monthly pension for `capital`, floored at the statutory minimum
///
/// monthly = capital / (life_expectancy_years * 12)
pub fn monthly_pension(capital: f64, sex: Sex, assumptions: &Assumptions) -> f64 {
    let months = assumptions.demographics.life_expectancy_years.get(sex) * 12.0;
    let monthly = capital / months;
    monthly.max(assumptions.rates.minimum_pension)
}
