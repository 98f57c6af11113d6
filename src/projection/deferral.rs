//! Benefits of postponing retirement past the planned year

use super::conversion::monthly_pension;
use super::valuation::{round2, InflationDiscount};
use crate::assumptions::Assumptions;
use crate::simulation::Sex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Postponement horizons, in years, always reported together
pub const DEFERRAL_HORIZONS: [u32; 3] = [1, 2, 5];

/// Pension obtained by retiring `years` later
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferralBenefit {
    pub actual_amount: f64,
    pub real_amount: f64,

    /// Increase over the non-deferred pension, in percent
    pub increase_percentage: f64,
}

/// Map key for a horizon, e.g. `"5_years"`
pub fn deferral_key(years: u32) -> String {
    format!("{}_years", years)
}

/// Deferral benefits for every horizon in [`DEFERRAL_HORIZONS`]
///
/// Capital compounds at the deferral bonus for each postponed year. The base
/// pension is reconverted from the same capital rather than passed in.
pub fn deferral_benefits(
    capital: f64,
    retirement_year: i32,
    sex: Sex,
    assumptions: &Assumptions,
) -> BTreeMap<String, DeferralBenefit> {
    let discount = InflationDiscount::from_assumptions(assumptions);
    let base_monthly = monthly_pension(capital, sex, assumptions);

    DEFERRAL_HORIZONS
        .iter()
        .map(|&years| {
            let deferred_capital = capital * (1.0 + assumptions.rates.deferral_bonus).powi(years as i32);
            let deferred_monthly = monthly_pension(deferred_capital, sex, assumptions);
            let actual_amount = round2(deferred_monthly);
            let real_amount = round2(discount.real_value(actual_amount, retirement_year + years as i32));
            let increase_percentage = round2((deferred_monthly / base_monthly - 1.0) * 100.0);

            (
                deferral_key(years),
                DeferralBenefit {
                    actual_amount,
                    real_amount,
                    increase_percentage,
                },
            )
        })
        .collect()
}
