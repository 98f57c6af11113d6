//! Economic and statutory rates shared by every sex

/// Growth, inflation and contribution rates (all annual, as decimals)
#[derive(Debug, Clone, PartialEq)]
pub struct EconomicRates {
    /// Average nominal salary growth
    pub salary_growth: f64,

    /// Consumer price inflation used to derive real values
    pub inflation: f64,

    /// Combined pension contribution rate on gross salary (19.52%)
    pub contribution_rate: f64,

    /// Statutory minimum monthly pension
    pub minimum_pension: f64,

    /// Annual capital credit for each year retirement is postponed
    pub deferral_bonus: f64,

    /// Growth applied to the benchmark average pension
    pub benchmark_growth: f64,

    /// Share of salary paid during sick leave
    pub sick_leave_pay_ratio: f64,

    /// Share of the trajectory salary base credited in the simplified trajectory view
    pub trajectory_capital_share: f64,
}

impl EconomicRates {
    /// Reference rates (2024 placeholders)
    pub fn reference() -> Self {
        Self {
            salary_growth: 0.03,
            inflation: 0.025,
            contribution_rate: 0.1952,
            minimum_pension: 1588.44,
            deferral_bonus: 0.08,
            benchmark_growth: 0.02,
            sick_leave_pay_ratio: 0.8,
            trajectory_capital_share: 0.7,
        }
    }

    /// Share of salary lost to sick leave that is not covered by benefits
    pub fn sick_leave_uncovered_ratio(&self) -> f64 {
        1.0 - self.sick_leave_pay_ratio
    }

    /// Override entries present in a loaded `parameter -> value` map
    pub fn from_loaded(loaded: &super::loader::LoadedAssumptions) -> Self {
        let mut rates = Self::reference();

        for (name, &value) in &loaded.rates {
            let slot = match name.as_str() {
                "salary_growth" => &mut rates.salary_growth,
                "inflation" => &mut rates.inflation,
                "contribution_rate" => &mut rates.contribution_rate,
                "minimum_pension" => &mut rates.minimum_pension,
                "deferral_bonus" => &mut rates.deferral_bonus,
                "benchmark_growth" => &mut rates.benchmark_growth,
                "sick_leave_pay_ratio" => &mut rates.sick_leave_pay_ratio,
                "trajectory_capital_share" => &mut rates.trajectory_capital_share,
                // Read by Assumptions, not a rate
                "valuation_year" => continue,
                other => {
                    log::warn!("ignoring unknown rate parameter '{}'", other);
                    continue;
                }
            };
            *slot = value;
        }

        rates
    }
}

impl Default for EconomicRates {
    fn default() -> Self {
        Self::reference()
    }
}
