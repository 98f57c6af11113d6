//! Plain-text simulation reports and the CSV usage report

use crate::projection::{SimulationOutcome, DEFERRAL_HORIZONS};
use crate::store::SimulationRecord;
use serde::Serialize;
use std::fmt;
use std::io;

/// One row of the admin usage report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRow {
    pub date_of_use: String,
    pub time_of_use: String,
    pub expected_pension: Option<f64>,
    pub age: u32,
    pub sex: &'static str,
    pub salary_amount: f64,
    pub include_sick_leave: bool,
    pub zus_funds: Option<f64>,

    /// Empty for processing or failed simulations
    pub actual_pension: Option<f64>,
    pub real_pension: Option<f64>,
    pub postal_code: Option<String>,
}

impl From<&SimulationRecord> for UsageRow {
    fn from(record: &SimulationRecord) -> Self {
        let input = &record.input;
        let estimate = record.outcome.as_ref().and_then(SimulationOutcome::estimate);

        Self {
            date_of_use: record.created_at.format("%Y-%m-%d").to_string(),
            time_of_use: record.created_at.format("%H:%M:%S").to_string(),
            expected_pension: input.expected_pension,
            age: input.age,
            sex: input.sex.code(),
            salary_amount: input.gross_salary,
            include_sick_leave: input.sick_leave_included(),
            zus_funds: input.zus_funds,
            actual_pension: estimate.map(|e| e.actual_amount),
            real_pension: estimate.map(|e| e.real_amount),
            postal_code: input.postal_code.clone(),
        }
    }
}

/// Write the usage report, one row per record, header first
pub fn write_usage_report<W: io::Write>(records: &[SimulationRecord], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(UsageRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Human-readable summary of one simulation
pub fn summary_report(record: &SimulationRecord) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_summary(&mut out, record)?;
    Ok(out)
}

/// Render the summary report into any formatter sink
pub fn write_summary<W: fmt::Write>(out: &mut W, record: &SimulationRecord) -> fmt::Result {
    let input = &record.input;

    writeln!(out, "Pension Simulation Report #{}", record.id)?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out)?;
    writeln!(out, "Simulation")?;
    writeln!(out, "  Date:                {}", record.created_at.format("%Y-%m-%d"))?;
    writeln!(out, "  Age:                 {}", input.age)?;
    writeln!(out, "  Sex:                 {}", input.sex)?;
    writeln!(out, "  Gross salary:        {:.2} PLN", input.gross_salary)?;
    writeln!(out, "  Work start year:     {}", input.work_start_year)?;
    if let Some(end) = input.work_end_year {
        writeln!(out, "  Planned end year:    {}", end)?;
    }
    if let Some(funds) = input.zus_funds {
        writeln!(out, "  Recorded funds:      {:.2} PLN", funds)?;
    }
    if input.sick_leave_included() {
        writeln!(out, "  Sick leave included: yes")?;
    }
    writeln!(out)?;

    match &record.outcome {
        None => {
            writeln!(out, "Status: {}", record.status.as_str())?;
        }
        Some(SimulationOutcome::Failed(payload)) => {
            writeln!(out, "Simulation failed: {}", payload.error)?;
        }
        Some(SimulationOutcome::Completed(estimate)) => {
            writeln!(out, "Results")?;
            writeln!(out, "  Nominal pension:     {:.2} PLN", estimate.actual_amount)?;
            writeln!(out, "  Real pension:        {:.2} PLN", estimate.real_amount)?;
            writeln!(out, "  Replacement rate:    {:.2}%", estimate.replacement_rate)?;
            writeln!(out, "  Accumulated capital: {:.2} PLN", estimate.accumulated_capital)?;
            writeln!(out, "  Years of work:       {}", estimate.years_of_work)?;
            writeln!(out, "  Retirement year:     {}", estimate.retirement_year)?;
            writeln!(out)?;
            writeln!(
                out,
                "Average pension in {}: {:.2} PLN",
                estimate.retirement_year, estimate.average_pension_comparison
            )?;
            writeln!(out)?;
            writeln!(out, "Deferral")?;
            writeln!(out, "  {:>6} {:>14} {:>14} {:>10}", "Years", "Nominal", "Real", "Increase")?;
            for years in DEFERRAL_HORIZONS {
                if let Some(benefit) = estimate.deferral(years) {
                    writeln!(
                        out,
                        "  {:>6} {:>14.2} {:>14.2} {:>9.2}%",
                        years, benefit.actual_amount, benefit.real_amount, benefit.increase_percentage
                    )?;
                }
            }
        }
    }

    Ok(())
}
