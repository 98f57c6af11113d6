//! Run simulations for every input row of a CSV file
//!
//! Outputs one result row per input, in input order

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use pension_simulator::assumptions::loader::assumptions_dir;
use pension_simulator::simulation::load_inputs;
use pension_simulator::{Assumptions, PensionEngine, SimulationInput, SimulationOutcome};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Simulate pensions for a CSV of inputs")]
struct Cli {
    /// CSV with age, sex, gross_salary, work_start_year and optional columns
    input: PathBuf,

    #[arg(long, default_value = "batch_results.csv")]
    output: PathBuf,

    /// Directory holding rates.csv and demographics.csv
    #[arg(long)]
    assumptions: Option<PathBuf>,
}

/// One output row; estimate columns are empty when the input was rejected
#[derive(Debug, Serialize)]
struct BatchRow {
    row: usize,
    age: u32,
    sex: &'static str,
    gross_salary: f64,
    work_start_year: i32,
    retirement_year: Option<i32>,
    years_of_work: Option<i32>,
    accumulated_capital: Option<f64>,
    actual_amount: Option<f64>,
    real_amount: Option<f64>,
    replacement_rate: Option<f64>,
    error: Option<String>,
}

impl BatchRow {
    fn new(row: usize, input: &SimulationInput, outcome: &SimulationOutcome) -> Self {
        let estimate = outcome.estimate();
        Self {
            row,
            age: input.age,
            sex: input.sex.code(),
            gross_salary: input.gross_salary,
            work_start_year: input.work_start_year,
            retirement_year: estimate.map(|e| e.retirement_year),
            years_of_work: estimate.map(|e| e.years_of_work),
            accumulated_capital: estimate.map(|e| e.accumulated_capital),
            actual_amount: estimate.map(|e| e.actual_amount),
            real_amount: estimate.map(|e| e.real_amount),
            replacement_rate: estimate.map(|e| e.replacement_rate),
            error: outcome.error().map(|p| p.error.clone()),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let dir = assumptions_dir(cli.assumptions.as_deref());
    let assumptions = Assumptions::from_csv_path(&dir)
        .map_err(|e| anyhow!("failed to load assumptions from {}: {}", dir.display(), e))?;

    let start = Instant::now();
    println!("Loading inputs from {}...", cli.input.display());
    let inputs = load_inputs(&cli.input)
        .map_err(|e| anyhow!("failed to load inputs from {}: {}", cli.input.display(), e))?;
    println!("Loaded {} inputs in {:?}", inputs.len(), start.elapsed());

    println!("Running simulations...");
    let sim_start = Instant::now();
    let engine = PensionEngine::with_assumptions(assumptions);

    // One engine shared across the pool
    let outcomes: Vec<SimulationOutcome> = inputs
        .par_iter()
        .map(|input| SimulationOutcome::from(engine.compute(input)))
        .collect();

    println!("Simulations complete in {:?}", sim_start.elapsed());

    let file = File::create(&cli.output).with_context(|| format!("failed to create {}", cli.output.display()))?;
    let mut wtr = csv::Writer::from_writer(file);

    let mut failed = 0;
    for (idx, (input, outcome)) in inputs.iter().zip(&outcomes).enumerate() {
        if outcome.error().is_some() {
            failed += 1;
        }
        wtr.serialize(BatchRow::new(idx + 1, input, outcome))?;
    }
    wtr.flush()?;

    let pensions: Vec<f64> = outcomes
        .iter()
        .filter_map(|o| o.estimate().map(|e| e.actual_amount))
        .collect();

    println!("\nSummary:");
    println!("  Inputs:           {}", inputs.len());
    println!("  Rejected:         {}", failed);
    if !pensions.is_empty() {
        let mean = pensions.iter().sum::<f64>() / pensions.len() as f64;
        println!("  Average pension:  {:.2} PLN", mean);
    }
    println!("\nOutput written to {}", cli.output.display());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
