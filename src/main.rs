//! Pension Simulator CLI
//!
//! Command-line interface for single simulations and sensitivity analysis

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use pension_simulator::assumptions::loader::assumptions_dir;
use pension_simulator::projection::{EngineConfig, PensionEngine};
use pension_simulator::{Assumptions, ScenarioRunner, Sex, SimulationInput};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "pension-simulator",
    about = "Estimate a future monthly pension from salary and work history",
    version
)]
struct Cli {
    /// Directory holding rates.csv and demographics.csv
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    /// Pin the valuation year instead of using the current year
    #[arg(long, global = true)]
    valuation_year: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute one pension estimate
    Simulate(SimulateArgs),
    /// Run base, sensitivity scenarios and trajectory; prints JSON
    Analyze(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Age in completed years
    #[arg(long)]
    age: u32,
    /// m or f
    #[arg(long)]
    sex: Sex,
    /// Monthly gross salary in PLN
    #[arg(long)]
    gross_salary: f64,
    #[arg(long)]
    work_start_year: i32,
    /// Defaults to the statutory retirement year
    #[arg(long)]
    work_end_year: Option<i32>,
    /// Balance already recorded on the pension account
    #[arg(long)]
    zus_funds: Option<f64>,
    #[arg(long)]
    include_sick_leave: bool,
    /// Comma-separated past monthly salaries, oldest first
    #[arg(long, value_delimiter = ',')]
    historical_salaries: Vec<f64>,
}

impl InputArgs {
    fn to_input(&self) -> SimulationInput {
        let mut input = SimulationInput::new(self.age, self.sex, self.gross_salary, self.work_start_year)
            .with_sick_leave(self.include_sick_leave);
        input.work_end_year = self.work_end_year;
        input.zus_funds = self.zus_funds;
        if !self.historical_salaries.is_empty() {
            input.historical_salaries = Some(self.historical_salaries.clone());
        }
        input
    }
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Print the estimate as JSON instead of a table
    #[arg(long)]
    json: bool,
    /// Write the year-by-year trajectory to this CSV file
    #[arg(long)]
    trajectory_csv: Option<PathBuf>,
    /// Print the per-year accumulation ledger
    #[arg(long)]
    detailed: bool,
}

fn load_assumptions(cli: &Cli) -> Result<Assumptions> {
    let dir = assumptions_dir(cli.assumptions.as_deref());

    let assumptions = if dir.is_dir() {
        Assumptions::from_csv_path(&dir)
            .map_err(|e| anyhow!("failed to load assumptions from {}: {}", dir.display(), e))?
    } else if cli.assumptions.is_some() {
        return Err(anyhow!("assumptions directory {} does not exist", dir.display()));
    } else {
        log::warn!("{} not found, using reference assumptions", dir.display());
        Assumptions::reference()
    };

    Ok(match cli.valuation_year {
        Some(year) => assumptions.at_year(year),
        None => assumptions,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let assumptions = load_assumptions(&cli)?;

    match &cli.command {
        Command::Simulate(args) => simulate(assumptions, args),
        Command::Analyze(args) => {
            let runner = ScenarioRunner::with_assumptions(assumptions);
            let analysis = runner.advanced_analysis(&args.to_input())?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            Ok(())
        }
    }
}

fn simulate(assumptions: Assumptions, args: &SimulateArgs) -> Result<()> {
    let input = args.input.to_input();
    let engine = PensionEngine::new(
        assumptions,
        EngineConfig {
            detailed_output: args.detailed,
        },
    );

    let run = engine.run(&input)?;
    let estimate = &run.estimate;

    if args.json {
        println!("{}", serde_json::to_string_pretty(estimate)?);
    } else {
        println!("Pension Simulator v{}", env!("CARGO_PKG_VERSION"));
        println!("======================\n");
        println!("Valuation year:      {}", engine.assumptions().valuation_year);
        println!("Years of work:       {}", estimate.years_of_work);
        println!("Retirement year:     {}", estimate.retirement_year);
        println!("Accumulated capital: {:>12.2} PLN", estimate.accumulated_capital);
        println!("Nominal pension:     {:>12.2} PLN", estimate.actual_amount);
        println!("Real pension:        {:>12.2} PLN", estimate.real_amount);
        println!("Replacement rate:    {:>11.2}%", estimate.replacement_rate);
        println!("Average pension:     {:>12.2} PLN", estimate.average_pension_comparison);
        println!();
        println!("{:>8} {:>14} {:>14} {:>10}", "Deferral", "Nominal", "Real", "Increase");
        println!("{}", "-".repeat(50));
        for (key, benefit) in &estimate.deferral_benefits {
            println!(
                "{:>8} {:>14.2} {:>14.2} {:>9.2}%",
                key.trim_end_matches("_years"),
                benefit.actual_amount,
                benefit.real_amount,
                benefit.increase_percentage
            );
        }
    }

    if args.detailed && !args.json {
        println!();
        println!("{:>6} {:>7} {:>14} {:>14} {:>16}", "Year", "Phase", "Salary", "Contribution", "Capital");
        for row in &run.ledger {
            println!(
                "{:>6} {:>7} {:>14.2} {:>14.2} {:>16.2}",
                row.year,
                row.phase.as_str(),
                row.salary, row.contribution, row.capital
            );
        }
        let summary = run.summary();
        println!("\nTotal contributions: {:.2} PLN over {} years", summary.total_contributions, summary.total_years);
    }

    if let Some(path) = &args.trajectory_csv {
        write_trajectory(&engine, &input, path)?;
        println!("\nTrajectory written to: {}", path.display());
    }

    Ok(())
}

fn write_trajectory(engine: &PensionEngine, input: &SimulationInput, path: &Path) -> Result<()> {
    let points = engine.trajectory(input)?;
    let file = File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(file);

    for point in &points {
        wtr.serialize(point)?;
    }
    wtr.flush()?;
    Ok(())
}
