//! SG Planner CLI
//!
//! Command-line interface for running planning projections on saved clients

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sg_planner::{
    compute_contribution, input::{format_sgd, parse_date, parse_money, ReferenceMonth}, profile::load_clients,
    project_ilp, Assumptions, ClientRecord, FinancialPlan, IlpConfig, PlanInputs, Planner,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sg-planner", version, about = "Singapore financial planning projections")]
struct Cli {
    /// Directory holding the CPF rate tables (built-in rates when omitted)
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short = 'o', long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly CPF contribution for a gross salary and age
    Cpf {
        /// Monthly gross as typed, e.g. "$6,000"
        #[arg(long, value_parser = parse_gross)]
        gross: f64,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        self_employed: bool,
    },
    /// Month-by-month savings projection as CSV
    Cashflow(ClientArgs),
    /// Month-by-month CPF account balances as CSV
    CpfBalance(ClientArgs),
    /// Yearly retirement accumulation as CSV
    Retirement(ClientArgs),
    /// Education cost estimate as JSON
    Education(ClientArgs),
    /// Year-by-year ILP projection as CSV
    Ilp {
        #[arg(long)]
        premium: f64,
        #[arg(long, default_value_t = 40)]
        years: u32,
        /// Annual unit price growth in percent
        #[arg(long, default_value_t = 5.0)]
        growth_pct: f64,
    },
    /// Full plan for every client in a file as JSON
    Plan(ClientArgs),
}

#[derive(Args, Debug)]
struct ClientArgs {
    /// Client records JSON (a list or a single record)
    #[arg(short = 'c', long)]
    clients: PathBuf,

    /// Position of the client in the file
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Reference month as YYYY-MM (current month when omitted)
    #[arg(long)]
    as_of: Option<String>,
}

fn parse_gross(text: &str) -> std::result::Result<f64, String> {
    let gross = parse_money(text);
    if gross < 0.0 {
        return Err(format!("gross salary cannot be negative: '{text}'"));
    }
    Ok(gross)
}

impl ClientArgs {
    fn today(&self) -> Result<ReferenceMonth> {
        match &self.as_of {
            Some(text) => parse_date(&format!("{text}-01"))
                .map(ReferenceMonth::from_date)
                .with_context(|| format!("invalid --as-of month '{text}', expected YYYY-MM")),
            None => Ok(ReferenceMonth::today()),
        }
    }

    fn load(&self) -> Result<Vec<ClientRecord>> {
        load_clients(&self.clients)
            .with_context(|| format!("failed to load clients from {}", self.clients.display()))
    }

    fn plan_one(&self, planner: &Planner) -> Result<FinancialPlan> {
        let clients = self.load()?;
        let Some(record) = clients.get(self.index) else {
            bail!("no client at index {} ({} in file)", self.index, clients.len());
        };
        Ok(planner.plan_record(record, self.today()?))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let assumptions = match &cli.assumptions {
        Some(dir) => Assumptions::from_csv_path(dir)
            .with_context(|| format!("failed to load assumptions from {}", dir.display()))?,
        None => Assumptions::default_planning(),
    };
    let planner = Planner::with_assumptions(assumptions);

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    match &cli.command {
        Command::Cpf { gross, age, self_employed } => {
            let mut cpf = compute_contribution(&planner.assumptions().cpf, *gross, *age);
            if *self_employed {
                cpf = cpf.without_employer();
            }
            writeln!(writer, "Gross:     {}", format_sgd(*gross))?;
            writeln!(writer, "Employee:  {}", format_sgd(cpf.employee))?;
            writeln!(writer, "Employer:  {}", format_sgd(cpf.employer))?;
            writeln!(writer, "Total:     {}", format_sgd(cpf.total))?;
            writeln!(writer, "  OA:      {}", format_sgd(cpf.oa))?;
            writeln!(writer, "  SA:      {}", format_sgd(cpf.sa))?;
            writeln!(writer, "  MA:      {}", format_sgd(cpf.ma))?;
            writeln!(writer, "Take-home: {}", format_sgd(cpf.take_home))?;
        }
        Command::Cashflow(args) => {
            let plan = args.plan_one(&planner)?;
            let Some(cashflow) = plan.cashflow else {
                bail!("{}: no take-home pay or CPF contribution to project from", plan.name);
            };
            write_csv(&mut writer, &cashflow.rows)?;

            let summary = cashflow.summary();
            eprintln!(
                "{} months, final balance {}, interest {}",
                summary.total_months,
                format_sgd(summary.final_balance),
                format_sgd(summary.total_interest)
            );
        }
        Command::CpfBalance(args) => {
            let plan = args.plan_one(&planner)?;
            let Some(balances) = plan.cpf_balances else {
                bail!("{}: no CPF contribution (missing income or birth date)", plan.name);
            };
            write_csv(&mut writer, &balances.rows)?;
            eprintln!("Final CPF total: {}", format_sgd(balances.final_balances().total()));
        }
        Command::Retirement(args) => {
            let plan = args.plan_one(&planner)?;
            let Some(retirement) = plan.retirement else {
                bail!("{}: no take-home pay to invest from", plan.name);
            };
            write_csv(&mut writer, retirement.projection.as_deref().unwrap_or_default())?;
            eprintln!(
                "Nest egg {}, projected {}, gap {}",
                format_sgd(retirement.gap_needs.nest_egg),
                format_sgd(retirement.projected_balance()),
                format_sgd(retirement.gap.gap)
            );
        }
        Command::Education(args) => {
            let plan = args.plan_one(&planner)?;
            serde_json::to_writer_pretty(&mut writer, &plan.education)?;
            writeln!(writer)?;
        }
        Command::Ilp { premium, years, growth_pct } => {
            let config = IlpConfig {
                annual_premium: *premium,
                projection_years: *years,
                growth_rate: growth_pct / 100.0,
            };
            let Some(projection) = project_ilp(&planner.assumptions().ilp, &config) else {
                bail!("annual premium must be positive, got {premium}");
            };
            write_csv(&mut writer, &projection.rows)?;
        }
        Command::Plan(args) => {
            let today = args.today()?;
            let inputs: Vec<PlanInputs> = args
                .load()?
                .iter()
                .map(|record| PlanInputs::from_record(record, today))
                .collect();
            let plans = planner.plan_batch(&inputs);
            serde_json::to_writer_pretty(&mut writer, &plans)?;
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}
