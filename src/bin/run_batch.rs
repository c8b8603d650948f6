//! Plan every client in a saved client file
//!
//! Outputs one summary line per client as CSV

use anyhow::{Context, Result};
use sg_planner::{
    input::{format_sgd, ReferenceMonth},
    planner::PlanSummary,
    profile::load_clients,
    PlanInputs, Planner,
};
use std::time::Instant;

const DEFAULT_CLIENTS_PATH: &str = "data/clients.json";
const DEFAULT_OUTPUT_PATH: &str = "batch_plan_summary.csv";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let clients_path = args.next().unwrap_or_else(|| DEFAULT_CLIENTS_PATH.to_string());
    let output_path = args.next().unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

    let start = Instant::now();
    println!("Loading clients from {}...", clients_path);

    let clients = load_clients(&clients_path)
        .with_context(|| format!("failed to load clients from {}", clients_path))?;
    println!("Loaded {} clients in {:?}", clients.len(), start.elapsed());

    let planner = Planner::from_csv().unwrap_or_else(|e| {
        log::warn!("using built-in CPF tables: {}", e);
        Planner::new()
    });

    let today = ReferenceMonth::today();
    let inputs: Vec<PlanInputs> = clients
        .iter()
        .map(|record| PlanInputs::from_record(record, today))
        .collect();

    println!("Running plans...");
    let plan_start = Instant::now();

    // Plans run in parallel
    let plans = planner.plan_batch(&inputs);
    println!("Plans complete in {:?}", plan_start.elapsed());

    let summaries: Vec<PlanSummary> = plans.iter().map(|p| p.summary()).collect();

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("failed to create {}", output_path))?;
    for summary in &summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;
    println!("Output written to {}", output_path);

    let on_track = plans
        .iter()
        .filter_map(|p| p.retirement.as_ref())
        .filter(|r| r.gap.on_track())
        .count();
    let total_gap: f64 = summaries.iter().map(|s| s.retirement_gap.max(0.0)).sum();
    let total_education: f64 = summaries.iter().map(|s| s.education_total).sum();

    println!("\nBatch Summary:");
    println!("  Clients planned:        {}", plans.len());
    println!("  Without CPF:            {}", plans.iter().filter(|p| p.cpf.is_none()).count());
    println!("  On track for retirement: {}", on_track);
    println!("  Total retirement gap:   {}", format_sgd(total_gap));
    println!("  Total education cost:   {}", format_sgd(total_education));

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
