//! Sweep mortgage interest rates and report payment, total interest,
//! and final net worth for each
//!
//! Usage: cargo run --bin rate_sweep [params.json]

use anyhow::anyhow;
use rayon::prelude::*;
use std::env;

use mortgage_planner::params::load_plan;
use mortgage_planner::projection::amortization::amortization_schedule;
use mortgage_planner::{project_plan, PlanParameters};

/// Swept annual rates: 2.00% to 8.00% in 25bp steps
const RATE_STEPS: u32 = 25;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let base = match env::args().nth(1) {
        Some(path) => load_plan(&path).map_err(|e| anyhow!("{e}"))?,
        None => {
            println!("Using the built-in example plan");
            PlanParameters::example()
        }
    };
    base.validate()?;

    let rates: Vec<f64> = (0..RATE_STEPS).map(|i| 0.02 + i as f64 * 0.0025).collect();

    let mut rows: Vec<(f64, f64, f64, f64)> = rates
        .par_iter()
        .map(|&rate| {
            let mut params = base.clone();
            params.mortgage.annual_rate = rate;

            let projection =
                project_plan(&params).expect("rate variant of a validated plan is valid");
            let schedule = amortization_schedule(&params.mortgage, 0.0);
            let total_interest = schedule.last().map(|r| r.total_interest).unwrap_or(0.0);

            (rate, projection.monthly_payment, total_interest, projection.final_net_worth())
        })
        .collect();
    rows.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("rates are finite"));

    println!("\nRate sweep over {} months:", base.mortgage.term_months);
    println!("{:>8} {:>12} {:>16} {:>16}",
        "Rate", "Payment", "Total interest", "Final net worth");
    println!("{}", "-".repeat(56));
    for (rate, payment, total_interest, net_worth) in rows {
        println!("{:>7.2}% {:>12.2} {:>16.2} {:>16.2}",
            rate * 100.0, payment, total_interest, net_worth);
    }

    Ok(())
}
