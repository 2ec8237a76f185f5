//! Run the five classic funding strategies for one plan and write each
//! trajectory to its own CSV file
//!
//! Usage: cargo run --bin compare_strategies [params.json]

use anyhow::anyhow;
use std::env;
use std::fs;
use std::path::Path;

use mortgage_planner::params::load_plan;
use mortgage_planner::{PlanParameters, Projection, ScenarioRunner};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let params = match env::args().nth(1) {
        Some(path) => load_plan(&path).map_err(|e| anyhow!("{e}"))?,
        None => {
            println!("Using the built-in example plan");
            PlanParameters::example()
        }
    };

    let runner = ScenarioRunner::new(params)?;
    let results = runner.run_presets();

    let out_dir = Path::new("strategy_outputs");
    fs::create_dir_all(out_dir)?;

    for (preset, projection) in &results {
        println!("\n{}", "=".repeat(60));
        println!("{}", preset.label());
        println!("{}", "=".repeat(60));
        print_milestones(projection);

        let path = out_dir.join(format!("{}.csv", slug(preset.label())));
        write_csv(&path, projection)?;
        println!("  Trajectory written to: {}", path.display());
    }

    println!("\n{:<24} {:>16} {:>14}", "Strategy", "Final net worth", "Payoff month");
    println!("{}", "-".repeat(56));
    let mut ranked: Vec<_> = results.iter().collect();
    ranked.sort_by(|a, b| {
        b.1.final_net_worth()
            .partial_cmp(&a.1.final_net_worth())
            .expect("net worth is finite")
    });
    for (preset, projection) in ranked {
        let payoff = projection
            .payoff_month()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<24} {:>16.2} {:>14}", preset.label(), projection.final_net_worth(), payoff);
    }

    Ok(())
}

fn print_milestones(projection: &Projection) {
    println!("  {:>5} {:>14} {:>14} {:>14} {:>16}",
        "Month", "Balance", "Savings", "Securities", "Net worth");
    let milestones = [0, 12, 60, 120, 240, 360];
    for &month in &milestones {
        if let Some(row) = projection.snapshots.get(month) {
            println!("  {:>5} {:>14.2} {:>14.2} {:>14.2} {:>16.2}",
                row.month, row.mortgage_balance, row.savings_balance,
                row.securities_balance, row.net_worth);
        }
    }
}

fn write_csv(path: &Path, projection: &Projection) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in &projection.snapshots {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn slug(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}
