//! Mortgage Planner CLI
//!
//! Command-line interface for running funding simulations, comparing
//! strategies, and managing saved scenarios

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mortgage_planner::params::{load_plan, PlanParameters};
use mortgage_planner::projection::affordability;
use mortgage_planner::projection::amortization::amortization_schedule;
use mortgage_planner::projection::Projection;
use mortgage_planner::scenario::{compare_scenarios, ScenarioRunner, ScenarioStore};
use mortgage_planner::optimize::{find_optimal_plan, SearchConfig};

#[derive(Parser)]
#[command(name = "mortgage_planner", version, about = "Month-by-month mortgage funding simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the plan as configured and print the projection
    Run {
        /// JSON parameter file; omit to use the built-in example plan
        #[arg(long)]
        params: Option<PathBuf>,

        /// Write the full projection to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Compare the five classic funding strategies side by side
    Compare {
        #[arg(long)]
        params: Option<PathBuf>,

        /// Write the comparison table to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Print the amortization schedule
    Schedule {
        #[arg(long)]
        params: Option<PathBuf>,

        /// Extra monthly payment applied to principal
        #[arg(long, default_value_t = 0.0)]
        extra: f64,
    },

    /// Manage saved scenarios
    Scenario {
        /// Scenario store directory
        #[arg(long, default_value = "scenarios")]
        dir: PathBuf,

        #[command(subcommand)]
        action: ScenarioAction,
    },

    /// Search for the sale schedule maximizing final net worth
    Optimize {
        #[arg(long)]
        params: Option<PathBuf>,

        /// Last month considered for a sale
        #[arg(long, default_value_t = 120)]
        horizon: u32,

        /// Month step between candidates
        #[arg(long, default_value_t = 3)]
        step: u32,
    },
}

#[derive(Subcommand)]
enum ScenarioAction {
    /// Save a parameter file under a name
    Save {
        name: String,
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Print a saved scenario's parameters
    Load { name: String },
    /// List saved scenario names
    List,
    /// Delete a saved scenario
    Delete { name: String },
    /// Compare saved scenarios side by side
    Compare { names: Vec<String> },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { params, csv } => run(params, csv),
        Command::Compare { params, csv } => compare(params, csv),
        Command::Schedule { params, extra } => schedule(params, extra),
        Command::Scenario { dir, action } => scenario(dir, action),
        Command::Optimize { params, horizon, step } => optimize(params, horizon, step),
    }
}

/// Load a parameter file, or fall back to the built-in example plan
fn load_params(path: Option<PathBuf>) -> anyhow::Result<PlanParameters> {
    match path {
        Some(path) => load_plan(&path).map_err(|e| anyhow!("{e}")),
        None => {
            println!("No parameter file given; using the built-in example plan\n");
            Ok(PlanParameters::example())
        }
    }
}

fn run(params: Option<PathBuf>, csv: Option<PathBuf>) -> anyhow::Result<()> {
    let params = load_params(params)?;
    let runner = ScenarioRunner::new(params.clone())?;
    let projection = runner.run();

    print_payment_overview(&params, &projection);
    print_affordability(&params, projection.monthly_payment);
    print_projection_table(&projection);
    print_summary(&projection);

    if let Some(path) = csv {
        write_projection_csv(&path, &projection)?;
        println!("\nFull results written to: {}", path.display());
    }
    Ok(())
}

fn compare(params: Option<PathBuf>, csv: Option<PathBuf>) -> anyhow::Result<()> {
    let params = load_params(params)?;
    let runner = ScenarioRunner::new(params)?;
    let results = runner.run_presets();

    println!("Strategy comparison ({} months):", results[0].1.months());
    println!("{:<24} {:>14} {:>14} {:>14} {:>14}",
        "Strategy", "Final balance", "Final savings", "Final secs", "Final net worth");
    println!("{}", "-".repeat(84));
    for (preset, projection) in &results {
        let summary = projection.summary();
        let last = projection.snapshots.last().unwrap();
        println!("{:<24} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            preset.label(),
            last.mortgage_balance,
            summary.final_savings,
            summary.final_securities,
            summary.final_net_worth,
        );
    }

    if let Some(path) = csv {
        write_comparison_csv(&path, &results)?;
        println!("\nComparison table written to: {}", path.display());
    }
    Ok(())
}

fn schedule(params: Option<PathBuf>, extra: f64) -> anyhow::Result<()> {
    let params = load_params(params)?;
    let rows = amortization_schedule(&params.mortgage, extra);

    println!("{:>5} {:>12} {:>12} {:>12} {:>14} {:>14}",
        "Month", "Payment", "Principal", "Interest", "Balance", "Total interest");
    println!("{}", "-".repeat(74));
    for row in rows.iter().take(24) {
        println!("{:>5} {:>12.2} {:>12.2} {:>12.2} {:>14.2} {:>14.2}",
            row.month, row.payment, row.principal, row.interest,
            row.remaining_balance, row.total_interest);
    }
    if rows.len() > 24 {
        println!("... ({} more months)", rows.len() - 24);
    }

    if let Some(last) = rows.last() {
        println!("\nPaid off after {} months, total interest ${:.2}",
            last.month, last.total_interest);
    }
    Ok(())
}

fn scenario(dir: PathBuf, action: ScenarioAction) -> anyhow::Result<()> {
    let store = ScenarioStore::open(dir)?;
    match action {
        ScenarioAction::Save { name, params } => {
            let params = load_params(params)?;
            let scenario = store.save(&name, &params)?;
            println!("Scenario '{}' saved at {}", scenario.name, scenario.saved_at);
        }
        ScenarioAction::Load { name } => {
            let scenario = store.load(&name)?;
            let json = serde_json::to_string_pretty(&scenario.params)?;
            println!("{json}");
        }
        ScenarioAction::List => {
            let names = store.list()?;
            if names.is_empty() {
                println!("No saved scenarios");
            }
            for name in names {
                println!("{name}");
            }
        }
        ScenarioAction::Delete { name } => {
            store.delete(&name)?;
            println!("Scenario '{name}' deleted");
        }
        ScenarioAction::Compare { names } => {
            let scenarios = names
                .iter()
                .map(|name| store.load(name))
                .collect::<Result<Vec<_>, _>>()?;
            let outcomes = compare_scenarios(&scenarios)?;

            println!("{:<24} {:>12} {:>14} {:>16}",
                "Scenario", "Payment", "Total interest", "Final net worth");
            println!("{}", "-".repeat(68));
            for outcome in outcomes {
                println!("{:<24} {:>12.2} {:>14.2} {:>16.2}",
                    outcome.name,
                    outcome.summary.monthly_payment,
                    outcome.summary.total_interest,
                    outcome.summary.final_net_worth,
                );
            }
        }
    }
    Ok(())
}

fn optimize(params: Option<PathBuf>, horizon: u32, step: u32) -> anyhow::Result<()> {
    let params = load_params(params)?;
    let search = SearchConfig { max_search_months: horizon, step };
    let optimal = find_optimal_plan(&params, &search)?;

    println!("Optimal plan over the first {horizon} months:");
    match optimal.house_sell_month {
        Some(month) => println!("  Sell the existing house in month {month}"),
        None => println!("  Keep the existing house"),
    }
    match optimal.securities_sell_month {
        Some(month) => println!("  Liquidate securities in month {month}"),
        None => println!("  Keep the securities"),
    }
    println!("  Final net worth: ${:.2}", optimal.final_net_worth);
    Ok(())
}

fn print_payment_overview(params: &PlanParameters, projection: &Projection) {
    let schedule = amortization_schedule(&params.mortgage, 0.0);
    let total_interest = schedule.last().map(|r| r.total_interest).unwrap_or(0.0);

    println!("Mortgage Planner v{}", env!("CARGO_PKG_VERSION"));
    println!("====================\n");
    println!("  Principal: ${:.2}", params.mortgage.principal);
    println!("  Monthly payment: ${:.2}", projection.monthly_payment);
    println!("  Term: {} months", params.mortgage.term_months);
    println!("  Total interest: ${:.2}", total_interest);
    println!();
}

fn print_affordability(params: &PlanParameters, payment: f64) {
    let securities_income = params.strategy.securities.monthly_sale;
    let rent = if params.strategy.house.rent_enabled {
        params.strategy.house.monthly_rent
    } else {
        0.0
    };
    let result = affordability::assess(
        params.household.monthly_income,
        params.household.monthly_expenses,
        payment,
        rent,
        securities_income,
    );

    println!("Affordability:");
    println!("  Total monthly income: ${:.2}", result.total_monthly_income);
    println!("  Front-end ratio: {:.2}% ({})",
        result.front_end_ratio,
        if result.front_end_ok { "ok" } else { "too high" });
    println!("  Back-end ratio: {:.2}% ({})",
        result.back_end_ratio,
        if result.back_end_ok { "ok" } else { "too high" });
    println!("  Assessment: {}",
        if result.affordable { "affordable" } else { "not affordable" });
    println!();
}

fn print_projection_table(projection: &Projection) {
    println!("{:>5} {:>12} {:>14} {:>14} {:>14} {:>12} {:>16}",
        "Month", "Payment", "Balance", "Securities", "Savings", "Cash flow", "Net worth");
    println!("{}", "-".repeat(92));
    for row in projection.snapshots.iter().take(25) {
        println!("{:>5} {:>12.2} {:>14.2} {:>14.2} {:>14.2} {:>12.2} {:>16.2}",
            row.month,
            row.payment,
            row.mortgage_balance,
            row.securities_balance,
            row.savings_balance,
            row.cash_flow,
            row.net_worth,
        );
    }
    if projection.snapshots.len() > 25 {
        println!("... ({} more months)", projection.snapshots.len() - 25);
    }
}

fn print_summary(projection: &Projection) {
    let summary = projection.summary();
    println!("\nSummary:");
    println!("  Months simulated: {}", summary.months);
    println!("  Total interest: ${:.2}", summary.total_interest);
    if summary.total_rent > 0.0 {
        println!("  Total rent collected: ${:.2}", summary.total_rent);
    }
    match summary.payoff_month {
        Some(month) => println!("  Mortgage paid off in month {month}"),
        None => println!("  Mortgage not paid off within the term"),
    }
    println!("  Final savings: ${:.2}", summary.final_savings);
    println!("  Final securities: ${:.2}", summary.final_securities);
    println!("  Final net worth: ${:.2}", summary.final_net_worth);
}

fn write_projection_csv(path: &PathBuf, projection: &Projection) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in &projection.snapshots {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_comparison_csv(
    path: &PathBuf,
    results: &[(mortgage_planner::StrategyPreset, Projection)],
) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["Month".to_string()];
    for (preset, _) in results {
        let label = preset.label();
        header.push(format!("{label} Balance"));
        header.push(format!("{label} Net Worth"));
        header.push(format!("{label} Savings"));
        header.push(format!("{label} Securities"));
        header.push(format!("{label} Cash Flow"));
    }
    writer.write_record(&header)?;

    let rows = results[0].1.snapshots.len();
    for index in 0..rows {
        let mut record = vec![index.to_string()];
        for (_, projection) in results {
            let row = &projection.snapshots[index];
            record.push(format!("{:.2}", row.mortgage_balance));
            record.push(format!("{:.2}", row.net_worth));
            record.push(format!("{:.2}", row.savings_balance));
            record.push(format!("{:.2}", row.securities_balance));
            record.push(format!("{:.2}", row.cash_flow));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
