//! Grid search for the funding plan with the best final net worth

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::params::{PlanParameters, ValidationError};
use crate::projection::project_plan;

/// Bounds for the optimal-plan search
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Last month considered for a sale (capped at the mortgage term)
    pub max_search_months: u32,

    /// Month step between candidates; 1 = exhaustive
    pub step: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_search_months: 120,
            step: 3,
        }
    }
}

/// Winning plan from a grid search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimalPlan {
    /// Month to sell the existing house, if selling wins
    pub house_sell_month: Option<u32>,

    /// Month to liquidate securities, if liquidating wins
    pub securities_sell_month: Option<u32>,

    pub final_net_worth: f64,
}

/// Search house-sale month x securities-liquidation month for the
/// combination maximizing final net worth
///
/// The candidate grid always includes "never sell" on both axes, so the
/// result is at least as good as holding everything. Other strategy
/// settings (rent, routing, pledge) are taken from the base plan as-is.
pub fn find_optimal_plan(
    base: &PlanParameters,
    search: &SearchConfig,
) -> Result<OptimalPlan, ValidationError> {
    base.validate()?;

    let horizon = search.max_search_months.min(base.mortgage.term_months);
    let step = search.step.max(1);

    let house_months = candidate_months(base.strategy.house.value > 0.0, horizon, step);
    let securities_months = candidate_months(base.strategy.securities.value > 0.0, horizon, step);

    log::info!(
        "searching {} house x {} securities sale candidates",
        house_months.len(),
        securities_months.len()
    );

    let best = house_months
        .par_iter()
        .map(|&house_month| {
            let mut best: Option<OptimalPlan> = None;
            for &securities_month in &securities_months {
                let mut params = base.clone();
                params.strategy.house.sell_month =
                    house_month.map(|m| m as i32).unwrap_or(-1);
                params.strategy.securities.liquidate_month = securities_month.unwrap_or(0);

                let projection =
                    project_plan(&params).expect("candidate of a validated plan is valid");
                let candidate = OptimalPlan {
                    house_sell_month: house_month,
                    securities_sell_month: securities_month,
                    final_net_worth: projection.final_net_worth(),
                };
                let improves = best
                    .as_ref()
                    .map(|b| candidate.final_net_worth > b.final_net_worth)
                    .unwrap_or(true);
                if improves {
                    best = Some(candidate);
                }
            }
            best.expect("at least one candidate per row")
        })
        .reduce_with(|a, b| if a.final_net_worth >= b.final_net_worth { a } else { b })
        .expect("at least one candidate");

    Ok(best)
}

/// None (never sell) plus every step-th month up to the horizon
fn candidate_months(has_asset: bool, horizon: u32, step: u32) -> Vec<Option<u32>> {
    let mut months = vec![None];
    if has_asset {
        months.extend((1..=horizon).step_by(step as usize).map(Some));
    }
    months
}
