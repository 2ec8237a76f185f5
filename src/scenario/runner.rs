//! Batch projection runner and the classic strategy presets

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::params::{PlanParameters, ValidationError};
use crate::projection::{project_plan, Projection, ProjectionSummary, SimulationEngine};
use crate::strategy::PledgeStrategy;

use super::store::Scenario;

/// The classic single-strategy funding comparisons
///
/// Each preset masks a full plan down to one funding strategy so the
/// five trajectories can be charted side by side. Assets stay on the
/// books in every preset; only the cash-generating actions differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyPreset {
    /// Earned income only
    IncomeOnly,
    /// Sell the existing house at its configured month
    SellHouse,
    /// Rent the existing house out
    RentHouse,
    /// Sell securities per the configured schedule
    SellSecurities,
    /// Rent the house and sell securities
    RentAndSellSecurities,
}

impl StrategyPreset {
    pub const ALL: [StrategyPreset; 5] = [
        StrategyPreset::IncomeOnly,
        StrategyPreset::SellHouse,
        StrategyPreset::RentHouse,
        StrategyPreset::SellSecurities,
        StrategyPreset::RentAndSellSecurities,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StrategyPreset::IncomeOnly => "Regular Income",
            StrategyPreset::SellHouse => "Sell Existing House",
            StrategyPreset::RentHouse => "Rent Existing House",
            StrategyPreset::SellSecurities => "Sell Securities",
            StrategyPreset::RentAndSellSecurities => "Rent + Sell Securities",
        }
    }

    /// Mask a full plan down to this preset's strategy
    pub fn apply(&self, base: &PlanParameters) -> PlanParameters {
        let mut params = base.clone();
        // Pledged-asset borrowing is its own plan, not part of the
        // classic comparison set
        params.strategy.pledge = PledgeStrategy::disabled();

        let strategy = &mut params.strategy;
        match self {
            StrategyPreset::IncomeOnly => {
                strategy.house.sell_month = -1;
                strategy.house.rent_enabled = false;
                strategy.securities.liquidate_month = 0;
                strategy.securities.monthly_sale = 0.0;
            }
            StrategyPreset::SellHouse => {
                strategy.house.rent_enabled = false;
                strategy.securities.liquidate_month = 0;
                strategy.securities.monthly_sale = 0.0;
            }
            StrategyPreset::RentHouse => {
                strategy.house.sell_month = -1;
                strategy.house.rent_enabled = true;
                strategy.securities.liquidate_month = 0;
                strategy.securities.monthly_sale = 0.0;
            }
            StrategyPreset::SellSecurities => {
                strategy.house.sell_month = -1;
                strategy.house.rent_enabled = false;
            }
            StrategyPreset::RentAndSellSecurities => {
                strategy.house.rent_enabled = true;
            }
        }
        params
    }
}

/// Summary of one scenario in a side-by-side comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub summary: ProjectionSummary,
}

/// Pre-validated runner for one plan and its preset variations
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: PlanParameters,
}

impl ScenarioRunner {
    /// Create a runner, rejecting invalid base parameters
    pub fn new(base: PlanParameters) -> Result<Self, ValidationError> {
        base.validate()?;
        Ok(Self { base })
    }

    pub fn base(&self) -> &PlanParameters {
        &self.base
    }

    /// Run the plan exactly as configured
    pub fn run(&self) -> Projection {
        SimulationEngine::new(self.base.clone())
            .expect("base plan was validated at construction")
            .project()
    }

    /// Run one strategy preset
    pub fn run_preset(&self, preset: StrategyPreset) -> Projection {
        SimulationEngine::new(preset.apply(&self.base))
            .expect("a preset of a validated plan is still valid")
            .project()
    }

    /// Run all five presets in parallel
    pub fn run_presets(&self) -> Vec<(StrategyPreset, Projection)> {
        log::info!("running {} strategy presets", StrategyPreset::ALL.len());
        StrategyPreset::ALL
            .par_iter()
            .map(|&preset| (preset, self.run_preset(preset)))
            .collect()
    }
}

/// Project saved scenarios in parallel for side-by-side comparison
pub fn compare_scenarios(scenarios: &[Scenario]) -> Result<Vec<ScenarioOutcome>, ValidationError> {
    scenarios
        .par_iter()
        .map(|scenario| {
            let projection = project_plan(&scenario.params)?;
            Ok(ScenarioOutcome {
                name: scenario.name.clone(),
                summary: projection.summary(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{HouseStrategy, SecuritiesStrategy};
    use chrono::Utc;

    fn base_plan() -> PlanParameters {
        let mut params = PlanParameters::example();
        params.strategy.house = HouseStrategy {
            value: 200_000.0,
            appreciation_rate: 0.03,
            sell_month: 24,
            rent_enabled: true,
            monthly_rent: 1_500.0,
            ..HouseStrategy::disabled()
        };
        params.strategy.securities = SecuritiesStrategy {
            value: 100_000.0,
            growth_rate: 0.07,
            liquidate_month: 60,
            monthly_sale: 0.0,
        };
        params
    }

    #[test]
    fn test_all_strategies_disabled_equals_income_only() {
        let mut params = base_plan();
        params.strategy.house.sell_month = -1;
        params.strategy.house.rent_enabled = false;
        params.strategy.securities.liquidate_month = 0;
        params.strategy.securities.monthly_sale = 0.0;

        let runner = ScenarioRunner::new(params).unwrap();
        assert_eq!(runner.run(), runner.run_preset(StrategyPreset::IncomeOnly));
    }

    #[test]
    fn test_zero_rent_preset_equals_income_preset() {
        let mut params = base_plan();
        params.strategy.house.monthly_rent = 0.0;

        let runner = ScenarioRunner::new(params).unwrap();
        let income = runner.run_preset(StrategyPreset::IncomeOnly);
        let rent = runner.run_preset(StrategyPreset::RentHouse);

        for (a, b) in income.snapshots.iter().zip(rent.snapshots.iter()) {
            assert_eq!(a.mortgage_balance, b.mortgage_balance);
            assert_eq!(a.net_worth, b.net_worth);
        }
    }

    #[test]
    fn test_presets_diverge() {
        let runner = ScenarioRunner::new(base_plan()).unwrap();
        let results = runner.run_presets();
        assert_eq!(results.len(), 5);

        let income = results
            .iter()
            .find(|(p, _)| *p == StrategyPreset::IncomeOnly)
            .map(|(_, projection)| projection)
            .unwrap();
        let rent = results
            .iter()
            .find(|(p, _)| *p == StrategyPreset::RentHouse)
            .map(|(_, projection)| projection)
            .unwrap();

        // Rental income compounds into more savings than income alone
        assert!(rent.final_net_worth() > income.final_net_worth());
    }

    #[test]
    fn test_preset_masks_pledge() {
        let mut params = base_plan();
        params.strategy.pledge = PledgeStrategy {
            amount: 50_000.0,
            annual_rate: 0.06,
            draw_month: 1,
        };

        let runner = ScenarioRunner::new(params).unwrap();
        let projection = runner.run_preset(StrategyPreset::IncomeOnly);
        for row in &projection.snapshots {
            assert_eq!(row.pledge_balance, 0.0);
        }
    }

    #[test]
    fn test_compare_scenarios_reports_each() {
        let scenarios = vec![
            Scenario {
                name: "base".to_string(),
                saved_at: Utc::now(),
                params: base_plan(),
            },
            Scenario {
                name: "bigger".to_string(),
                saved_at: Utc::now(),
                params: {
                    let mut p = base_plan();
                    p.mortgage.principal = 400_000.0;
                    p
                },
            },
        ];

        let outcomes = compare_scenarios(&scenarios).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].name, "base");
        assert!(outcomes[1].summary.monthly_payment > outcomes[0].summary.monthly_payment);
    }

    #[test]
    fn test_compare_rejects_invalid_scenario() {
        let mut params = base_plan();
        params.mortgage.term_months = 0;
        let scenarios = vec![Scenario {
            name: "broken".to_string(),
            saved_at: Utc::now(),
            params,
        }];

        assert!(compare_scenarios(&scenarios).is_err());
    }
}
