//! Funding strategy parameters and inflation adjustment

mod house;
mod pledge;
mod securities;
pub mod inflation;

pub use house::{capital_gains_tax, HouseStrategy, ProceedsTarget, SALE_TAX_EXEMPTION, SALE_TAX_RATE};
pub use inflation::{InflationAdjuster, InflationConfig};
pub use pledge::PledgeStrategy;
pub use securities::SecuritiesStrategy;

use serde::{Deserialize, Serialize};

/// Container for all funding strategy parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub house: HouseStrategy,

    #[serde(default)]
    pub securities: SecuritiesStrategy,

    #[serde(default)]
    pub pledge: PledgeStrategy,
}

impl StrategyConfig {
    /// Every strategy disabled: pure earned-income funding
    pub fn none() -> Self {
        Self {
            house: HouseStrategy::disabled(),
            securities: SecuritiesStrategy::disabled(),
            pledge: PledgeStrategy::disabled(),
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::none()
    }
}
