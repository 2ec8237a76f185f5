//! Securities liquidation strategy: recurring partial sales and/or a
//! one-time full liquidation

use serde::{Deserialize, Serialize};

/// Parameters for the securities holding and its sale schedule
///
/// Recurring sales apply every month strictly before the one-time
/// liquidation month; the two are otherwise independent. Month 0 for
/// `liquidate_month` means no one-time sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritiesStrategy {
    /// Current value of the securities holding
    pub value: f64,

    /// Annual growth rate of the holding
    pub growth_rate: f64,

    /// Month of the one-time full liquidation; 0 = never
    #[serde(default)]
    pub liquidate_month: u32,

    /// Recurring monthly sale amount; 0 = none
    #[serde(default)]
    pub monthly_sale: f64,
}

impl SecuritiesStrategy {
    /// No securities holding
    pub fn disabled() -> Self {
        Self {
            value: 0.0,
            growth_rate: 0.0,
            liquidate_month: 0,
            monthly_sale: 0.0,
        }
    }

    pub fn monthly_growth(&self) -> f64 {
        self.growth_rate / 12.0
    }

    /// Amount sold in the given month from a holding worth `held`
    ///
    /// Growth is applied by the caller before the sale. A partial sale
    /// never exceeds the holding; the liquidation month sells everything.
    pub fn sale_for_month(&self, month: u32, held: f64) -> f64 {
        if self.liquidate_month != 0 && month == self.liquidate_month {
            return held;
        }
        let selling_window = self.liquidate_month == 0 || month < self.liquidate_month;
        if selling_window && self.monthly_sale > 0.0 {
            self.monthly_sale.min(held)
        } else {
            0.0
        }
    }
}

impl Default for SecuritiesStrategy {
    fn default() -> Self {
        Self::disabled()
    }
}
