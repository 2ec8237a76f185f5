//! Plan parameter structures and the validation boundary

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::strategy::{
    HouseStrategy, InflationConfig, ProceedsTarget, SecuritiesStrategy, StrategyConfig,
};

/// Terms of the mortgage on the financed property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageTerms {
    /// Loan principal
    pub principal: f64,

    /// Annual interest rate (fraction, e.g. 0.045 for 4.5%)
    pub annual_rate: f64,

    /// Loan term in months
    pub term_months: u32,

    /// Annual appreciation rate of the financed property
    #[serde(default)]
    pub appreciation_rate: f64,
}

impl MortgageTerms {
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.0
    }

    /// Appreciated value of the financed property at a given month
    pub fn property_value_at(&self, month: u32) -> f64 {
        self.principal * (1.0 + self.appreciation_rate / 12.0).powi(month as i32)
    }
}

/// Household income, expenses, and savings account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    /// Monthly earned income
    pub monthly_income: f64,

    /// Monthly expenses excluding the mortgage payment
    pub monthly_expenses: f64,

    /// Initial savings account balance
    #[serde(default)]
    pub savings_initial: f64,

    /// Annual interest rate on the savings account
    #[serde(default)]
    pub savings_rate: f64,
}

impl Household {
    pub fn monthly_savings_rate(&self) -> f64 {
        self.savings_rate / 12.0
    }
}

/// The full parameter set for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanParameters {
    pub mortgage: MortgageTerms,
    pub household: Household,

    #[serde(default)]
    pub strategy: StrategyConfig,

    #[serde(default)]
    pub inflation: InflationConfig,
}

/// Rejected parameter sets, reported before any simulation runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("principal must be non-negative, got {0}")]
    NegativePrincipal(f64),

    #[error("term must be at least one month")]
    ZeroTerm,

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: f64 },

    #[error("pledged amount {amount} exceeds securities collateral {collateral}")]
    PledgeExceedsCollateral { amount: f64, collateral: f64 },

    #[error("pledge draw month must be at least 1 when an amount is set")]
    PledgeDrawMonthMissing,
}

impl PlanParameters {
    /// Check every invariant the engine relies on
    ///
    /// The engine assumes validated input and never errors mid-run, so
    /// this is the single rejection point for bad numbers.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let finite = [
            ("principal", self.mortgage.principal),
            ("annual_rate", self.mortgage.annual_rate),
            ("appreciation_rate", self.mortgage.appreciation_rate),
            ("monthly_income", self.household.monthly_income),
            ("monthly_expenses", self.household.monthly_expenses),
            ("savings_initial", self.household.savings_initial),
            ("savings_rate", self.household.savings_rate),
            ("house value", self.strategy.house.value),
            ("house appreciation_rate", self.strategy.house.appreciation_rate),
            ("house purchase_price", self.strategy.house.purchase_price),
            ("monthly_rent", self.strategy.house.monthly_rent),
            ("securities value", self.strategy.securities.value),
            ("securities growth_rate", self.strategy.securities.growth_rate),
            ("securities monthly_sale", self.strategy.securities.monthly_sale),
            ("pledge amount", self.strategy.pledge.amount),
            ("pledge annual_rate", self.strategy.pledge.annual_rate),
            ("inflation annual_rate", self.inflation.annual_rate),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field });
            }
        }

        if self.mortgage.principal < 0.0 {
            return Err(ValidationError::NegativePrincipal(self.mortgage.principal));
        }
        if self.mortgage.term_months == 0 {
            return Err(ValidationError::ZeroTerm);
        }

        // Appreciation rates may be negative (declining markets); every
        // other amount and rate must be non-negative.
        let non_negative = [
            ("annual_rate", self.mortgage.annual_rate),
            ("monthly_income", self.household.monthly_income),
            ("monthly_expenses", self.household.monthly_expenses),
            ("savings_initial", self.household.savings_initial),
            ("savings_rate", self.household.savings_rate),
            ("house value", self.strategy.house.value),
            ("house purchase_price", self.strategy.house.purchase_price),
            ("monthly_rent", self.strategy.house.monthly_rent),
            ("securities value", self.strategy.securities.value),
            ("securities monthly_sale", self.strategy.securities.monthly_sale),
            ("pledge amount", self.strategy.pledge.amount),
            ("pledge annual_rate", self.strategy.pledge.annual_rate),
            ("inflation annual_rate", self.inflation.annual_rate),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ValidationError::NegativeValue { field, value });
            }
        }

        if self.strategy.pledge.is_enabled() {
            if self.strategy.pledge.amount > self.strategy.securities.value {
                return Err(ValidationError::PledgeExceedsCollateral {
                    amount: self.strategy.pledge.amount,
                    collateral: self.strategy.securities.value,
                });
            }
            if self.strategy.pledge.draw_month == 0 {
                return Err(ValidationError::PledgeDrawMonthMissing);
            }
        }

        Ok(())
    }

    /// A representative plan: $300k mortgage at 4.5% over 30 years, an
    /// existing house worth $200k rentable for $1500, $150k of
    /// securities, and 2% inflation on every category.
    pub fn example() -> Self {
        Self {
            mortgage: MortgageTerms {
                principal: 300_000.0,
                annual_rate: 0.045,
                term_months: 360,
                appreciation_rate: 0.03,
            },
            household: Household {
                monthly_income: 8_000.0,
                monthly_expenses: 4_000.0,
                savings_initial: 10_000.0,
                savings_rate: 0.015,
            },
            strategy: StrategyConfig {
                house: HouseStrategy {
                    value: 200_000.0,
                    appreciation_rate: 0.03,
                    purchase_price: 150_000.0,
                    sell_month: -1,
                    proceeds: ProceedsTarget::Savings,
                    apply_sale_tax: false,
                    rent_enabled: false,
                    monthly_rent: 1_500.0,
                },
                securities: SecuritiesStrategy {
                    value: 150_000.0,
                    growth_rate: 0.07,
                    liquidate_month: 0,
                    monthly_sale: 0.0,
                },
                pledge: Default::default(),
            },
            inflation: InflationConfig::all(0.02),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::PledgeStrategy;

    #[test]
    fn test_example_plan_is_valid() {
        assert_eq!(PlanParameters::example().validate(), Ok(()));
    }

    #[test]
    fn test_negative_principal_rejected() {
        let mut params = PlanParameters::example();
        params.mortgage.principal = -1.0;
        assert_eq!(
            params.validate(),
            Err(ValidationError::NegativePrincipal(-1.0))
        );
    }

    #[test]
    fn test_zero_term_rejected() {
        let mut params = PlanParameters::example();
        params.mortgage.term_months = 0;
        assert_eq!(params.validate(), Err(ValidationError::ZeroTerm));
    }

    #[test]
    fn test_non_finite_rate_rejected() {
        let mut params = PlanParameters::example();
        params.mortgage.annual_rate = f64::NAN;
        assert_eq!(
            params.validate(),
            Err(ValidationError::NonFinite { field: "annual_rate" })
        );
    }

    #[test]
    fn test_pledge_above_collateral_rejected() {
        let mut params = PlanParameters::example();
        params.strategy.pledge = PledgeStrategy {
            amount: 200_000.0,
            annual_rate: 0.06,
            draw_month: 1,
        };
        assert_eq!(
            params.validate(),
            Err(ValidationError::PledgeExceedsCollateral {
                amount: 200_000.0,
                collateral: 150_000.0,
            })
        );
    }

    #[test]
    fn test_pledge_without_draw_month_rejected() {
        let mut params = PlanParameters::example();
        params.strategy.pledge = PledgeStrategy {
            amount: 50_000.0,
            annual_rate: 0.06,
            draw_month: 0,
        };
        assert_eq!(params.validate(), Err(ValidationError::PledgeDrawMonthMissing));
    }

    #[test]
    fn test_negative_appreciation_allowed() {
        let mut params = PlanParameters::example();
        params.mortgage.appreciation_rate = -0.02;
        params.strategy.house.appreciation_rate = -0.05;
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn test_property_value_appreciates() {
        let terms = MortgageTerms {
            principal: 300_000.0,
            annual_rate: 0.045,
            term_months: 360,
            appreciation_rate: 0.03,
        };
        assert_eq!(terms.property_value_at(0), 300_000.0);
        assert!(terms.property_value_at(360) > 300_000.0);
    }
}
