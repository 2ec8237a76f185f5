//! Pledged-asset borrowing: securities as loan collateral

use serde::{Deserialize, Serialize};

/// Parameters for a pledged-asset loan
///
/// The securities holding backs the loan but is never liquidated. The
/// borrowed amount arrives as a lump sum at the draw month and carries a
/// monthly interest cost thereafter; the outstanding amount counts as a
/// liability in net worth. The planner models carrying cost only, not a
/// repayment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PledgeStrategy {
    /// Amount borrowed against the securities; 0 = disabled
    pub amount: f64,

    /// Annual interest rate on the pledged-asset loan
    pub annual_rate: f64,

    /// Month the loan is drawn
    #[serde(default)]
    pub draw_month: u32,
}

impl PledgeStrategy {
    /// No pledged-asset borrowing
    pub fn disabled() -> Self {
        Self {
            amount: 0.0,
            annual_rate: 0.0,
            draw_month: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.amount > 0.0
    }

    /// Whether the lump-sum draw lands in this month
    pub fn draws_at(&self, month: u32) -> bool {
        self.is_enabled() && month == self.draw_month
    }

    /// Monthly interest cost on the outstanding balance
    pub fn monthly_interest(&self, outstanding: f64) -> f64 {
        outstanding * self.annual_rate / 12.0
    }
}

impl Default for PledgeStrategy {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_disabled_never_draws() {
        let pledge = PledgeStrategy::disabled();
        assert!(!pledge.is_enabled());
        for month in 0..360 {
            assert!(!pledge.draws_at(month));
        }
        assert_eq!(pledge.monthly_interest(0.0), 0.0);
    }

    #[test]
    fn test_draws_once_at_draw_month() {
        let pledge = PledgeStrategy {
            amount: 50_000.0,
            annual_rate: 0.06,
            draw_month: 6,
        };
        assert!(!pledge.draws_at(5));
        assert!(pledge.draws_at(6));
        assert!(!pledge.draws_at(7));
    }

    #[test]
    fn test_monthly_interest_on_outstanding() {
        let pledge = PledgeStrategy {
            amount: 50_000.0,
            annual_rate: 0.06,
            draw_month: 1,
        };
        assert_relative_eq!(pledge.monthly_interest(50_000.0), 250.0, epsilon = 1e-9);
        assert_eq!(pledge.monthly_interest(0.0), 0.0);
    }
}
