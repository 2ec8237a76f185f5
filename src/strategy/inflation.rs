//! Inflation adjustment for income, expenses, and rental streams

use serde::{Deserialize, Serialize};

/// Annual inflation rate plus the categories it applies to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationConfig {
    /// Annual inflation rate (fraction, e.g. 0.02 for 2%)
    pub annual_rate: f64,

    /// Scale monthly income by the inflation factor
    pub apply_to_income: bool,

    /// Scale monthly expenses by the inflation factor
    pub apply_to_expenses: bool,

    /// Scale rental income by the inflation factor
    pub apply_to_rent: bool,
}

impl InflationConfig {
    /// No inflation at all
    pub fn none() -> Self {
        Self {
            annual_rate: 0.0,
            apply_to_income: false,
            apply_to_expenses: false,
            apply_to_rent: false,
        }
    }

    /// Inflation applied to every category
    pub fn all(annual_rate: f64) -> Self {
        Self {
            annual_rate,
            apply_to_income: true,
            apply_to_expenses: true,
            apply_to_rent: true,
        }
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.0
    }
}

impl Default for InflationConfig {
    fn default() -> Self {
        Self::none()
    }
}

/// Running inflation factor for a projection
///
/// The factor compounds monthly: after `advance` has been called m times
/// it equals `(1 + annual_rate / 12)^m`. Category accessors scale a base
/// amount by the current factor only when that category's flag is set,
/// so disabled categories pass through unchanged.
#[derive(Debug, Clone)]
pub struct InflationAdjuster {
    config: InflationConfig,
    factor: f64,
}

impl InflationAdjuster {
    pub fn new(config: InflationConfig) -> Self {
        Self { config, factor: 1.0 }
    }

    /// Compound the factor by one month
    pub fn advance(&mut self) {
        self.factor *= 1.0 + self.config.monthly_rate();
    }

    /// Current cumulative factor (1.0 at month 0)
    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn income(&self, base: f64) -> f64 {
        if self.config.apply_to_income {
            base * self.factor
        } else {
            base
        }
    }

    pub fn expenses(&self, base: f64) -> f64 {
        if self.config.apply_to_expenses {
            base * self.factor
        } else {
            base
        }
    }

    pub fn rent(&self, base: f64) -> f64 {
        if self.config.apply_to_rent {
            base * self.factor
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_factor_compounds_monthly() {
        let mut adjuster = InflationAdjuster::new(InflationConfig::all(0.03));
        for _ in 0..360 {
            adjuster.advance();
        }
        assert_relative_eq!(
            adjuster.factor(),
            (1.0 + 0.03 / 12.0_f64).powi(360),
            epsilon = 1e-9
        );
        // More than doubled over 30 years at 3%
        assert!(adjuster.factor() > 2.0);
    }

    #[test]
    fn test_disabled_categories_pass_through() {
        let config = InflationConfig {
            annual_rate: 0.05,
            apply_to_income: true,
            apply_to_expenses: false,
            apply_to_rent: false,
        };
        let mut adjuster = InflationAdjuster::new(config);
        for _ in 0..12 {
            adjuster.advance();
        }

        assert!(adjuster.income(5000.0) > 5000.0);
        assert_eq!(adjuster.expenses(3000.0), 3000.0);
        assert_eq!(adjuster.rent(1500.0), 1500.0);
    }

    #[test]
    fn test_zero_rate_is_identity() {
        let mut adjuster = InflationAdjuster::new(InflationConfig::all(0.0));
        for _ in 0..120 {
            adjuster.advance();
        }
        assert_relative_eq!(adjuster.factor(), 1.0, epsilon = 1e-12);
        assert_eq!(adjuster.income(5000.0), 5000.0);
    }
}
