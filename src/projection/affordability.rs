//! Income-ratio affordability metrics

use serde::{Deserialize, Serialize};

/// Front-end ratio threshold: mortgage payment to total income
pub const FRONT_END_LIMIT: f64 = 28.0;

/// Back-end ratio threshold: all debt payments to total income
pub const BACK_END_LIMIT: f64 = 36.0;

/// Affordability assessment for a monthly payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Affordability {
    pub total_monthly_income: f64,
    /// Payment as a percentage of total income
    pub front_end_ratio: f64,
    /// Payment plus expenses as a percentage of total income
    pub back_end_ratio: f64,
    pub front_end_ok: bool,
    pub back_end_ok: bool,
    pub affordable: bool,
}

/// Assess affordability from income ratios
///
/// Total income counts earned income, rental income, and recurring
/// securities sale proceeds. With no income at all the ratios are
/// infinite and the payment is unaffordable.
pub fn assess(
    monthly_income: f64,
    monthly_expenses: f64,
    monthly_payment: f64,
    rental_income: f64,
    securities_monthly_income: f64,
) -> Affordability {
    let total = monthly_income + rental_income + securities_monthly_income;

    let (front, back) = if total > 0.0 {
        (
            monthly_payment / total * 100.0,
            (monthly_payment + monthly_expenses) / total * 100.0,
        )
    } else {
        (f64::INFINITY, f64::INFINITY)
    };

    let front_end_ok = front <= FRONT_END_LIMIT;
    let back_end_ok = back <= BACK_END_LIMIT;

    Affordability {
        total_monthly_income: total,
        front_end_ratio: front,
        back_end_ratio: back,
        front_end_ok,
        back_end_ok,
        affordable: front_end_ok && back_end_ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_affordable_payment() {
        let result = assess(8_000.0, 1_000.0, 1_520.0, 0.0, 0.0);
        assert_relative_eq!(result.front_end_ratio, 19.0, epsilon = 0.01);
        assert_relative_eq!(result.back_end_ratio, 31.5, epsilon = 0.01);
        assert!(result.affordable);
    }

    #[test]
    fn test_rental_and_securities_income_counted() {
        let without = assess(4_000.0, 1_000.0, 1_520.0, 0.0, 0.0);
        let with = assess(4_000.0, 1_000.0, 1_520.0, 1_500.0, 500.0);

        assert!(!without.front_end_ok);
        assert_eq!(with.total_monthly_income, 6_000.0);
        assert!(with.front_end_ratio < without.front_end_ratio);
    }

    #[test]
    fn test_no_income_is_unaffordable() {
        let result = assess(0.0, 0.0, 1_520.0, 0.0, 0.0);
        assert!(result.front_end_ratio.is_infinite());
        assert!(result.back_end_ratio.is_infinite());
        assert!(!result.affordable);
    }
}
