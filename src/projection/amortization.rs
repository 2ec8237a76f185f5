//! Fixed-rate payment formula and amortization schedules

use serde::{Deserialize, Serialize};

use crate::params::MortgageTerms;

/// Scheduled monthly payment for a fixed-rate loan
///
/// Standard annuity formula; the zero-rate case degenerates to straight
/// principal division.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_months: u32) -> f64 {
    if term_months == 0 || principal <= 0.0 {
        return 0.0;
    }
    let rate = annual_rate / 12.0;
    let n = term_months as i32;
    if rate == 0.0 {
        return principal / term_months as f64;
    }
    let compound = (1.0 + rate).powi(n);
    principal * rate * compound / (compound - 1.0)
}

/// One row of an amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub remaining_balance: f64,
    pub total_interest: f64,
}

/// Generate the amortization schedule for a mortgage
///
/// An extra monthly payment goes straight to principal and shortens the
/// schedule; the final payment is clamped so the balance never goes
/// negative and the schedule stops at payoff.
pub fn amortization_schedule(terms: &MortgageTerms, extra_payment: f64) -> Vec<ScheduleRow> {
    let monthly_rate = terms.monthly_rate();
    let payment = monthly_payment(terms.principal, terms.annual_rate, terms.term_months);

    let mut schedule = Vec::with_capacity(terms.term_months as usize);
    let mut remaining = terms.principal;
    let mut total_interest = 0.0;

    for month in 1..=terms.term_months {
        let interest = remaining * monthly_rate;
        let principal_portion = (payment - interest + extra_payment).min(remaining);
        let total_payment = principal_portion + interest;

        total_interest += interest;
        remaining -= principal_portion;
        if remaining < 0.01 {
            remaining = 0.0;
        }

        schedule.push(ScheduleRow {
            month,
            payment: total_payment,
            principal: principal_portion,
            interest,
            remaining_balance: remaining,
            total_interest,
        });

        if remaining == 0.0 {
            break;
        }
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn terms() -> MortgageTerms {
        MortgageTerms {
            principal: 300_000.0,
            annual_rate: 0.045,
            term_months: 360,
            appreciation_rate: 0.0,
        }
    }

    #[test]
    fn test_payment_normal() {
        let payment = monthly_payment(300_000.0, 0.045, 360);
        assert_relative_eq!(payment, 1520.06, epsilon = 1.0);
    }

    #[test]
    fn test_payment_zero_rate() {
        let payment = monthly_payment(300_000.0, 0.0, 360);
        assert_eq!(payment, 300_000.0 / 360.0);
    }

    #[test]
    fn test_payment_high_rate_more_than_doubles() {
        let normal = monthly_payment(300_000.0, 0.045, 360);
        let high = monthly_payment(300_000.0, 0.20, 360);
        assert!(high > 2.0 * normal);
    }

    #[test]
    fn test_schedule_runs_full_term_and_pays_off() {
        let schedule = amortization_schedule(&terms(), 0.0);
        assert_eq!(schedule.len(), 360);

        // First month's interest on the full principal
        assert_relative_eq!(schedule[0].interest, 1125.0, epsilon = 1.0);

        let last = schedule.last().unwrap();
        assert_relative_eq!(last.remaining_balance, 0.0, epsilon = 0.01);

        // Total payments equal principal plus total interest
        let total_payments: f64 = schedule.iter().map(|r| r.payment).sum();
        assert_relative_eq!(total_payments, 300_000.0 + last.total_interest, epsilon = 1.0);
    }

    #[test]
    fn test_extra_payment_shortens_schedule() {
        let normal = amortization_schedule(&terms(), 0.0);
        let extra = amortization_schedule(&terms(), 200.0);

        assert!(extra.len() < normal.len());
        assert!(
            extra.last().unwrap().total_interest < normal.last().unwrap().total_interest
        );
    }

    #[test]
    fn test_zero_principal_empty_payment() {
        assert_eq!(monthly_payment(0.0, 0.045, 360), 0.0);
        let zero = MortgageTerms {
            principal: 0.0,
            annual_rate: 0.045,
            term_months: 360,
            appreciation_rate: 0.0,
        };
        let schedule = amortization_schedule(&zero, 0.0);
        // Balance starts at zero and the first row closes the schedule
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].remaining_balance, 0.0);
    }
}
