//! Snapshot output structures for simulation runs

use serde::{Deserialize, Serialize};

/// State of every balance at the end of one simulated month
///
/// Index 0 of a projection is the month-0 baseline recorded before the
/// first payment; all later rows carry the cash movements of their month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    // Timing
    pub month: u32,

    // Mortgage
    pub payment: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,
    /// Principal paydown beyond the scheduled payment (routed proceeds)
    pub extra_principal: f64,
    pub mortgage_balance: f64,
    pub property_value: f64,
    pub home_equity: f64,

    // Existing house
    pub house_value: f64,
    pub rent_income: f64,
    pub sale_proceeds: f64,
    pub sale_tax: f64,

    // Securities and pledged loan
    pub securities_balance: f64,
    pub securities_sold: f64,
    pub pledge_balance: f64,
    pub pledge_interest: f64,

    // Savings
    pub savings_balance: f64,
    pub savings_interest: f64,

    // Inflation-adjusted household amounts
    pub income: f64,
    pub expenses: f64,
    pub inflation_factor: f64,

    // Summary
    pub cash_flow: f64,
    pub net_worth: f64,
}

impl MonthlySnapshot {
    /// Create an empty snapshot for a month
    pub fn new(month: u32) -> Self {
        Self {
            month,
            payment: 0.0,
            interest_paid: 0.0,
            principal_paid: 0.0,
            extra_principal: 0.0,
            mortgage_balance: 0.0,
            property_value: 0.0,
            home_equity: 0.0,
            house_value: 0.0,
            rent_income: 0.0,
            sale_proceeds: 0.0,
            sale_tax: 0.0,
            securities_balance: 0.0,
            securities_sold: 0.0,
            pledge_balance: 0.0,
            pledge_interest: 0.0,
            savings_balance: 0.0,
            savings_interest: 0.0,
            income: 0.0,
            expenses: 0.0,
            inflation_factor: 1.0,
            cash_flow: 0.0,
            net_worth: 0.0,
        }
    }
}

/// Complete result of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Scheduled monthly mortgage payment
    pub monthly_payment: f64,

    /// Month-indexed snapshots; index 0 is the pre-payment baseline
    pub snapshots: Vec<MonthlySnapshot>,
}

impl Projection {
    pub fn new(monthly_payment: f64) -> Self {
        Self {
            monthly_payment,
            snapshots: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: MonthlySnapshot) {
        self.snapshots.push(row);
    }

    /// Number of simulated months (excludes the month-0 baseline)
    pub fn months(&self) -> u32 {
        self.snapshots.len().saturating_sub(1) as u32
    }

    pub fn final_net_worth(&self) -> f64 {
        self.snapshots.last().map(|r| r.net_worth).unwrap_or(0.0)
    }

    /// First month with a fully repaid mortgage, if any
    pub fn payoff_month(&self) -> Option<u32> {
        self.snapshots
            .iter()
            .skip(1)
            .find(|r| r.mortgage_balance == 0.0)
            .map(|r| r.month)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_interest: f64 = self.snapshots.iter().map(|r| r.interest_paid).sum();
        let total_rent: f64 = self.snapshots.iter().map(|r| r.rent_income).sum();
        let total_sale_tax: f64 = self.snapshots.iter().map(|r| r.sale_tax).sum();
        let total_pledge_interest: f64 = self.snapshots.iter().map(|r| r.pledge_interest).sum();

        let last = self.snapshots.last();
        ProjectionSummary {
            months: self.months(),
            monthly_payment: self.monthly_payment,
            total_interest,
            total_rent,
            total_sale_tax,
            total_pledge_interest,
            payoff_month: self.payoff_month(),
            final_savings: last.map(|r| r.savings_balance).unwrap_or(0.0),
            final_securities: last.map(|r| r.securities_balance).unwrap_or(0.0),
            final_net_worth: last.map(|r| r.net_worth).unwrap_or(0.0),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub months: u32,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_rent: f64,
    pub total_sale_tax: f64,
    pub total_pledge_interest: f64,
    pub payoff_month: Option<u32>,
    pub final_savings: f64,
    pub final_securities: f64,
    pub final_net_worth: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_totals() {
        let mut projection = Projection::new(1_000.0);
        projection.add_row(MonthlySnapshot::new(0));

        let mut row1 = MonthlySnapshot::new(1);
        row1.interest_paid = 100.0;
        row1.rent_income = 50.0;
        row1.mortgage_balance = 500.0;
        projection.add_row(row1);

        let mut row2 = MonthlySnapshot::new(2);
        row2.interest_paid = 90.0;
        row2.net_worth = 1_234.0;
        row2.mortgage_balance = 0.0;
        projection.add_row(row2);

        let summary = projection.summary();
        assert_eq!(summary.months, 2);
        assert_eq!(summary.total_interest, 190.0);
        assert_eq!(summary.total_rent, 50.0);
        assert_eq!(summary.payoff_month, Some(2));
        assert_eq!(summary.final_net_worth, 1_234.0);
    }

    #[test]
    fn test_payoff_month_ignores_baseline() {
        let mut projection = Projection::new(1_000.0);
        // Baseline row has a zero balance only because nothing is set yet
        projection.add_row(MonthlySnapshot::new(0));

        let mut row = MonthlySnapshot::new(1);
        row.mortgage_balance = 500.0;
        projection.add_row(row);

        assert_eq!(projection.payoff_month(), None);
    }
}
