//! Core simulation engine for monthly mortgage funding projections

use crate::params::{PlanParameters, ValidationError};
use crate::strategy::{InflationAdjuster, ProceedsTarget};

use super::amortization::monthly_payment;
use super::snapshot::{MonthlySnapshot, Projection};
use super::state::ProjectionState;

/// Main simulation engine
///
/// Holds a validated plan and walks it month by month. Runs are
/// deterministic: the same plan always produces the same projection.
pub struct SimulationEngine {
    params: PlanParameters,
    payment: f64,
}

impl SimulationEngine {
    /// Create an engine for a plan, rejecting invalid parameters
    pub fn new(params: PlanParameters) -> Result<Self, ValidationError> {
        params.validate()?;
        let payment = monthly_payment(
            params.mortgage.principal,
            params.mortgage.annual_rate,
            params.mortgage.term_months,
        );
        Ok(Self { params, payment })
    }

    pub fn params(&self) -> &PlanParameters {
        &self.params
    }

    /// Scheduled monthly mortgage payment
    pub fn monthly_payment(&self) -> f64 {
        self.payment
    }

    /// Run the simulation over the full term
    ///
    /// Produces the month-0 baseline row plus one row per month of the
    /// term, in order.
    pub fn project(&self) -> Projection {
        let mut projection = Projection::new(self.payment);
        let mut state = ProjectionState::from_plan(&self.params);
        let mut inflation = InflationAdjuster::new(self.params.inflation);

        projection.add_row(self.baseline_row(&state));

        for _month in 1..=self.params.mortgage.term_months {
            state.advance_month();
            inflation.advance();

            let row = self.calculate_month(&mut state, &inflation);
            projection.add_row(row);
        }

        projection
    }

    /// Record the state at closing, before the first payment
    fn baseline_row(&self, state: &ProjectionState) -> MonthlySnapshot {
        let mut row = MonthlySnapshot::new(0);
        let property_value = self.params.mortgage.property_value_at(0);
        let house_value = state.house_value(&self.params);

        row.mortgage_balance = state.mortgage_balance;
        row.property_value = property_value;
        row.home_equity = property_value - state.mortgage_balance;
        row.house_value = house_value;
        row.securities_balance = state.securities;
        row.savings_balance = state.savings;
        row.income = self.params.household.monthly_income;
        row.expenses = self.params.household.monthly_expenses;
        row.net_worth = state.net_worth(property_value, house_value);
        row
    }

    /// Calculate balances and cash movements for a single month
    fn calculate_month(
        &self,
        state: &mut ProjectionState,
        inflation: &InflationAdjuster,
    ) -> MonthlySnapshot {
        let mut row = MonthlySnapshot::new(state.month);
        row.inflation_factor = inflation.factor();
        row.income = inflation.income(self.params.household.monthly_income);
        row.expenses = inflation.expenses(self.params.household.monthly_expenses);
        row.property_value = self.params.mortgage.property_value_at(state.month);

        self.apply_amortization(state, &mut row);
        self.apply_securities_sales(state, &mut row);

        // Pledge interest accrues on the balance outstanding at the start
        // of the month, so the draw month itself is interest-free
        row.pledge_interest = self
            .params
            .strategy
            .pledge
            .monthly_interest(state.pledge_balance);

        let mut lump_to_savings = row.securities_sold;
        lump_to_savings += self.apply_house_sale(state, &mut row);

        if self.params.strategy.pledge.draws_at(state.month) {
            state.pledge_balance = self.params.strategy.pledge.amount;
            lump_to_savings += self.params.strategy.pledge.amount;
        }
        row.pledge_balance = state.pledge_balance;

        // Rent arrives only while the house is still owned; a sale this
        // month already ended the stream
        if self.params.strategy.house.rent_enabled && state.house_owned {
            row.rent_income = inflation.rent(self.params.strategy.house.monthly_rent);
        }

        self.update_savings(state, &mut row, lump_to_savings);

        let house_value = state.house_value(&self.params);
        row.house_value = house_value;
        row.home_equity = row.property_value - state.mortgage_balance;
        row.net_worth = state.net_worth(row.property_value, house_value);
        row
    }

    /// Apply the scheduled mortgage payment for the month
    ///
    /// The final payment is clamped to the remaining balance plus
    /// interest; once the loan is paid off no further payment is due.
    fn apply_amortization(&self, state: &mut ProjectionState, row: &mut MonthlySnapshot) {
        let interest = state.mortgage_balance * self.params.mortgage.monthly_rate();
        let payment = self.payment.min(state.mortgage_balance + interest);
        let principal_paid = payment - interest;

        state.mortgage_balance -= principal_paid;
        if state.mortgage_balance < 0.01 {
            state.mortgage_balance = 0.0;
        }

        row.payment = payment;
        row.interest_paid = interest;
        row.principal_paid = principal_paid;
        row.mortgage_balance = state.mortgage_balance;
    }

    /// Grow the securities holding, then apply the sale schedule
    fn apply_securities_sales(&self, state: &mut ProjectionState, row: &mut MonthlySnapshot) {
        let securities = &self.params.strategy.securities;

        state.securities *= 1.0 + securities.monthly_growth();
        let sold = securities.sale_for_month(state.month, state.securities);
        state.securities -= sold;

        row.securities_sold = sold;
        row.securities_balance = state.securities;
    }

    /// Sell the existing house if this is its month; returns the portion
    /// of the net proceeds destined for the savings account
    fn apply_house_sale(&self, state: &mut ProjectionState, row: &mut MonthlySnapshot) -> f64 {
        let house = &self.params.strategy.house;
        if !state.house_owned || !house.sells_at(state.month) {
            return 0.0;
        }

        let gross = house.value_at(state.month);
        let (tax, net) = house.sale_proceeds(gross);
        state.house_owned = false;

        row.sale_proceeds = net;
        row.sale_tax = tax;

        match house.proceeds {
            ProceedsTarget::Savings => net,
            ProceedsTarget::Principal => {
                let paydown = net.min(state.mortgage_balance);
                state.mortgage_balance -= paydown;
                if state.mortgage_balance < 0.01 {
                    state.mortgage_balance = 0.0;
                }
                row.extra_principal = paydown;
                row.mortgage_balance = state.mortgage_balance;
                // Anything beyond the remaining balance lands in savings
                net - paydown
            }
            ProceedsTarget::Securities => {
                state.securities += net;
                row.securities_balance = state.securities;
                0.0
            }
        }
    }

    /// Roll the savings account forward: interest, lump sums, and the
    /// monthly leftover (which may draw savings down, floored at zero)
    fn update_savings(&self, state: &mut ProjectionState, row: &mut MonthlySnapshot, lumps: f64) {
        let monthly_rate = self.params.household.monthly_savings_rate();
        let interest = state.savings * monthly_rate;

        let leftover =
            row.income - row.expenses - row.payment + row.rent_income - row.pledge_interest;

        let mut savings = state.savings * (1.0 + monthly_rate) + lumps;
        if leftover > 0.0 {
            savings += leftover;
        } else {
            savings = (savings + leftover).max(0.0);
        }
        state.savings = savings;

        row.savings_interest = interest;
        row.savings_balance = savings;
        row.cash_flow = leftover + interest;
    }
}

/// Validate a plan and run it in one call
pub fn project_plan(params: &PlanParameters) -> Result<Projection, ValidationError> {
    Ok(SimulationEngine::new(params.clone())?.project())
}
