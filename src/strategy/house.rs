//! Existing-house funding strategy: one-time sale and/or rental income

use serde::{Deserialize, Serialize};

/// Capital-gains exemption on a primary-residence sale
pub const SALE_TAX_EXEMPTION: f64 = 500_000.0;

/// Capital-gains tax rate applied above the exemption
pub const SALE_TAX_RATE: f64 = 0.15;

/// Where the net proceeds of a house sale are routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProceedsTarget {
    /// Deposit into the savings account
    Savings,
    /// Pay down the mortgage principal
    Principal,
    /// Buy securities
    Securities,
}

impl Default for ProceedsTarget {
    fn default() -> Self {
        ProceedsTarget::Savings
    }
}

/// Parameters for the existing-house strategy
///
/// The house can be sold once (lump sum routed per [`ProceedsTarget`])
/// and/or rented out for a recurring monthly income that stops at sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseStrategy {
    /// Current market value of the existing house
    pub value: f64,

    /// Annual appreciation rate of the existing house
    pub appreciation_rate: f64,

    /// Original purchase price, used for the sale-tax calculation
    pub purchase_price: f64,

    /// Month the house is sold; negative means never sell
    pub sell_month: i32,

    /// Destination of the net sale proceeds
    #[serde(default)]
    pub proceeds: ProceedsTarget,

    /// Apply capital-gains tax to the sale
    #[serde(default)]
    pub apply_sale_tax: bool,

    /// Collect rent while the house is owned
    #[serde(default)]
    pub rent_enabled: bool,

    /// Monthly rental income (before inflation adjustment)
    #[serde(default)]
    pub monthly_rent: f64,
}

impl HouseStrategy {
    /// No existing house at all
    pub fn disabled() -> Self {
        Self {
            value: 0.0,
            appreciation_rate: 0.0,
            purchase_price: 0.0,
            sell_month: -1,
            proceeds: ProceedsTarget::Savings,
            apply_sale_tax: false,
            rent_enabled: false,
            monthly_rent: 0.0,
        }
    }

    /// Appreciated value at a given month, assuming the house is still owned
    pub fn value_at(&self, month: u32) -> f64 {
        self.value * (1.0 + self.appreciation_rate / 12.0).powi(month as i32)
    }

    /// Whether the sale triggers in this month
    pub fn sells_at(&self, month: u32) -> bool {
        self.sell_month >= 0 && month == self.sell_month as u32
    }

    /// Tax and net proceeds for a sale at the given gross price
    pub fn sale_proceeds(&self, gross: f64) -> (f64, f64) {
        if !self.apply_sale_tax {
            return (0.0, gross);
        }
        let (tax, net) = capital_gains_tax(gross, self.purchase_price);
        (tax, net)
    }
}

impl Default for HouseStrategy {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Capital-gains tax on a house sale: 15% of the gain above a $500k
/// exemption. Returns (tax, net proceeds).
pub fn capital_gains_tax(sale_price: f64, purchase_price: f64) -> (f64, f64) {
    let gain = (sale_price - purchase_price).max(0.0);
    let taxable = (gain - SALE_TAX_EXEMPTION).max(0.0);
    let tax = taxable * SALE_TAX_RATE;
    (tax, sale_price - tax)
}
