//! Mortgage Planner - Month-by-month mortgage funding simulator
//!
//! This library provides:
//! - A deterministic simulation engine producing month-indexed balance
//!   and net-worth trajectories for a mortgage plan
//! - Funding strategy adjusters: house sale, rental income,
//!   pledged-asset borrowing, securities liquidation
//! - Inflation adjustment for income, expenses, and rent
//! - Amortization schedules and income-ratio affordability metrics
//! - A JSON scenario store with batch side-by-side comparison
//! - A grid search for the sale schedule maximizing final net worth

pub mod optimize;
pub mod params;
pub mod projection;
pub mod scenario;
pub mod strategy;

// Re-export commonly used types
pub use params::{Household, MortgageTerms, PlanParameters, ValidationError};
pub use projection::{
    project_plan, MonthlySnapshot, Projection, ProjectionSummary, SimulationEngine,
};
pub use scenario::{Scenario, ScenarioRunner, ScenarioStore, StoreError, StrategyPreset};
