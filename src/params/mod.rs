//! Plan parameters: mortgage terms, household cash flows, validation

mod data;
pub mod loader;

pub use data::{Household, MortgageTerms, PlanParameters, ValidationError};
pub use loader::{load_plan, load_plan_from_reader, write_plan};
