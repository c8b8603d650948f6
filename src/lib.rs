//! SG Planner - Projection engine for Singapore retail financial planning
//!
//! This library provides:
//! - Boundary coercion of form input (money strings, dates, ages)
//! - CPF contribution and allocation by age band
//! - Month-by-month savings cashflow and CPF account balance projections
//! - Retirement accumulation, needs and gap analysis
//! - Children's education cost estimation with milestones
//! - Investment-linked policy (ILP) projection
//! - Parallel planning of client batches

pub mod error;
pub mod input;
pub mod assumptions;
pub mod cpf;
pub mod projection;
pub mod retirement;
pub mod education;
pub mod ilp;
pub mod profile;
pub mod planner;

// Re-export commonly used types
pub use error::{PlannerError, Result};
pub use assumptions::Assumptions;
pub use cpf::{compute_contribution, CpfContribution};
pub use projection::{CashflowProjection, CashflowSimulator, CpfBalanceProjection, CpfBalanceProjector};
pub use ilp::{project_ilp, IlpConfig, IlpProjection};
pub use profile::{ClientRecord, Gender};
pub use planner::{FinancialPlan, PlanInputs, Planner};
