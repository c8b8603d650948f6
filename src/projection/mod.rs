//! Monthly projections: savings cashflow and CPF account balances

mod state;
mod events;
mod rows;
mod cashflow;
mod cpf_balance;

pub use state::{CashflowState, CashflowTransition, CpfAccount, CpfAccountState, MonthFlows};
pub use events::{
    total_firing, EndBound, EventKind, EventStart, Frequency, ProjectionAnchor, ScheduledCashEvent,
};
pub use rows::{CashflowProjection, CashflowRow, CashflowSummary, CpfBalanceProjection, CpfBalanceRow};
pub use cashflow::{CashflowConfig, CashflowSimulator, MonthlyBudget};
pub use cpf_balance::{CpfBalanceConfig, CpfBalanceProjector, CpfWithdrawal};
