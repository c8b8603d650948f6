//! Client records and their loading

mod data;
pub mod loader;

pub use data::{
    CashflowSettings, ChildRecord, ClientRecord, CpfBalancesForm, CpfSettings, CustomExpense,
    EmploymentStatus, ExpenseForm, Gender, IlpSettings, ProfileForm, RetirementSettings,
};
pub use loader::{load_clients, load_clients_from_reader, save_clients, save_clients_to_path};
