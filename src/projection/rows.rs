//! Output rows for monthly projections

use serde::{Deserialize, Serialize};

use super::state::CpfAccountState;

/// One month of the savings projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowRow {
    // Timing
    pub month: u32,
    pub age: u32,
    pub age_decimal: f64,
    pub year: i32,
    pub month_label: String,

    // Flows
    pub base_income: f64,
    pub additional_income: f64,
    pub total_income: f64,
    pub withdrawal: f64,
    pub interest_earned: f64,
    pub net_cashflow: f64,

    /// Balance after interest and the month's flows
    pub balance: f64,
}

/// Complete savings projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashflowProjection {
    pub rows: Vec<CashflowRow>,
}

impl CashflowProjection {
    pub fn add_row(&mut self, row: CashflowRow) {
        self.rows.push(row);
    }

    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.balance).unwrap_or(0.0)
    }

    /// Get summary statistics
    pub fn summary(&self) -> CashflowSummary {
        CashflowSummary {
            total_months: self.rows.len() as u32,
            final_balance: self.final_balance(),
            total_income: self.rows.iter().map(|r| r.total_income).sum(),
            total_withdrawals: self.rows.iter().map(|r| r.withdrawal).sum(),
            total_interest: self.rows.iter().map(|r| r.interest_earned).sum(),
        }
    }
}

/// Summary statistics for a savings projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowSummary {
    pub total_months: u32,
    pub final_balance: f64,
    /// Base plus additional income
    pub total_income: f64,
    pub total_withdrawals: f64,
    pub total_interest: f64,
}

/// One month of the CPF balance projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpfBalanceRow {
    pub month: u32,
    /// Age rounded to the nearest year
    pub age: u32,
    pub age_decimal: f64,
    pub year: i32,
    pub month_label: String,

    pub oa: f64,
    pub sa: f64,
    pub ma: f64,
    pub total: f64,

    /// Contribution credited this month; zero in month 0
    pub monthly_contribution: f64,
    /// January of any year after the first month
    pub is_interest_month: bool,
}

impl CpfBalanceRow {
    pub fn balances(&self) -> CpfAccountState {
        CpfAccountState::new(self.oa, self.sa, self.ma)
    }
}

/// Complete CPF balance projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpfBalanceProjection {
    pub rows: Vec<CpfBalanceRow>,
}

impl CpfBalanceProjection {
    pub fn add_row(&mut self, row: CpfBalanceRow) {
        self.rows.push(row);
    }

    pub fn final_balances(&self) -> CpfAccountState {
        self.rows.last().map(|r| r.balances()).unwrap_or_default()
    }

    pub fn total_interest_months(&self) -> usize {
        self.rows.iter().filter(|r| r.is_interest_month).count()
    }
}
