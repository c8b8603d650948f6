//! Projection state carried from one month to the next
//!
//! Each transition consumes the state by value and returns the next one, so a
//! simulator loop is a fold over months and every step can be tested on its own.

use serde::{Deserialize, Serialize};

use crate::assumptions::CpfInterestFactors;

/// Flows applied to the savings balance in one month
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthFlows {
    /// Constant net monthly savings (take-home less recurring expenses)
    pub base_income: f64,
    pub additional_income: f64,
    pub withdrawal: f64,
}

impl MonthFlows {
    pub fn net(&self) -> f64 {
        self.base_income + self.additional_income - self.withdrawal
    }
}

/// Savings balance at the start of a projection month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashflowState {
    pub month: u32,
    pub balance: f64,
}

/// Result of advancing a cashflow state by one month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashflowTransition {
    pub next: CashflowState,
    pub interest_earned: f64,
    pub net_cashflow: f64,
}

impl CashflowState {
    pub fn opening(balance: f64) -> Self {
        Self { month: 0, balance }
    }

    /// Credit interest on the opening balance, then add the month's net flows.
    /// Interest never compounds on the same month's flows.
    pub fn advance(self, flows: &MonthFlows, monthly_rate: f64) -> CashflowTransition {
        let interest_earned = self.balance * monthly_rate;
        let net_cashflow = flows.net();

        CashflowTransition {
            next: CashflowState {
                month: self.month + 1,
                balance: self.balance + interest_earned + net_cashflow,
            },
            interest_earned,
            net_cashflow,
        }
    }
}

/// CPF account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpfAccount {
    Oa,
    Sa,
    Ma,
}

/// Ordinary, Special and MediSave balances
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CpfAccountState {
    pub oa: f64,
    pub sa: f64,
    pub ma: f64,
}

impl CpfAccountState {
    pub fn new(oa: f64, sa: f64, ma: f64) -> Self {
        Self { oa, sa, ma }
    }

    pub fn total(&self) -> f64 {
        self.oa + self.sa + self.ma
    }

    pub fn balance(&self, account: CpfAccount) -> f64 {
        match account {
            CpfAccount::Oa => self.oa,
            CpfAccount::Sa => self.sa,
            CpfAccount::Ma => self.ma,
        }
    }

    /// Add one month's contribution to each account
    pub fn contribute(self, credit: &CpfAccountState) -> Self {
        Self {
            oa: self.oa + credit.oa,
            sa: self.sa + credit.sa,
            ma: self.ma + credit.ma,
        }
    }

    /// Apply the yearly interest factors
    pub fn credit_interest(self, factors: &CpfInterestFactors) -> Self {
        Self {
            oa: self.oa * factors.oa,
            sa: self.sa * factors.sa,
            ma: self.ma * factors.ma,
        }
    }

    /// Withdraw from one account; the balance never goes below zero
    pub fn withdraw(self, account: CpfAccount, amount: f64) -> Self {
        let floor = |balance: f64| (balance - amount).max(0.0);
        match account {
            CpfAccount::Oa => Self { oa: floor(self.oa), ..self },
            CpfAccount::Sa => Self { sa: floor(self.sa), ..self },
            CpfAccount::Ma => Self { ma: floor(self.ma), ..self },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cashflow_interest_on_opening_balance_only() {
        let state = CashflowState::opening(12_000.0);
        let flows = MonthFlows {
            base_income: 1_000.0,
            additional_income: 500.0,
            withdrawal: 200.0,
        };

        let step = state.advance(&flows, 0.12 / 12.0);

        assert_relative_eq!(step.interest_earned, 120.0, epsilon = 1e-9);
        assert_relative_eq!(step.net_cashflow, 1_300.0);
        assert_relative_eq!(step.next.balance, 13_420.0, epsilon = 1e-9);
        assert_eq!(step.next.month, 1);
    }

    #[test]
    fn test_cpf_withdraw_floors_at_zero() {
        let state = CpfAccountState::new(3_000.0, 100.0, 50.0);

        let after = state.withdraw(CpfAccount::Oa, 5_000.0);
        assert_eq!(after.oa, 0.0);
        assert_eq!(after.sa, 100.0);
        assert_eq!(after.ma, 50.0);

        let after = state.withdraw(CpfAccount::Ma, 20.0);
        assert_eq!(after.ma, 30.0);
    }

    #[test]
    fn test_cpf_contribute_then_interest() {
        let credit = CpfAccountState::new(100.0, 50.0, 25.0);
        let state = CpfAccountState::new(1_000.0, 1_000.0, 1_000.0)
            .contribute(&credit)
            .credit_interest(&CpfInterestFactors::default());

        assert_relative_eq!(state.oa, 1_100.0 * 1.025);
        assert_relative_eq!(state.sa, 1_050.0 * 1.04);
        assert_relative_eq!(state.ma, 1_025.0 * 1.04);
        assert_relative_eq!(state.total(), state.oa + state.sa + state.ma);
    }
}
