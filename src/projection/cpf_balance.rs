//! Monthly CPF account balance projection

use serde::{Deserialize, Serialize};

use crate::assumptions::CpfInterestFactors;
use crate::cpf::CpfContribution;

use super::events::{EndBound, ProjectionAnchor, ScheduledCashEvent};
use super::rows::{CpfBalanceProjection, CpfBalanceRow};
use super::state::{CpfAccount, CpfAccountState};

/// A withdrawal scheduled against one CPF account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpfWithdrawal {
    pub account: CpfAccount,
    #[serde(flatten)]
    pub event: ScheduledCashEvent,
}

impl CpfWithdrawal {
    pub fn new(account: CpfAccount, event: ScheduledCashEvent) -> Self {
        Self { account, event }
    }
}

/// Configuration for a CPF balance projection
#[derive(Debug, Clone)]
pub struct CpfBalanceConfig {
    pub anchor: ProjectionAnchor,

    /// Balances today
    pub opening: CpfAccountState,

    /// Amounts credited to each account every month after month 0
    pub monthly_credit: CpfAccountState,

    /// Total monthly contribution reported on each row
    pub monthly_contribution: f64,

    pub withdrawals: Vec<CpfWithdrawal>,

    /// Interest factors applied every January
    pub interest: CpfInterestFactors,

    /// Project up to this age...
    pub horizon_age: u32,

    /// ...or at most this many months
    pub max_months: u32,
}

impl CpfBalanceConfig {
    pub fn new(anchor: ProjectionAnchor, contribution: &CpfContribution) -> Self {
        Self {
            anchor,
            opening: CpfAccountState::default(),
            monthly_credit: contribution.monthly_credit(),
            monthly_contribution: contribution.total,
            withdrawals: Vec::new(),
            interest: CpfInterestFactors::default(),
            horizon_age: 85,
            max_months: 360,
        }
    }

    /// Last projected month; the projection covers months 0 through this one
    pub fn last_month(&self) -> u32 {
        let to_horizon = (self.horizon_age as i64 - self.anchor.current_age as i64) * 12;
        to_horizon.clamp(0, self.max_months as i64) as u32
    }
}

/// Month-by-month CPF balance projector
pub struct CpfBalanceProjector {
    config: CpfBalanceConfig,
}

impl CpfBalanceProjector {
    pub fn new(config: CpfBalanceConfig) -> Self {
        Self { config }
    }

    /// Run the projection. Each month applies the contribution, then January
    /// interest, then withdrawals.
    pub fn project(&self) -> CpfBalanceProjection {
        let config = &self.config;
        let anchor = &config.anchor;
        let last_month = config.last_month();

        let mut projection = CpfBalanceProjection {
            rows: Vec::with_capacity(last_month as usize + 1),
        };
        let mut state = config.opening;

        for m in 0..=last_month {
            let calendar = anchor.reference.offset(m);
            let is_interest_month = m > 0 && calendar.is_january();

            if m > 0 {
                state = state.contribute(&config.monthly_credit);
            }
            if is_interest_month {
                state = state.credit_interest(&config.interest);
            }
            state = self.apply_withdrawals(state, m as i64);

            let age_decimal = anchor.current_age as f64 + m as f64 / 12.0;
            projection.add_row(CpfBalanceRow {
                month: m,
                age: age_decimal.round() as u32,
                age_decimal,
                year: calendar.year,
                month_label: calendar.label().to_string(),
                oa: state.oa,
                sa: state.sa,
                ma: state.ma,
                total: state.total(),
                monthly_contribution: if m == 0 { 0.0 } else { config.monthly_contribution },
                is_interest_month,
            });
        }

        log::debug!(
            "CPF projection: {} rows to age {:.1}",
            projection.rows.len(),
            anchor.current_age as f64 + last_month as f64 / 12.0
        );

        projection
    }

    fn apply_withdrawals(&self, state: CpfAccountState, month: i64) -> CpfAccountState {
        self.config
            .withdrawals
            .iter()
            .filter(|w| w.event.fires_at(month, &self.config.anchor, EndBound::Ignored))
            .fold(state, |state, w| state.withdraw(w.account, w.event.amount))
    }
}
