//! Monthly savings projection with scheduled income and withdrawals

use serde::{Deserialize, Serialize};

use super::events::{total_firing, EndBound, ProjectionAnchor, ScheduledCashEvent};
use super::rows::{CashflowProjection, CashflowRow};
use super::state::{CashflowState, MonthFlows};

/// Take-home pay, spending and what is left each month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBudget {
    pub take_home: f64,
    pub total_expenses: f64,
    /// May be negative when spending exceeds take-home
    pub monthly_savings: f64,
    pub annual_savings: f64,
    /// Savings as a percentage of take-home; 0 without take-home
    pub savings_rate_pct: f64,
}

impl MonthlyBudget {
    pub fn from_take_home(take_home: f64, total_expenses: f64) -> Self {
        let monthly_savings = take_home - total_expenses;
        let savings_rate_pct = if take_home > 0.0 {
            monthly_savings / take_home * 100.0
        } else {
            0.0
        };

        Self {
            take_home,
            total_expenses,
            monthly_savings,
            annual_savings: monthly_savings * 12.0,
            savings_rate_pct,
        }
    }
}

/// Oldest age a savings projection runs to
pub const MAX_TARGET_AGE: u32 = 120;

/// Configuration for a savings projection
#[derive(Debug, Clone)]
pub struct CashflowConfig {
    /// Member age and calendar month of month 0
    pub anchor: ProjectionAnchor,

    /// Project until this age, capped at [`MAX_TARGET_AGE`]
    pub target_age: u32,

    /// Savings balance today
    pub opening_balance: f64,

    /// Net savings added every month
    pub monthly_savings: f64,

    /// Bank interest in percent per year, credited monthly at a twelfth of the rate
    pub annual_interest_rate_pct: f64,

    /// Income events are bounded by their end age
    pub income_events: Vec<ScheduledCashEvent>,

    /// Withdrawal events run indefinitely once started
    pub withdrawal_events: Vec<ScheduledCashEvent>,
}

impl CashflowConfig {
    pub fn new(anchor: ProjectionAnchor, monthly_savings: f64) -> Self {
        Self {
            anchor,
            target_age: 100,
            opening_balance: 0.0,
            monthly_savings,
            annual_interest_rate_pct: 0.0,
            income_events: Vec::new(),
            withdrawal_events: Vec::new(),
        }
    }

    /// Number of projected months; at least one
    pub fn total_months(&self) -> u32 {
        let target_age = self.target_age.min(MAX_TARGET_AGE);
        let months = (target_age as i64 - self.anchor.current_age as i64) * 12;
        months.max(1) as u32
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_interest_rate_pct / 100.0 / 12.0
    }
}

/// Month-by-month savings simulator
pub struct CashflowSimulator {
    config: CashflowConfig,
}

impl CashflowSimulator {
    pub fn new(config: CashflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CashflowConfig {
        &self.config
    }

    /// Run the projection from month 0 to the target age
    pub fn project(&self) -> CashflowProjection {
        let config = &self.config;
        let anchor = &config.anchor;
        let total_months = config.total_months();
        let monthly_rate = config.monthly_rate();

        if config.target_age > MAX_TARGET_AGE {
            log::warn!("target age {} capped at {}", config.target_age, MAX_TARGET_AGE);
        }
        if config.target_age <= anchor.current_age {
            log::warn!(
                "target age {} not after current age {}; projecting a single month",
                config.target_age,
                anchor.current_age
            );
        }

        let mut projection = CashflowProjection {
            rows: Vec::with_capacity(total_months as usize),
        };
        let mut state = CashflowState::opening(config.opening_balance);

        for m in 0..total_months {
            let month = m as i64;
            let flows = MonthFlows {
                base_income: config.monthly_savings,
                additional_income: total_firing(&config.income_events, month, anchor, EndBound::Honored),
                withdrawal: total_firing(&config.withdrawal_events, month, anchor, EndBound::Ignored),
            };

            let step = state.advance(&flows, monthly_rate);
            let calendar = anchor.reference.offset(m);
            let age_decimal = anchor.current_age as f64 + m as f64 / 12.0;

            projection.add_row(CashflowRow {
                month: m,
                age: anchor.current_age + m / 12,
                age_decimal,
                year: calendar.year,
                month_label: calendar.label().to_string(),
                base_income: flows.base_income,
                additional_income: flows.additional_income,
                total_income: flows.base_income + flows.additional_income,
                withdrawal: flows.withdrawal,
                interest_earned: step.interest_earned,
                net_cashflow: step.net_cashflow,
                balance: step.next.balance,
            });

            state = step.next;
        }

        log::debug!(
            "cashflow projection: {} months, final balance {:.2}",
            projection.rows.len(),
            projection.final_balance()
        );

        projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ReferenceMonth;
    use crate::projection::events::{EventStart, Frequency};
    use approx::assert_relative_eq;

    fn anchor() -> ProjectionAnchor {
        ProjectionAnchor::new(30, ReferenceMonth::new(2025, 0))
    }

    #[test]
    fn test_zero_interest_identity() {
        let mut config = CashflowConfig::new(anchor(), 1_500.0);
        config.target_age = 40;
        config.opening_balance = 10_000.0;
        config.income_events.push(
            ScheduledCashEvent::recurring(2_000.0, Frequency::Yearly, EventStart::AtAge { start_age: 30, start_month: 11 })
                .named("Bonus"),
        );
        config.withdrawal_events.push(ScheduledCashEvent::one_time(
            20_000.0,
            EventStart::AtAge { start_age: 33, start_month: 5 },
        ));

        let projection = CashflowSimulator::new(config).project();
        assert_eq!(projection.rows.len(), 120);

        let summary = projection.summary();
        assert_relative_eq!(summary.total_interest, 0.0);
        assert_relative_eq!(
            summary.final_balance,
            10_000.0 + summary.total_income - summary.total_withdrawals,
            epsilon = 1e-6
        );
        // Ten Decembers of bonus, one withdrawal
        assert_relative_eq!(summary.total_income, 1_500.0 * 120.0 + 2_000.0 * 10.0);
        assert_relative_eq!(summary.total_withdrawals, 20_000.0);
    }

    #[test]
    fn test_plain_savings_identity() {
        for target_age in [31, 35, 50] {
            let mut config = CashflowConfig::new(anchor(), 1_250.0);
            config.target_age = target_age;
            config.opening_balance = 8_000.0;

            let projection = CashflowSimulator::new(config).project();
            let months = (target_age - 30) * 12;
            assert_eq!(projection.rows.len(), months as usize);

            for (n, row) in projection.rows.iter().enumerate() {
                assert_eq!(row.interest_earned, 0.0);
                assert_relative_eq!(row.balance, 8_000.0 + (n + 1) as f64 * 1_250.0, epsilon = 1e-6);
            }

            let summary = projection.summary();
            assert_eq!(summary.total_interest, 0.0);
            assert_eq!(summary.total_withdrawals, 0.0);
            assert_relative_eq!(summary.final_balance, 8_000.0 + months as f64 * 1_250.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_target_age_capped() {
        let mut config = CashflowConfig::new(anchor(), 100.0);
        config.target_age = u32::MAX;
        assert_eq!(config.total_months(), (MAX_TARGET_AGE - 30) * 12);

        config.target_age = MAX_TARGET_AGE;
        assert_eq!(config.total_months(), (MAX_TARGET_AGE - 30) * 12);
    }

    #[test]
    fn test_interest_on_pre_event_balance() {
        let mut config = CashflowConfig::new(anchor(), 1_000.0);
        config.target_age = 31;
        config.opening_balance = 12_000.0;
        config.annual_interest_rate_pct = 2.4;

        let projection = CashflowSimulator::new(config).project();
        let first = &projection.rows[0];

        assert_relative_eq!(first.interest_earned, 24.0, epsilon = 1e-9);
        assert_relative_eq!(first.balance, 13_024.0, epsilon = 1e-9);
        assert_relative_eq!(projection.rows[1].interest_earned, 13_024.0 * 0.002, epsilon = 1e-9);
    }

    #[test]
    fn test_income_end_age_honored_withdrawal_end_age_ignored() {
        let start = EventStart::AtAge { start_age: 30, start_month: 0 };
        let mut config = CashflowConfig::new(anchor(), 0.0);
        config.target_age = 33;
        config.income_events.push(ScheduledCashEvent::recurring(100.0, Frequency::Monthly, start).until_age(30));
        config.withdrawal_events.push(ScheduledCashEvent::recurring(10.0, Frequency::Monthly, start).until_age(30));

        let projection = CashflowSimulator::new(config).project();
        let summary = projection.summary();

        // Income stops after December at age 30; withdrawals run all 36 months
        assert_relative_eq!(summary.total_income, 1_200.0);
        assert_relative_eq!(summary.total_withdrawals, 360.0);
        assert_eq!(projection.rows[12].additional_income, 0.0);
    }

    #[test]
    fn test_target_not_after_current_age_projects_one_month() {
        let mut config = CashflowConfig::new(anchor(), 500.0);
        config.target_age = 25;

        let projection = CashflowSimulator::new(config).project();
        assert_eq!(projection.rows.len(), 1);
        assert_relative_eq!(projection.final_balance(), 500.0);
    }

    #[test]
    fn test_row_calendar_fields() {
        let mut config = CashflowConfig::new(ProjectionAnchor::new(45, ReferenceMonth::new(2025, 10)), 0.0);
        config.target_age = 46;

        let projection = CashflowSimulator::new(config).project();
        let row = &projection.rows[2];

        assert_eq!(row.year, 2026);
        assert_eq!(row.month_label, "Jan");
        assert_eq!(row.age, 45);
        assert_relative_eq!(row.age_decimal, 45.0 + 2.0 / 12.0);
        assert_eq!(projection.rows[11].age, 45);
    }

    #[test]
    fn test_monthly_budget() {
        let budget = MonthlyBudget::from_take_home(4_800.0, 3_000.0);
        assert_relative_eq!(budget.monthly_savings, 1_800.0);
        assert_relative_eq!(budget.annual_savings, 21_600.0);
        assert_relative_eq!(budget.savings_rate_pct, 37.5);

        let empty = MonthlyBudget::from_take_home(0.0, 200.0);
        assert_eq!(empty.savings_rate_pct, 0.0);
        assert_eq!(empty.monthly_savings, -200.0);
    }
}
