//! Monthly-compounded retirement savings accumulation

use serde::{Deserialize, Serialize};

/// Balance at the end of a projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementSnapshot {
    pub year: u32,
    pub balance: f64,
    /// Initial amount plus every monthly contribution so far
    pub total_contributions: f64,
    pub gains: f64,
}

/// Grow `initial` at `annual_rate / 12` per month, adding `monthly` after the
/// growth each month. One snapshot at year 0 and one per completed year.
pub fn project_retirement(initial: f64, monthly: f64, annual_rate: f64, years: u32) -> Vec<RetirementSnapshot> {
    let monthly_rate = annual_rate / 12.0;
    let months = years * 12;

    let mut snapshots = Vec::with_capacity(years as usize + 1);
    let mut balance = initial;
    let mut total_contributions = initial;

    for m in 0..=months {
        if m > 0 {
            balance = balance * (1.0 + monthly_rate) + monthly;
            total_contributions += monthly;
        }

        if m % 12 == 0 {
            snapshots.push(RetirementSnapshot {
                year: m / 12,
                balance,
                total_contributions,
                gains: balance - total_contributions,
            });
        }
    }

    snapshots
}

/// Future value of `months` end-of-month payments. Falls back to a plain sum
/// at a zero rate.
pub fn annuity_future_value(payment: f64, monthly_rate: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return payment * months as f64;
    }
    payment * (((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate)
}

/// Monthly payment whose annuity future value reaches `target`
pub fn required_monthly_payment(target: f64, monthly_rate: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return target / months as f64;
    }
    target / (((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_year_at_eight_percent() {
        let snapshots = project_retirement(10_000.0, 1_000.0, 0.08, 1);
        assert_eq!(snapshots.len(), 2);

        let start = &snapshots[0];
        assert_eq!(start.year, 0);
        assert_eq!(start.balance, 10_000.0);
        assert_eq!(start.total_contributions, 10_000.0);
        assert_eq!(start.gains, 0.0);

        let mut expected = 10_000.0;
        for _ in 0..12 {
            expected = expected * (1.0 + 0.08 / 12.0) + 1_000.0;
        }
        let end = &snapshots[1];
        assert_eq!(end.year, 1);
        assert_relative_eq!(end.balance, expected);
        assert_relative_eq!(end.total_contributions, 22_000.0);
        assert_relative_eq!(end.gains, expected - 22_000.0);
        // Monthly compounding beats the annual shortcut
        assert!(end.balance > 10_000.0 * 1.08 + 12_000.0);
    }

    #[test]
    fn test_zero_years_single_snapshot() {
        let snapshots = project_retirement(25_000.0, 800.0, 0.05, 0);
        assert_eq!(
            snapshots,
            vec![RetirementSnapshot {
                year: 0,
                balance: 25_000.0,
                total_contributions: 25_000.0,
                gains: 0.0,
            }]
        );
    }

    #[test]
    fn test_zero_rate_accumulates_contributions() {
        let snapshots = project_retirement(1_000.0, 100.0, 0.0, 3);
        let last = snapshots.last().unwrap();
        assert_eq!(last.year, 3);
        assert_relative_eq!(last.balance, 1_000.0 + 3_600.0);
        assert_relative_eq!(last.gains, 0.0);
    }

    #[test]
    fn test_annuity_round_trip() {
        let rate = 0.08 / 12.0;
        let fv = annuity_future_value(500.0, rate, 240);
        assert_relative_eq!(required_monthly_payment(fv, rate, 240), 500.0, epsilon = 1e-9);

        assert_eq!(annuity_future_value(500.0, 0.0, 12), 6_000.0);
        assert_eq!(required_monthly_payment(6_000.0, 0.0, 12), 500.0);
        assert_eq!(required_monthly_payment(6_000.0, rate, 0), 0.0);
    }
}
