//! Monthly CPF contribution for a gross wage

use serde::{Deserialize, Serialize};

use crate::assumptions::CpfAssumptions;

/// Monthly contribution breakdown for one wage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpfContribution {
    pub employee: f64,
    pub employer: f64,
    pub total: f64,
    pub oa: f64,
    pub sa: f64,
    pub ma: f64,
    /// Gross less the employee share; the employer share never reduces pay
    pub take_home: f64,
}

/// Contribution on `monthly_gross` for a member of the given age
pub fn compute_contribution(cpf: &CpfAssumptions, monthly_gross: f64, age: u32) -> CpfContribution {
    let rates = cpf.contribution_rates(age);
    let allocation = cpf.allocation(age);

    let employee = monthly_gross * rates.employee;
    let employer = monthly_gross * rates.employer;
    let total = employee + employer;

    CpfContribution {
        employee,
        employer,
        total,
        oa: total * allocation.oa,
        sa: total * allocation.sa,
        ma: total * allocation.ma,
        take_home: monthly_gross - employee,
    }
}

/// Gross wage that yields `take_home` after the employee contribution
pub fn gross_from_take_home(cpf: &CpfAssumptions, take_home: f64, age: u32) -> f64 {
    let employee_rate = cpf.contribution_rates(age).employee;
    take_home / (1.0 - employee_rate)
}

impl CpfContribution {
    /// Self-employed members receive no employer share; the account split is
    /// rescaled to the remaining (employee-only) total
    pub fn without_employer(self) -> Self {
        let scale = if self.total > 0.0 { self.employee / self.total } else { 0.0 };
        Self {
            employer: 0.0,
            total: self.employee,
            oa: self.oa * scale,
            sa: self.sa * scale,
            ma: self.ma * scale,
            ..self
        }
    }

    /// Per-account amounts credited each month
    pub fn monthly_credit(&self) -> crate::projection::CpfAccountState {
        crate::projection::CpfAccountState {
            oa: self.oa,
            sa: self.sa,
            ma: self.ma,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_income_6000_age_30() {
        let cpf = CpfAssumptions::default();
        let c = compute_contribution(&cpf, 6000.0, 30);

        assert_abs_diff_eq!(c.employee, 1200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.employer, 1020.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.total, 2220.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.take_home, 4800.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.oa + c.sa + c.ma, c.total, epsilon = 1e-9);
        assert_abs_diff_eq!(c.oa, 2220.0 * 0.6216, epsilon = 1e-6);
    }

    #[test]
    fn test_take_home_identity() {
        let cpf = CpfAssumptions::default();

        for (gross, age) in [(3_250.0, 25), (8_000.0, 58), (12_345.67, 63), (2_000.0, 75)] {
            let c = compute_contribution(&cpf, gross, age);
            assert_abs_diff_eq!(c.take_home + c.employee, gross, epsilon = 1e-9);
            assert!(c.take_home + c.employee < gross + c.employer || c.employer == 0.0);
        }
    }

    #[test]
    fn test_older_member_rates() {
        let cpf = CpfAssumptions::default();
        let c = compute_contribution(&cpf, 4000.0, 62);

        assert_abs_diff_eq!(c.employee, 460.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.employer, 480.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.take_home, 3540.0, epsilon = 1e-9);
    }

    #[test]
    fn test_self_employed_has_no_employer_share() {
        let cpf = CpfAssumptions::default();
        let c = compute_contribution(&cpf, 6000.0, 30).without_employer();

        assert_eq!(c.employer, 0.0);
        assert_abs_diff_eq!(c.total, 1200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.oa + c.sa + c.ma, 1200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.take_home, 4800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_gross_from_take_home() {
        let cpf = CpfAssumptions::default();
        let gross = gross_from_take_home(&cpf, 4800.0, 30);

        assert_abs_diff_eq!(gross, 6000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(compute_contribution(&cpf, gross, 30).take_home, 4800.0, epsilon = 1e-9);
    }
}
