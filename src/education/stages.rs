//! Education stages and the study loan alternative

use serde::{Deserialize, Serialize};

use crate::assumptions::EducationAssumptions;
use crate::profile::Gender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    /// PSLE to O-Levels tuition and enrichment
    Secondary,
    University,
}

/// A costed period of a child's education, by child age (inclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationStage {
    pub kind: StageKind,
    pub name: String,
    pub start_age: u32,
    pub end_age: u32,
    /// Cost per year in today's dollars
    pub yearly_cost: f64,
    pub description: String,
}

impl EducationStage {
    pub fn has_loan_option(&self) -> bool {
        self.kind == StageKind::University
    }
}

/// University start age; males start after national service
pub fn university_start_age(assumptions: &EducationAssumptions, gender: Gender) -> u32 {
    match gender {
        Gender::Male => assumptions.university_start_age_male,
        Gender::Female => assumptions.university_start_age_female,
    }
}

pub fn university_end_age(assumptions: &EducationAssumptions, gender: Gender) -> u32 {
    university_start_age(assumptions, gender) + assumptions.university_years.max(1) - 1
}

/// Stages costed for a child of the given gender
pub fn stages_for(assumptions: &EducationAssumptions, gender: Gender) -> Vec<EducationStage> {
    let uni_start = university_start_age(assumptions, gender);
    let uni_end = university_end_age(assumptions, gender);
    let after_ns = if gender == Gender::Male { " - After NS" } else { "" };

    vec![
        EducationStage {
            kind: StageKind::Secondary,
            name: format!(
                "PSLE to O-Levels (Ages {}-{})",
                assumptions.secondary_start_age, assumptions.secondary_end_age
            ),
            start_age: assumptions.secondary_start_age,
            end_age: assumptions.secondary_end_age,
            yearly_cost: assumptions.secondary_yearly_cost,
            description: "Tuition (Math, Science, English), enrichment, school fees".to_string(),
        },
        EducationStage {
            kind: StageKind::University,
            name: format!("University (Ages {}-{}){}", uni_start, uni_end, after_ns),
            start_age: uni_start,
            end_age: uni_end,
            yearly_cost: assumptions.university_yearly_cost,
            description: "Tuition fees (subsidized), living allowance, textbooks".to_string(),
        },
    ]
}

/// Level-payment loan covering a stage's cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyLoan {
    pub principal: f64,
    pub monthly_payment: f64,
    pub total_repaid: f64,
    pub interest: f64,
}

impl StudyLoan {
    /// Amortise `principal` over `years` of monthly payments. A zero rate
    /// spreads the principal evenly.
    pub fn amortize(principal: f64, annual_rate: f64, years: u32) -> Self {
        let payments = years.max(1) * 12;
        let n = payments as f64;
        let r = annual_rate / 12.0;

        let monthly_payment = if r == 0.0 {
            principal / n
        } else {
            let growth = (1.0 + r).powi(payments as i32);
            principal * (r * growth) / (growth - 1.0)
        };
        let total_repaid = monthly_payment * n;

        Self {
            principal,
            monthly_payment,
            total_repaid,
            interest: total_repaid - principal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stage_ages_by_gender() {
        let assumptions = EducationAssumptions::default();

        let male = stages_for(&assumptions, Gender::Male);
        assert_eq!((male[0].start_age, male[0].end_age), (12, 16));
        assert_eq!((male[1].start_age, male[1].end_age), (21, 24));
        assert_eq!(male[1].name, "University (Ages 21-24) - After NS");
        assert!(male[1].has_loan_option());
        assert!(!male[0].has_loan_option());

        let female = stages_for(&assumptions, Gender::Female);
        assert_eq!((female[1].start_age, female[1].end_age), (19, 22));
        assert_eq!(female[1].name, "University (Ages 19-22)");
    }

    #[test]
    fn test_loan_amortization() {
        let loan = StudyLoan::amortize(40_000.0, 0.04, 10);

        let r: f64 = 0.04 / 12.0;
        let growth = (1.0 + r).powi(120);
        let expected = 40_000.0 * r * growth / (growth - 1.0);
        assert_relative_eq!(loan.monthly_payment, expected, epsilon = 1e-9);
        // About $405/month
        assert!(loan.monthly_payment > 404.0 && loan.monthly_payment < 406.0);
        assert_relative_eq!(loan.total_repaid, expected * 120.0, epsilon = 1e-6);
        assert_relative_eq!(loan.interest, loan.total_repaid - 40_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_rate_loan() {
        let loan = StudyLoan::amortize(12_000.0, 0.0, 10);
        assert_relative_eq!(loan.monthly_payment, 100.0);
        assert_relative_eq!(loan.interest, 0.0);
    }
}
