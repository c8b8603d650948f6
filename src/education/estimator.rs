//! Inflation-adjusted education cost per child

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assumptions::EducationAssumptions;
use crate::input::{age_in_years, ReferenceMonth};
use crate::profile::Gender;

use super::stages::{stages_for, EducationStage, StudyLoan};

/// A child in the client's household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
}

impl Child {
    pub fn new(name: &str, date_of_birth: Option<NaiveDate>, gender: Gender) -> Self {
        Self {
            name: name.to_string(),
            date_of_birth,
            gender,
        }
    }

    /// Whole years at the reference month; `None` without a birth date
    pub fn age(&self, reference: ReferenceMonth) -> Option<u32> {
        self.date_of_birth.map(|dob| age_in_years(Some(dob), reference))
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unnamed Child"
        } else {
            &self.name
        }
    }
}

/// Cost of one stage that is still ahead of, or under way for, the child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCost {
    pub stage: EducationStage,
    pub years_until_start: u32,
    /// Remaining years of the stage
    pub duration: u32,
    pub cost: f64,
    pub inflated_first_year_cost: f64,
    pub loan: Option<StudyLoan>,
}

impl StageCost {
    /// Stage cost if the loan is taken where one is offered
    pub fn cost_with_loan(&self) -> f64 {
        self.loan.map(|l| l.total_repaid).unwrap_or(self.cost)
    }
}

/// Education cost estimate for one child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildCostEstimate {
    pub child_name: String,
    pub current_age: u32,
    pub total_cost: f64,
    pub total_cost_with_loan: f64,
    pub breakdown: Vec<StageCost>,
}

impl ChildCostEstimate {
    pub fn university(&self) -> Option<&StageCost> {
        self.breakdown.iter().find(|s| s.stage.has_loan_option())
    }
}

/// Cost one stage for a child of age `current_age`; `None` once the stage is over
pub fn cost_stage(
    assumptions: &EducationAssumptions,
    stage: &EducationStage,
    current_age: u32,
) -> Option<StageCost> {
    if current_age > stage.end_age {
        return None;
    }

    let years_until_start = stage.start_age.saturating_sub(current_age);
    let duration = stage.end_age - stage.start_age.max(current_age) + 1;
    let growth = 1.0 + assumptions.inflation_rate;

    let cost: f64 = (0..duration)
        .map(|year| stage.yearly_cost * growth.powi((years_until_start + year) as i32))
        .sum();

    let loan = stage
        .has_loan_option()
        .then(|| StudyLoan::amortize(cost, assumptions.loan_annual_rate, assumptions.loan_years));

    Some(StageCost {
        stage: stage.clone(),
        years_until_start,
        duration,
        cost,
        inflated_first_year_cost: stage.yearly_cost * growth.powi(years_until_start as i32),
        loan,
    })
}

/// Estimate a child's remaining education cost. `None` without a birth date.
pub fn estimate_child(
    assumptions: &EducationAssumptions,
    child: &Child,
    reference: ReferenceMonth,
) -> Option<ChildCostEstimate> {
    let current_age = child.age(reference)?;

    let breakdown: Vec<StageCost> = stages_for(assumptions, child.gender)
        .iter()
        .filter_map(|stage| cost_stage(assumptions, stage, current_age))
        .collect();

    Some(ChildCostEstimate {
        child_name: child.display_name().to_string(),
        current_age,
        total_cost: breakdown.iter().map(|s| s.cost).sum(),
        total_cost_with_loan: breakdown.iter().map(StageCost::cost_with_loan).sum(),
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> ReferenceMonth {
        ReferenceMonth::new(2025, 5)
    }

    fn child_aged(age: i32, gender: Gender) -> Child {
        let dob = NaiveDate::from_ymd_opt(2025 - age, 1, 15).unwrap();
        Child::new("Kai", Some(dob), gender)
    }

    #[test]
    fn test_young_child_has_both_stages() {
        let assumptions = EducationAssumptions::default();
        let estimate = estimate_child(&assumptions, &child_aged(5, Gender::Female), reference()).unwrap();

        assert_eq!(estimate.current_age, 5);
        assert_eq!(estimate.breakdown.len(), 2);

        let secondary = &estimate.breakdown[0];
        assert_eq!(secondary.years_until_start, 7);
        assert_eq!(secondary.duration, 5);
        let expected: f64 = (7..12).map(|y| 9_600.0 * 1.03_f64.powi(y)).sum();
        assert_relative_eq!(secondary.cost, expected, epsilon = 1e-6);
        assert_relative_eq!(secondary.inflated_first_year_cost, 9_600.0 * 1.03_f64.powi(7), epsilon = 1e-9);
        assert!(secondary.loan.is_none());

        let university = estimate.university().unwrap();
        assert_eq!(university.years_until_start, 14);
        assert_eq!(university.duration, 4);
        assert!(university.loan.is_some());

        assert_relative_eq!(estimate.total_cost, secondary.cost + university.cost, epsilon = 1e-6);
        assert!(estimate.total_cost_with_loan > estimate.total_cost);
    }

    #[test]
    fn test_stage_under_way_is_partial() {
        let assumptions = EducationAssumptions::default();
        let estimate = estimate_child(&assumptions, &child_aged(14, Gender::Male), reference()).unwrap();

        let secondary = &estimate.breakdown[0];
        assert_eq!(secondary.years_until_start, 0);
        // Ages 14, 15, 16
        assert_eq!(secondary.duration, 3);
        assert_relative_eq!(secondary.cost, 9_600.0 * (1.0 + 1.03 + 1.03 * 1.03), epsilon = 1e-6);
    }

    #[test]
    fn test_finished_stages_are_skipped() {
        let assumptions = EducationAssumptions::default();

        // 17-year-old girl: secondary over, university ahead
        let estimate = estimate_child(&assumptions, &child_aged(17, Gender::Female), reference()).unwrap();
        assert_eq!(estimate.breakdown.len(), 1);
        assert!(estimate.university().is_some());

        // 23-year-old woman: everything done
        let estimate = estimate_child(&assumptions, &child_aged(23, Gender::Female), reference()).unwrap();
        assert!(estimate.breakdown.is_empty());
        assert_eq!(estimate.total_cost, 0.0);

        // 23-year-old man is still in university
        let estimate = estimate_child(&assumptions, &child_aged(23, Gender::Male), reference()).unwrap();
        assert_eq!(estimate.breakdown[0].duration, 2);
    }

    #[test]
    fn test_missing_birth_date() {
        let assumptions = EducationAssumptions::default();
        let child = Child::new("", None, Gender::Male);

        assert!(estimate_child(&assumptions, &child, reference()).is_none());
        assert_eq!(child.display_name(), "Unnamed Child");
    }
}
