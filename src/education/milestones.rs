//! Upcoming education milestones and the parent's retirement timeline

use serde::{Deserialize, Serialize};

use crate::assumptions::EducationAssumptions;
use crate::input::ReferenceMonth;
use crate::profile::Gender;

use super::estimator::{estimate_child, Child, ChildCostEstimate};
use super::stages::{university_end_age, university_start_age};

/// Age at which males enlist for national service
const NATIONAL_SERVICE_AGE: u32 = 18;
const PSLE_AGE: u32 = 12;
const O_LEVELS_AGE: u32 = 16;

/// A future event in a child's education
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildMilestone {
    pub child_name: String,
    pub milestone: String,
    pub description: String,
    pub child_age_at_milestone: u32,
    pub years_from_now: u32,
    pub year: i32,
    pub parent_age_at_milestone: u32,
}

fn milestone_schedule(assumptions: &EducationAssumptions, gender: Gender) -> Vec<(&'static str, u32, &'static str)> {
    let mut schedule = vec![
        ("PSLE", PSLE_AGE, "Primary School Leaving Exam"),
        ("O-Levels", O_LEVELS_AGE, "GCE O-Level Examinations"),
    ];
    if gender == Gender::Male {
        schedule.push(("NS/Army", NATIONAL_SERVICE_AGE, "National Service (2 years)"));
    }
    schedule.push((
        "University Start",
        university_start_age(assumptions, gender),
        if gender == Gender::Male { "After NS completion" } else { "Direct entry" },
    ));
    schedule.push(("University End", university_end_age(assumptions, gender), "Graduation"));
    schedule
}

/// Milestones still ahead for every child with a birth date, soonest first
pub fn upcoming_milestones(
    assumptions: &EducationAssumptions,
    children: &[Child],
    parent_age: u32,
    reference: ReferenceMonth,
) -> Vec<ChildMilestone> {
    let mut milestones: Vec<ChildMilestone> = children
        .iter()
        .filter_map(|child| child.age(reference).map(|age| (child, age)))
        .flat_map(|(child, current_age)| {
            milestone_schedule(assumptions, child.gender)
                .into_iter()
                .filter(move |(_, at_age, _)| current_age < *at_age)
                .map(move |(name, at_age, description)| {
                    let years_from_now = at_age - current_age;
                    ChildMilestone {
                        child_name: child.display_name().to_string(),
                        milestone: name.to_string(),
                        description: description.to_string(),
                        child_age_at_milestone: at_age,
                        years_from_now,
                        year: reference.year + years_from_now as i32,
                        parent_age_at_milestone: parent_age + years_from_now,
                    }
                })
        })
        .collect();

    milestones.sort_by_key(|m| m.years_from_now);
    milestones
}

/// When the last child finishes university
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementTimeline {
    pub child_name: String,
    pub graduation_year: i32,
    /// Parent's age in the graduation year
    pub parent_age: u32,
}

/// Year the last child with university still ahead graduates. `None` when
/// the parent's age is unknown or no child has university ahead.
pub fn retirement_timeline(
    assumptions: &EducationAssumptions,
    estimates: &[(Child, ChildCostEstimate)],
    parent_age: u32,
    reference: ReferenceMonth,
) -> Option<RetirementTimeline> {
    if parent_age == 0 {
        return None;
    }

    estimates
        .iter()
        .filter(|(_, estimate)| estimate.university().is_some())
        .map(|(child, estimate)| {
            let years_left = university_end_age(assumptions, child.gender) - estimate.current_age;
            (child, years_left)
        })
        .max_by_key(|(_, years_left)| *years_left)
        .map(|(child, years_left)| RetirementTimeline {
            child_name: child.display_name().to_string(),
            graduation_year: reference.year + years_left as i32,
            parent_age: parent_age + years_left,
        })
}

/// Education costs across all children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyEducationPlan {
    pub children: Vec<ChildCostEstimate>,
    pub grand_total: f64,
    pub grand_total_with_loan: f64,
    pub milestones: Vec<ChildMilestone>,
    pub timeline: Option<RetirementTimeline>,
}

impl FamilyEducationPlan {
    /// Estimate every child with a birth date; children without one are skipped
    pub fn estimate(
        assumptions: &EducationAssumptions,
        children: &[Child],
        parent_age: u32,
        reference: ReferenceMonth,
    ) -> Self {
        let estimates: Vec<(Child, ChildCostEstimate)> = children
            .iter()
            .filter_map(|child| estimate_child(assumptions, child, reference).map(|e| (child.clone(), e)))
            .collect();

        let skipped = children.len() - estimates.len();
        if skipped > 0 {
            log::warn!("{} child record(s) without a birth date left out of education costs", skipped);
        }

        let timeline = retirement_timeline(assumptions, &estimates, parent_age, reference);
        let children_estimates: Vec<ChildCostEstimate> = estimates.into_iter().map(|(_, e)| e).collect();

        Self {
            grand_total: children_estimates.iter().map(|e| e.total_cost).sum(),
            grand_total_with_loan: children_estimates.iter().map(|e| e.total_cost_with_loan).sum(),
            milestones: upcoming_milestones(assumptions, children, parent_age, reference),
            timeline,
            children: children_estimates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reference() -> ReferenceMonth {
        ReferenceMonth::new(2025, 5)
    }

    fn child(name: &str, age: i32, gender: Gender) -> Child {
        Child::new(name, NaiveDate::from_ymd_opt(2025 - age, 2, 1), gender)
    }

    #[test]
    fn test_milestones_future_only_and_sorted() {
        let assumptions = EducationAssumptions::default();
        let children = vec![child("Ben", 15, Gender::Male), child("Ada", 10, Gender::Female)];

        let milestones = upcoming_milestones(&assumptions, &children, 45, reference());

        // Ben: O-Levels 16, NS 18, Uni 21, Grad 24. Ada: PSLE 12, O-Levels 16, Uni 19, Grad 22.
        assert_eq!(milestones.len(), 8);
        assert!(milestones.windows(2).all(|w| w[0].years_from_now <= w[1].years_from_now));

        let first = &milestones[0];
        assert_eq!((first.child_name.as_str(), first.milestone.as_str()), ("Ben", "O-Levels"));
        assert_eq!(first.year, 2026);
        assert_eq!(first.parent_age_at_milestone, 46);

        assert!(milestones.iter().all(|m| !(m.child_name == "Ada" && m.milestone == "NS/Army")));
        assert!(milestones.iter().all(|m| !(m.child_name == "Ben" && m.milestone == "PSLE")));
    }

    #[test]
    fn test_retirement_timeline_uses_last_graduate() {
        let assumptions = EducationAssumptions::default();
        let children = vec![child("Ben", 15, Gender::Male), child("Ada", 10, Gender::Female)];

        let plan = FamilyEducationPlan::estimate(&assumptions, &children, 45, reference());
        let timeline = plan.timeline.unwrap();

        // Ben graduates at 24 in 9 years; Ada at 22 in 12 years
        assert_eq!(timeline.child_name, "Ada");
        assert_eq!(timeline.graduation_year, 2037);
        assert_eq!(timeline.parent_age, 57);
    }

    #[test]
    fn test_family_totals_skip_children_without_birth_date() {
        let assumptions = EducationAssumptions::default();
        let children = vec![
            child("Ben", 15, Gender::Male),
            Child::new("Unknown", None, Gender::Female),
        ];

        let plan = FamilyEducationPlan::estimate(&assumptions, &children, 45, reference());
        assert_eq!(plan.children.len(), 1);
        assert_eq!(plan.grand_total, plan.children[0].total_cost);
        assert!(plan.grand_total_with_loan >= plan.grand_total);

        assert!(FamilyEducationPlan::estimate(&assumptions, &children, 0, reference()).timeline.is_none());
    }
}
