//! Children's education cost estimation

mod stages;
mod estimator;
mod milestones;

pub use stages::{stages_for, university_end_age, university_start_age, EducationStage, StageKind, StudyLoan};
pub use estimator::{cost_stage, estimate_child, Child, ChildCostEstimate, StageCost};
pub use milestones::{
    retirement_timeline, upcoming_milestones, ChildMilestone, FamilyEducationPlan, RetirementTimeline,
};
