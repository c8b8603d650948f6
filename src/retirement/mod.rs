//! Retirement savings projection and needs analysis

mod accumulator;
mod planning;

pub use accumulator::{annuity_future_value, project_retirement, required_monthly_payment, RetirementSnapshot};
pub use planning::{
    life_expectancy, CostOfDelay, CpfLifeGap, GrowthPoint, GrowthProjection, GrowthScenario,
    InvestmentScenario, Milestone, RetirementGap, RetirementNeeds,
};
