//! Retirement needs, CPF LIFE gap, cost of delay and savings growth scenarios

use serde::{Deserialize, Serialize};

use crate::assumptions::RetirementAssumptions;
use crate::profile::Gender;

use super::accumulator::{annuity_future_value, required_monthly_payment};

/// Investment return scenario for the retirement projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentScenario {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl InvestmentScenario {
    pub const ALL: [InvestmentScenario; 3] = [
        InvestmentScenario::Conservative,
        InvestmentScenario::Moderate,
        InvestmentScenario::Aggressive,
    ];

    pub fn annual_return(&self, assumptions: &RetirementAssumptions) -> f64 {
        match self {
            InvestmentScenario::Conservative => assumptions.conservative_return,
            InvestmentScenario::Moderate => assumptions.moderate_return,
            InvestmentScenario::Aggressive => assumptions.aggressive_return,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvestmentScenario::Conservative => "Conservative",
            InvestmentScenario::Moderate => "Moderate",
            InvestmentScenario::Aggressive => "Aggressive",
        }
    }
}

pub fn life_expectancy(assumptions: &RetirementAssumptions, gender: Gender) -> u32 {
    match gender {
        Gender::Male => assumptions.life_expectancy_male,
        Gender::Female => assumptions.life_expectancy_female,
    }
}

/// What retirement will cost and what it takes to fund it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementNeeds {
    pub life_expectancy: u32,
    /// At least one year in the planning view, so inflation always applies
    pub years_to_retirement: u32,
    pub retirement_years: u32,
    pub monthly_expense_today: f64,
    pub monthly_expense_at_retirement: f64,
    pub nest_egg: f64,
    /// Monthly investment at the nest-egg return that reaches the nest egg
    pub required_monthly_investment: f64,
}

impl RetirementNeeds {
    /// Planning view: years to retirement at least 1, retirement years at least
    /// the configured minimum. `custom_expense` replaces the replacement-ratio
    /// estimate when positive.
    pub fn assess(
        assumptions: &RetirementAssumptions,
        age: u32,
        retirement_age: u32,
        gender: Gender,
        current_monthly_expenses: f64,
        custom_expense: Option<f64>,
    ) -> Self {
        let retirement_years = life_expectancy(assumptions, gender)
            .saturating_sub(retirement_age)
            .max(assumptions.min_retirement_years);

        Self::from_years(
            assumptions,
            gender,
            retirement_age.saturating_sub(age).max(1),
            retirement_years,
            current_monthly_expenses,
            custom_expense,
        )
    }

    /// Needs measured against the projected balance: both year counts are only
    /// floored at 0, so retiring past life expectancy needs no nest egg
    pub fn assess_for_gap(
        assumptions: &RetirementAssumptions,
        age: u32,
        retirement_age: u32,
        gender: Gender,
        current_monthly_expenses: f64,
        custom_expense: Option<f64>,
    ) -> Self {
        Self::from_years(
            assumptions,
            gender,
            retirement_age.saturating_sub(age),
            life_expectancy(assumptions, gender).saturating_sub(retirement_age),
            current_monthly_expenses,
            custom_expense,
        )
    }

    fn from_years(
        assumptions: &RetirementAssumptions,
        gender: Gender,
        years_to_retirement: u32,
        retirement_years: u32,
        current_monthly_expenses: f64,
        custom_expense: Option<f64>,
    ) -> Self {
        let monthly_expense_today = match custom_expense {
            Some(expense) if expense > 0.0 => expense,
            _ => current_monthly_expenses * assumptions.expense_replacement_ratio,
        };
        let monthly_expense_at_retirement =
            monthly_expense_today * (1.0 + assumptions.inflation_rate).powi(years_to_retirement as i32);
        let nest_egg = monthly_expense_at_retirement * 12.0 * retirement_years as f64;

        let required_monthly_investment = required_monthly_payment(
            nest_egg,
            assumptions.nest_egg_return / 12.0,
            years_to_retirement * 12,
        );

        Self {
            life_expectancy: life_expectancy(assumptions, gender),
            years_to_retirement,
            retirement_years,
            monthly_expense_today,
            monthly_expense_at_retirement,
            nest_egg,
            required_monthly_investment,
        }
    }
}

/// Shortfall between retirement expenses and the CPF LIFE payout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpfLifeGap {
    pub payout_at_retirement: f64,
    pub monthly_shortfall: f64,
    pub shortfall_pct: f64,
    /// Savings needed on top of CPF LIFE over the whole retirement
    pub supplementary_needed: f64,
}

impl CpfLifeGap {
    pub fn assess(assumptions: &RetirementAssumptions, needs: &RetirementNeeds) -> Self {
        let payout_at_retirement = assumptions.cpf_life_monthly_payout
            * (1.0 + assumptions.cpf_life_escalation).powi(needs.years_to_retirement as i32);
        let expense = needs.monthly_expense_at_retirement;
        let monthly_shortfall = (expense - payout_at_retirement).max(0.0);
        let shortfall_pct = if expense > 0.0 {
            monthly_shortfall / expense * 100.0
        } else {
            0.0
        };

        Self {
            payout_at_retirement,
            monthly_shortfall,
            shortfall_pct,
            supplementary_needed: monthly_shortfall * 12.0 * needs.retirement_years as f64,
        }
    }
}

/// Nest egg against the projected retirement balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementGap {
    pub projected_balance: f64,
    /// Negative when the projection exceeds the nest egg
    pub gap: f64,
    pub additional_monthly: f64,
}

impl RetirementGap {
    pub fn assess(nest_egg: f64, projected_balance: f64, years_to_retirement: u32) -> Self {
        let gap = nest_egg - projected_balance;
        let additional_monthly = if gap > 0.0 && years_to_retirement > 0 {
            gap / (years_to_retirement as f64 * 12.0)
        } else {
            0.0
        };

        Self {
            projected_balance,
            gap,
            additional_monthly,
        }
    }

    pub fn on_track(&self) -> bool {
        self.gap <= 0.0
    }
}

/// What waiting five or ten years costs at the illustration return
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfDelay {
    pub start_now: f64,
    pub start_in_5_years: f64,
    pub start_in_10_years: f64,
    pub lost_by_5_year_delay: f64,
    pub lost_by_10_year_delay: f64,
}

impl CostOfDelay {
    pub fn assess(assumptions: &RetirementAssumptions, monthly_investment: f64, years_to_retirement: u32) -> Self {
        let monthly_rate = assumptions.delay_illustration_return / 12.0;
        let value_after = |years: u32| {
            if monthly_investment > 0.0 && years > 0 {
                annuity_future_value(monthly_investment, monthly_rate, years * 12)
            } else {
                0.0
            }
        };

        let start_now = value_after(years_to_retirement);
        let start_in_5_years = value_after(years_to_retirement.saturating_sub(5));
        let start_in_10_years = value_after(years_to_retirement.saturating_sub(10));

        Self {
            start_now,
            start_in_5_years,
            start_in_10_years,
            lost_by_5_year_delay: start_now - start_in_5_years,
            lost_by_10_year_delay: start_now - start_in_10_years,
        }
    }
}

/// Savings value in each growth scenario at the end of a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub year: u32,
    pub age: u32,
    pub values: Vec<f64>,
}

/// First year a scenario reaches a target value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub target: f64,
    pub year: u32,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthScenario {
    pub rate_pct: f64,
    pub final_value: f64,
    pub milestones: Vec<Milestone>,
}

/// Year-by-year growth of monthly savings under several return rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProjection {
    pub points: Vec<GrowthPoint>,
    pub scenarios: Vec<GrowthScenario>,
}

impl GrowthProjection {
    /// Project `monthly_savings` for up to `years_to_retirement` years, capped
    /// at the configured maximum
    pub fn project(
        assumptions: &RetirementAssumptions,
        age: u32,
        monthly_savings: f64,
        years_to_retirement: u32,
    ) -> Self {
        let max_years = years_to_retirement.min(assumptions.growth_projection_max_years);
        let rates = assumptions.growth_scenario_rates_pct;

        let points: Vec<GrowthPoint> = (0..=max_years)
            .map(|year| GrowthPoint {
                year,
                age: age + year,
                values: rates
                    .iter()
                    .map(|rate_pct| annuity_future_value(monthly_savings, rate_pct / 100.0 / 12.0, year * 12))
                    .collect(),
            })
            .collect();

        let scenarios = rates
            .iter()
            .enumerate()
            .map(|(i, &rate_pct)| {
                let milestones = assumptions
                    .growth_milestones
                    .iter()
                    .filter_map(|&target| {
                        points
                            .iter()
                            .skip(1)
                            .find(|p| p.values[i] >= target)
                            .map(|p| Milestone {
                                target,
                                year: p.year,
                                age: p.age,
                            })
                    })
                    .collect();

                GrowthScenario {
                    rate_pct,
                    final_value: points.last().map(|p| p.values[i]).unwrap_or(0.0),
                    milestones,
                }
            })
            .collect();

        Self { points, scenarios }
    }
}
