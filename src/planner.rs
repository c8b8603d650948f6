//! Planner for full financial plans and batch runs
//!
//! Holds the assumptions once, then builds a plan per client: CPF contribution,
//! budget, savings and CPF projections, retirement, education and ILP.

use std::path::Path;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::cpf::{compute_contribution, CpfContribution};
use crate::education::{Child, FamilyEducationPlan};
use crate::error::Result;
use crate::ilp::{project_ilp, IlpConfig, IlpProjection};
use crate::input::{age_in_years, ReferenceMonth};
use crate::profile::{ClientRecord, EmploymentStatus, Gender};
use crate::projection::{
    CashflowConfig, CashflowProjection, CashflowSimulator, CpfAccountState, CpfBalanceConfig,
    CpfBalanceProjection, CpfBalanceProjector, CpfWithdrawal, MonthlyBudget, ProjectionAnchor,
    ScheduledCashEvent,
};
use crate::retirement::{
    project_retirement, CostOfDelay, CpfLifeGap, GrowthProjection, InvestmentScenario, RetirementGap,
    RetirementNeeds, RetirementSnapshot,
};

/// Parsed, typed inputs for one plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanInputs {
    pub name: String,
    pub reference: ReferenceMonth,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub employment: EmploymentStatus,

    pub monthly_gross: f64,
    /// Explicit take-home; 0 means derive it from the CPF contribution
    pub take_home: f64,
    pub total_expenses: f64,

    pub retirement_age: u32,
    /// 0 means use the replacement ratio
    pub custom_retirement_expense: f64,
    pub retirement_initial_savings: f64,
    pub scenario: InvestmentScenario,
    pub investment_percent: f64,

    pub opening_savings: f64,
    pub bank_interest_rate_pct: f64,
    pub project_to_age: u32,
    pub additional_incomes: Vec<ScheduledCashEvent>,
    pub withdrawals: Vec<ScheduledCashEvent>,

    pub cpf_balances: CpfAccountState,
    pub cpf_withdrawals: Vec<CpfWithdrawal>,

    pub children: Vec<Child>,
    pub ilp: Option<IlpConfig>,
}

impl PlanInputs {
    /// Coerce a saved client record; `today` is used when the record has no
    /// reference month of its own
    pub fn from_record(record: &ClientRecord, today: ReferenceMonth) -> Self {
        let profile = &record.profile;
        let to_whole = |value: f64| value.max(0.0) as u32;

        let ilp = record.ilp.as_ref().map(|settings| IlpConfig {
            annual_premium: settings.annual_premium.to_number(0.0),
            projection_years: settings.projection_years(),
            growth_rate: settings.growth_rate(),
        });

        Self {
            name: profile.name.clone(),
            reference: profile.reference(today),
            date_of_birth: profile.date_of_birth(),
            gender: profile.gender,
            employment: profile.employment_status,
            monthly_gross: profile.monthly_gross(),
            take_home: profile.take_home.to_number(0.0),
            total_expenses: record.total_expenses(),
            retirement_age: to_whole(profile.retirement_age.to_number(65.0)),
            custom_retirement_expense: profile.custom_retirement_expense.to_number(0.0),
            retirement_initial_savings: record.retirement.initial_savings.to_number(0.0),
            scenario: record.retirement.scenario,
            investment_percent: record.retirement.investment_percent.to_number(100.0),
            opening_savings: record.cashflow.current_savings.to_number(0.0),
            bank_interest_rate_pct: record.cashflow.bank_interest_rate.to_number(0.0),
            project_to_age: match to_whole(record.cashflow.project_to_age.to_number(100.0)) {
                0 => 100,
                age => age,
            },
            additional_incomes: record.cashflow.additional_incomes.clone(),
            withdrawals: record.cashflow.withdrawals.clone(),
            cpf_balances: record.cpf.current_balances.to_state(),
            cpf_withdrawals: record.cpf.withdrawals.clone(),
            children: record.children(),
            ilp,
        }
    }

    /// Whole years at the reference month; 0 without a birth date
    pub fn age(&self) -> u32 {
        age_in_years(self.date_of_birth, self.reference)
    }
}

/// Retirement section of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementPlan {
    pub scenario: InvestmentScenario,
    pub annual_return: f64,
    pub monthly_investment: f64,
    /// Years until the retirement age, not clamped
    pub years: u32,
    /// `None` when already at or past the retirement age
    pub projection: Option<Vec<RetirementSnapshot>>,
    /// Planning view, floored year counts
    pub needs: RetirementNeeds,
    /// Needs the projected balance is measured against
    pub gap_needs: RetirementNeeds,
    pub cpf_life_gap: CpfLifeGap,
    pub gap: RetirementGap,
    pub cost_of_delay: CostOfDelay,
    pub growth: GrowthProjection,
}

impl RetirementPlan {
    pub fn projected_balance(&self) -> f64 {
        self.projection
            .as_ref()
            .and_then(|p| p.last())
            .map(|s| s.balance)
            .unwrap_or(0.0)
    }
}

/// Everything computed for one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPlan {
    pub name: String,
    pub age: u32,
    pub reference: ReferenceMonth,
    /// `None` without an income or a birth date
    pub cpf: Option<CpfContribution>,
    /// `None` without a CPF contribution or an explicit take-home
    pub budget: Option<MonthlyBudget>,
    pub cashflow: Option<CashflowProjection>,
    pub cpf_balances: Option<CpfBalanceProjection>,
    pub retirement: Option<RetirementPlan>,
    pub education: FamilyEducationPlan,
    pub ilp: Option<IlpProjection>,
}

/// One CSV line per plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub name: String,
    pub age: u32,
    pub gross: f64,
    pub take_home: f64,
    pub total_expenses: f64,
    pub monthly_savings: f64,
    pub savings_rate_pct: f64,
    pub cpf_monthly_total: f64,
    pub final_savings_balance: f64,
    pub final_cpf_total: f64,
    pub retirement_balance: f64,
    pub nest_egg: f64,
    pub retirement_gap: f64,
    pub education_total: f64,
    pub ilp_final_value: f64,
}

impl FinancialPlan {
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            name: self.name.clone(),
            age: self.age,
            gross: self.cpf.map(|c| c.employee + c.take_home).unwrap_or(0.0),
            take_home: self.budget.map(|b| b.take_home).unwrap_or(0.0),
            total_expenses: self.budget.map(|b| b.total_expenses).unwrap_or(0.0),
            monthly_savings: self.budget.map(|b| b.monthly_savings).unwrap_or(0.0),
            savings_rate_pct: self.budget.map(|b| b.savings_rate_pct).unwrap_or(0.0),
            cpf_monthly_total: self.cpf.map(|c| c.total).unwrap_or(0.0),
            final_savings_balance: self.cashflow.as_ref().map(|c| c.final_balance()).unwrap_or(0.0),
            final_cpf_total: self
                .cpf_balances
                .as_ref()
                .map(|p| p.final_balances().total())
                .unwrap_or(0.0),
            retirement_balance: self.retirement.as_ref().map(|r| r.projected_balance()).unwrap_or(0.0),
            nest_egg: self.retirement.as_ref().map(|r| r.gap_needs.nest_egg).unwrap_or(0.0),
            retirement_gap: self.retirement.as_ref().map(|r| r.gap.gap).unwrap_or(0.0),
            education_total: self.education.grand_total,
            ilp_final_value: self
                .ilp
                .as_ref()
                .and_then(|p| p.final_row())
                .map(|r| r.portfolio_value)
                .unwrap_or(0.0),
        }
    }
}

/// Pre-loaded planner for single and batch plans
#[derive(Debug, Clone)]
pub struct Planner {
    assumptions: Assumptions,
}

impl Planner {
    /// Create planner with default in-memory assumptions
    pub fn new() -> Self {
        Self {
            assumptions: Assumptions::default_planning(),
        }
    }

    /// Create planner by loading CPF tables from CSV files
    pub fn from_csv() -> Result<Self> {
        Ok(Self {
            assumptions: Assumptions::from_csv()?,
        })
    }

    /// Create planner from a specific assumptions directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self {
            assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// CPF contribution for the inputs; `None` without an income or an age
    pub fn contribution(&self, inputs: &PlanInputs, age: u32) -> Option<CpfContribution> {
        if inputs.monthly_gross == 0.0 || age == 0 {
            return None;
        }

        let contribution = compute_contribution(&self.assumptions.cpf, inputs.monthly_gross, age);
        Some(match inputs.employment {
            EmploymentStatus::Employed => contribution,
            EmploymentStatus::SelfEmployed => contribution.without_employer(),
        })
    }

    /// Build the full plan for one client
    pub fn plan(&self, inputs: &PlanInputs) -> FinancialPlan {
        let age = inputs.age();
        if inputs.date_of_birth.is_none() {
            log::warn!("{}: no valid birth date, planning with age 0", display_name(inputs));
        }

        let cpf = self.contribution(inputs, age);
        let budget = budget(inputs, cpf.as_ref());
        let anchor = ProjectionAnchor::new(age, inputs.reference);

        let cashflow = budget.map(|b| {
            let mut config = CashflowConfig::new(anchor, b.monthly_savings);
            config.target_age = inputs.project_to_age;
            config.opening_balance = inputs.opening_savings;
            config.annual_interest_rate_pct = inputs.bank_interest_rate_pct;
            config.income_events = inputs.additional_incomes.clone();
            config.withdrawal_events = inputs.withdrawals.clone();
            CashflowSimulator::new(config).project()
        });

        let cpf_balances = cpf.as_ref().map(|contribution| {
            let mut config = CpfBalanceConfig::new(anchor, contribution);
            config.opening = inputs.cpf_balances;
            config.withdrawals = inputs.cpf_withdrawals.clone();
            config.interest = self.assumptions.cpf.interest;
            CpfBalanceProjector::new(config).project()
        });

        let retirement = budget.map(|b| self.retirement_plan(inputs, age, &b));

        let education = FamilyEducationPlan::estimate(
            &self.assumptions.education,
            &inputs.children,
            age,
            inputs.reference,
        );

        let ilp = inputs
            .ilp
            .as_ref()
            .and_then(|config| project_ilp(&self.assumptions.ilp, config));

        FinancialPlan {
            name: inputs.name.clone(),
            age,
            reference: inputs.reference,
            cpf,
            budget,
            cashflow,
            cpf_balances,
            retirement,
            education,
            ilp,
        }
    }

    /// Parse a saved client record and plan it
    pub fn plan_record(&self, record: &ClientRecord, today: ReferenceMonth) -> FinancialPlan {
        self.plan(&PlanInputs::from_record(record, today))
    }

    /// Plan many clients in parallel
    pub fn plan_batch(&self, inputs: &[PlanInputs]) -> Vec<FinancialPlan> {
        inputs.par_iter().map(|i| self.plan(i)).collect()
    }

    fn retirement_plan(&self, inputs: &PlanInputs, age: u32, budget: &MonthlyBudget) -> RetirementPlan {
        let assumptions = &self.assumptions.retirement;
        let annual_return = inputs.scenario.annual_return(assumptions);
        let monthly_investment = budget.monthly_savings * inputs.investment_percent / 100.0;
        let years = inputs.retirement_age.saturating_sub(age);

        let projection = (years > 0).then(|| {
            project_retirement(inputs.retirement_initial_savings, monthly_investment, annual_return, years)
        });
        let projected_balance = projection
            .as_ref()
            .and_then(|p| p.last())
            .map(|s| s.balance)
            .unwrap_or(0.0);

        let needs = RetirementNeeds::assess(
            assumptions,
            age,
            inputs.retirement_age,
            inputs.gender,
            budget.total_expenses,
            Some(inputs.custom_retirement_expense),
        );
        let gap_needs = RetirementNeeds::assess_for_gap(
            assumptions,
            age,
            inputs.retirement_age,
            inputs.gender,
            budget.total_expenses,
            Some(inputs.custom_retirement_expense),
        );

        RetirementPlan {
            scenario: inputs.scenario,
            annual_return,
            monthly_investment,
            years,
            projection,
            cpf_life_gap: CpfLifeGap::assess(assumptions, &needs),
            gap: RetirementGap::assess(gap_needs.nest_egg, projected_balance, years),
            cost_of_delay: CostOfDelay::assess(assumptions, budget.monthly_savings, needs.years_to_retirement),
            growth: GrowthProjection::project(assumptions, age, budget.monthly_savings, needs.years_to_retirement),
            needs,
            gap_needs,
        }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

/// Take-home is the explicit figure when non-zero, else the CPF take-home
fn budget(inputs: &PlanInputs, cpf: Option<&CpfContribution>) -> Option<MonthlyBudget> {
    let take_home = if inputs.take_home != 0.0 {
        inputs.take_home
    } else {
        cpf?.take_home
    };
    Some(MonthlyBudget::from_take_home(take_home, inputs.total_expenses))
}

fn display_name(inputs: &PlanInputs) -> &str {
    if inputs.name.is_empty() {
        "unnamed client"
    } else {
        &inputs.name
    }
}
