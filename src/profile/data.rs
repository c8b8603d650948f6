//! Client record structures matching the saved client JSON format

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::education::Child;
use crate::input::{field_number, parse_date, FieldValue, ReferenceMonth};
use crate::projection::{CpfAccountState, CpfWithdrawal, ScheduledCashEvent};
use crate::retirement::InvestmentScenario;

fn default_retirement_age() -> FieldValue {
    FieldValue::from("65")
}

fn default_investment_percent() -> FieldValue {
    FieldValue::from("100")
}

fn default_bank_interest_rate() -> FieldValue {
    FieldValue::from("0.05")
}

fn default_project_to_age() -> FieldValue {
    FieldValue::from("100")
}

/// Gender of a client or child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    #[default]
    Employed,
    /// No employer CPF share
    SelfEmployed,
}

/// A child as entered on the profile form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "dobISO")]
    pub dob_iso: String,
    #[serde(default)]
    pub gender: Gender,
}

impl ChildRecord {
    pub fn to_child(&self) -> Child {
        Child::new(&self.name, parse_date(&self.dob_iso), self.gender)
    }
}

/// Personal details and income as typed into the profile form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub employment_status: EmploymentStatus,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub monthly_income: FieldValue,
    #[serde(default)]
    pub gross_salary: FieldValue,
    #[serde(default)]
    pub take_home: FieldValue,
    #[serde(default = "default_retirement_age")]
    pub retirement_age: FieldValue,
    #[serde(default)]
    pub custom_retirement_expense: FieldValue,
    /// Month the plan is computed for; today when absent
    #[serde(default)]
    pub reference_year: Option<i32>,
    /// 0-based month
    #[serde(default)]
    pub reference_month: Option<u32>,
    #[serde(default)]
    pub children: Vec<ChildRecord>,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            dob: String::new(),
            gender: Gender::Male,
            employment_status: EmploymentStatus::Employed,
            email: String::new(),
            phone: String::new(),
            monthly_income: FieldValue::default(),
            gross_salary: FieldValue::default(),
            take_home: FieldValue::default(),
            retirement_age: default_retirement_age(),
            custom_retirement_expense: FieldValue::default(),
            reference_year: None,
            reference_month: None,
            children: Vec::new(),
        }
    }
}

impl ProfileForm {
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        parse_date(&self.dob)
    }

    /// Gross salary, or the monthly income field when gross is left empty
    pub fn monthly_gross(&self) -> f64 {
        let field = if self.gross_salary.is_blank() {
            &self.monthly_income
        } else {
            &self.gross_salary
        };
        field.to_number(0.0)
    }

    pub fn reference(&self, today: ReferenceMonth) -> ReferenceMonth {
        match (self.reference_year, self.reference_month) {
            (Some(year), Some(month0)) => ReferenceMonth::new(year, month0),
            (Some(year), None) => ReferenceMonth::new(year, today.month0),
            _ => today,
        }
    }
}

/// The six fixed monthly expense categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseForm {
    #[serde(default)]
    pub housing: FieldValue,
    #[serde(default)]
    pub food: FieldValue,
    #[serde(default)]
    pub transport: FieldValue,
    #[serde(default)]
    pub insurance: FieldValue,
    #[serde(default)]
    pub entertainment: FieldValue,
    #[serde(default)]
    pub others: FieldValue,
}

impl ExpenseForm {
    pub fn total(&self) -> f64 {
        [
            &self.housing,
            &self.food,
            &self.transport,
            &self.insurance,
            &self.entertainment,
            &self.others,
        ]
        .iter()
        .map(|f| f.to_number(0.0))
        .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomExpense {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: FieldValue,
}

/// Retirement tab settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementSettings {
    #[serde(default)]
    pub initial_savings: FieldValue,
    #[serde(default)]
    pub scenario: InvestmentScenario,
    /// Share of monthly savings invested for retirement, in percent
    #[serde(default = "default_investment_percent")]
    pub investment_percent: FieldValue,
}

impl Default for RetirementSettings {
    fn default() -> Self {
        Self {
            initial_savings: FieldValue::default(),
            scenario: InvestmentScenario::default(),
            investment_percent: default_investment_percent(),
        }
    }
}

/// Savings projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowSettings {
    #[serde(default)]
    pub current_savings: FieldValue,
    /// Bank interest in percent per year
    #[serde(default = "default_bank_interest_rate")]
    pub bank_interest_rate: FieldValue,
    #[serde(default = "default_project_to_age")]
    pub project_to_age: FieldValue,
    #[serde(default)]
    pub additional_incomes: Vec<ScheduledCashEvent>,
    #[serde(default)]
    pub withdrawals: Vec<ScheduledCashEvent>,
}

impl Default for CashflowSettings {
    fn default() -> Self {
        Self {
            current_savings: FieldValue::default(),
            bank_interest_rate: default_bank_interest_rate(),
            project_to_age: default_project_to_age(),
            additional_incomes: Vec::new(),
            withdrawals: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpfBalancesForm {
    #[serde(default)]
    pub oa: FieldValue,
    #[serde(default)]
    pub sa: FieldValue,
    #[serde(default)]
    pub ma: FieldValue,
}

impl CpfBalancesForm {
    pub fn to_state(&self) -> CpfAccountState {
        CpfAccountState::new(self.oa.to_number(0.0), self.sa.to_number(0.0), self.ma.to_number(0.0))
    }
}

/// CPF tab settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpfSettings {
    #[serde(default)]
    pub current_balances: CpfBalancesForm,
    #[serde(default)]
    pub withdrawals: Vec<CpfWithdrawal>,
}

/// ILP illustration settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IlpSettings {
    #[serde(default)]
    pub annual_premium: FieldValue,
    #[serde(default)]
    pub projection_years: Option<FieldValue>,
    /// Unit growth in percent per year
    #[serde(default)]
    pub growth_rate: Option<FieldValue>,
}

impl IlpSettings {
    pub fn projection_years(&self) -> u32 {
        field_number(self.projection_years.as_ref(), 20.0).max(0.0) as u32
    }

    pub fn growth_rate(&self) -> f64 {
        field_number(self.growth_rate.as_ref(), 5.0) / 100.0
    }
}

/// A saved client: everything needed to rebuild a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub profile: ProfileForm,
    #[serde(default)]
    pub expenses: ExpenseForm,
    #[serde(default)]
    pub custom_expenses: Vec<CustomExpense>,
    #[serde(default)]
    pub retirement: RetirementSettings,
    #[serde(default)]
    pub cashflow: CashflowSettings,
    #[serde(default)]
    pub cpf: CpfSettings,
    #[serde(default)]
    pub ilp: Option<IlpSettings>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl ClientRecord {
    /// Fixed categories plus custom expenses
    pub fn total_expenses(&self) -> f64 {
        self.expenses.total()
            + self
                .custom_expenses
                .iter()
                .map(|e| e.amount.to_number(0.0))
                .sum::<f64>()
    }

    pub fn children(&self) -> Vec<Child> {
        self.profile.children.iter().map(ChildRecord::to_child).collect()
    }
}
