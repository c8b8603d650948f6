//! Planning constants for education costs and retirement needs

use serde::{Deserialize, Serialize};

/// Education cost assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationAssumptions {
    /// Annual education cost inflation
    pub inflation_rate: f64,

    /// PSLE to O-Levels tuition and enrichment band
    pub secondary_start_age: u32,
    pub secondary_end_age: u32,
    pub secondary_yearly_cost: f64,

    /// University start age; males start after national service
    pub university_start_age_male: u32,
    pub university_start_age_female: u32,
    pub university_years: u32,
    pub university_yearly_cost: f64,

    /// Study loan terms for the university stage
    pub loan_annual_rate: f64,
    pub loan_years: u32,
}

impl Default for EducationAssumptions {
    fn default() -> Self {
        Self {
            inflation_rate: 0.03,
            secondary_start_age: 12,
            secondary_end_age: 16,
            secondary_yearly_cost: 9_600.0, // $800/month
            university_start_age_male: 21,
            university_start_age_female: 19,
            university_years: 4,
            university_yearly_cost: 8_750.0,
            loan_annual_rate: 0.04,
            loan_years: 10,
        }
    }
}

/// Retirement planning assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementAssumptions {
    /// Annual returns for the three investment scenarios
    pub conservative_return: f64,
    pub moderate_return: f64,
    pub aggressive_return: f64,

    pub life_expectancy_male: u32,
    pub life_expectancy_female: u32,

    /// Retirement is planned for at least this many years
    pub min_retirement_years: u32,

    /// Share of today's expenses assumed to continue into retirement
    pub expense_replacement_ratio: f64,
    pub inflation_rate: f64,

    /// Return used to size the monthly investment needed for the nest egg
    pub nest_egg_return: f64,

    /// CPF LIFE monthly payout in today's dollars and its yearly escalation
    pub cpf_life_monthly_payout: f64,
    pub cpf_life_escalation: f64,

    /// Return used for the cost-of-delay illustration
    pub delay_illustration_return: f64,

    /// Savings growth scenario rates, in percent per year
    pub growth_scenario_rates_pct: [f64; 3],
    pub growth_projection_max_years: u32,
    pub growth_milestones: Vec<f64>,
}

impl Default for RetirementAssumptions {
    fn default() -> Self {
        Self {
            conservative_return: 0.025,
            moderate_return: 0.05,
            aggressive_return: 0.08,
            life_expectancy_male: 82,
            life_expectancy_female: 86,
            min_retirement_years: 10,
            expense_replacement_ratio: 0.7,
            inflation_rate: 0.03,
            nest_egg_return: 0.08,
            cpf_life_monthly_payout: 1_379.0,
            cpf_life_escalation: 0.02,
            delay_illustration_return: 0.12,
            growth_scenario_rates_pct: [0.05, 6.0, 12.0],
            growth_projection_max_years: 50,
            growth_milestones: vec![
                100_000.0, 250_000.0, 500_000.0, 1_000_000.0, 1_500_000.0, 2_000_000.0,
            ],
        }
    }
}
