//! Investment-linked policy projection
//!
//! Two phases: premiums buy units during the premium payment term (with the
//! initial bonus multipliers in years 1 and 2), then loyalty bonuses add units
//! each year based on the previous year's accumulation units value.

use serde::{Deserialize, Serialize};

use crate::assumptions::{BonusRates, IlpProductTerms, PremiumBand};

/// Inputs for an ILP projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IlpConfig {
    pub annual_premium: f64,
    pub projection_years: u32,
    /// Annual unit price growth as a fraction
    pub growth_rate: f64,
}

impl IlpConfig {
    pub fn new(annual_premium: f64) -> Self {
        Self {
            annual_premium,
            projection_years: 40,
            growth_rate: 0.05,
        }
    }
}

/// Account receiving units in a policy year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Bonus,
    Flexible,
    LoyaltyOnly,
}

impl AccountType {
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Bonus => "Bonus Account",
            AccountType::Flexible => "Flexible Account",
            AccountType::LoyaltyOnly => "No Premium (Loyalty Only)",
        }
    }
}

/// Unit holdings carried from one policy year to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IlpAccountState {
    pub bonus_units: f64,
    pub flexible_units: f64,
    /// Every unit bought plus loyalty units; the loyalty bonus base
    pub accumulation_units: f64,
    pub cumulative_invested: f64,
    /// Accumulation value recorded in the previous year's row
    pub prior_accumulation_value: f64,
}

/// One policy year of the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IlpYearRow {
    pub year: u32,
    pub premium: f64,
    pub bonus_multiplier: f64,
    pub effective_premium: f64,
    pub cumulative_invested: f64,
    pub units_purchased: f64,
    pub account_type: AccountType,

    pub bonus_account_units: f64,
    pub flexible_account_units: f64,
    pub loyalty_bonus_units: f64,
    pub accumulation_units: f64,
    pub total_units: f64,

    pub unit_value: f64,
    pub bonus_account_value: f64,
    pub flexible_account_value: f64,
    /// Accumulation units value before this year's loyalty bonus
    pub accumulation_value: f64,
    pub loyalty_bonus_rate: f64,

    pub portfolio_value: f64,
    pub gain: f64,
    /// Gain as a percentage of cumulative premiums; 0 with nothing invested
    pub roi: f64,
}

/// Complete ILP projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IlpProjection {
    pub band: PremiumBand,
    pub bonus_rates: BonusRates,
    pub premium_payment_term: u32,
    pub rows: Vec<IlpYearRow>,
}

impl IlpProjection {
    pub fn final_row(&self) -> Option<&IlpYearRow> {
        self.rows.last()
    }
}

/// Project an ILP year by year. `None` for a non-positive premium.
pub fn project_ilp(terms: &IlpProductTerms, config: &IlpConfig) -> Option<IlpProjection> {
    let premium = config.annual_premium;
    if premium.is_nan() || premium <= 0.0 {
        return None;
    }

    let band = PremiumBand::from_annual_premium(premium);
    let bonus_rates = band.bonus_rates();
    let term = terms.premium_payment_term;

    let mut rows = Vec::with_capacity(config.projection_years as usize);
    let mut state = IlpAccountState::default();

    for year in 1..=config.projection_years {
        let paying = year <= term;
        let (bonus_multiplier, account_type) = match year {
            1 if paying => (bonus_rates.year1, AccountType::Bonus),
            2 if paying => (bonus_rates.year2, AccountType::Bonus),
            _ if paying => (1.0, AccountType::Flexible),
            _ => (1.0, AccountType::LoyaltyOnly),
        };

        let premium_paid = if paying { premium } else { 0.0 };
        let units_purchased = premium_paid * bonus_multiplier;
        if paying {
            state.cumulative_invested += premium;
            if account_type == AccountType::Bonus {
                state.bonus_units += units_purchased;
            } else {
                state.flexible_units += units_purchased;
            }
            state.accumulation_units += units_purchased;
        }

        let unit_value = (1.0 + config.growth_rate).powi(year as i32);
        let accumulation_value = state.accumulation_units * unit_value;

        let (loyalty_bonus_rate, loyalty_bonus_units) = if paying {
            (0.0, 0.0)
        } else {
            let rate = terms.loyalty_rate(band, year);
            (rate, state.prior_accumulation_value * rate / unit_value)
        };
        state.accumulation_units += loyalty_bonus_units;
        state.prior_accumulation_value = accumulation_value;

        let total_units = state.bonus_units + state.flexible_units + loyalty_bonus_units;
        let portfolio_value = total_units * unit_value;
        let gain = portfolio_value - state.cumulative_invested;
        let roi = if state.cumulative_invested > 0.0 {
            gain / state.cumulative_invested * 100.0
        } else {
            0.0
        };

        rows.push(IlpYearRow {
            year,
            premium: premium_paid,
            bonus_multiplier,
            effective_premium: units_purchased,
            cumulative_invested: state.cumulative_invested,
            units_purchased,
            account_type,
            bonus_account_units: state.bonus_units,
            flexible_account_units: state.flexible_units,
            loyalty_bonus_units,
            accumulation_units: state.accumulation_units,
            total_units,
            unit_value,
            bonus_account_value: state.bonus_units * unit_value,
            flexible_account_value: state.flexible_units * unit_value,
            accumulation_value,
            loyalty_bonus_rate,
            portfolio_value,
            gain,
            roi,
        });
    }

    log::debug!("ILP projection: band {}, {} years", band.number(), rows.len());

    Some(IlpProjection {
        band,
        bonus_rates,
        premium_payment_term: term,
        rows,
    })
}
