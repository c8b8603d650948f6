//! ILP product features: premium bands, initial bonuses and loyalty bonuses

use serde::{Deserialize, Serialize};

/// Premium band, determined by annualised regular premium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PremiumBand {
    /// [0, 12000)
    Band1,
    /// [12000, 24000)
    Band2,
    /// [24000, 36000)
    Band3,
    /// [36000, 48000)
    Band4,
    /// [48000, Inf)
    Band5,
}

impl PremiumBand {
    /// Determine band from annual premium amount
    pub fn from_annual_premium(premium: f64) -> Self {
        if premium < 12_000.0 {
            PremiumBand::Band1
        } else if premium < 24_000.0 {
            PremiumBand::Band2
        } else if premium < 36_000.0 {
            PremiumBand::Band3
        } else if premium < 48_000.0 {
            PremiumBand::Band4
        } else {
            PremiumBand::Band5
        }
    }

    /// Band number, 1 to 5
    pub fn number(&self) -> u8 {
        match self {
            PremiumBand::Band1 => 1,
            PremiumBand::Band2 => 2,
            PremiumBand::Band3 => 3,
            PremiumBand::Band4 => 4,
            PremiumBand::Band5 => 5,
        }
    }

    /// Initial bonus multipliers for policy years 1 and 2
    pub fn bonus_rates(&self) -> BonusRates {
        match self {
            PremiumBand::Band1 => BonusRates { year1: 1.23, year2: 1.00 },
            PremiumBand::Band2 => BonusRates { year1: 1.45, year2: 1.20 },
            PremiumBand::Band3 => BonusRates { year1: 1.58, year2: 1.35 },
            PremiumBand::Band4 => BonusRates { year1: 1.63, year2: 1.40 },
            PremiumBand::Band5 => BonusRates { year1: 1.72, year2: 1.48 },
        }
    }

    /// Loyalty bonus rate while still inside the banded loyalty period
    fn banded_loyalty_rate(&self) -> f64 {
        match self {
            PremiumBand::Band1 | PremiumBand::Band2 => 0.0092,
            PremiumBand::Band3 => 0.0098,
            PremiumBand::Band4 | PremiumBand::Band5 => 0.0099,
        }
    }
}

/// Premium multipliers applied in the first two policy years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusRates {
    pub year1: f64,
    pub year2: f64,
}

/// Policy terms shared by every band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IlpProductTerms {
    /// Years during which premiums are paid
    pub premium_payment_term: u32,

    /// Last policy year that uses the banded loyalty rate
    pub banded_loyalty_last_year: u32,

    /// Loyalty rate for every band after the banded period
    pub late_loyalty_rate: f64,
}

impl Default for IlpProductTerms {
    fn default() -> Self {
        Self {
            premium_payment_term: 30,
            banded_loyalty_last_year: 40,
            late_loyalty_rate: 0.0030,
        }
    }
}

impl IlpProductTerms {
    /// Loyalty bonus rate for a policy year. Only meaningful after the premium
    /// payment term; the projector never asks for earlier years.
    pub fn loyalty_rate(&self, band: PremiumBand, policy_year: u32) -> f64 {
        if policy_year <= self.banded_loyalty_last_year {
            band.banded_loyalty_rate()
        } else {
            self.late_loyalty_rate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premium_band() {
        assert_eq!(PremiumBand::from_annual_premium(6_000.0), PremiumBand::Band1);
        assert_eq!(PremiumBand::from_annual_premium(11_999.99), PremiumBand::Band1);
        assert_eq!(PremiumBand::from_annual_premium(12_000.0), PremiumBand::Band2);
        assert_eq!(PremiumBand::from_annual_premium(24_000.0), PremiumBand::Band3);
        assert_eq!(PremiumBand::from_annual_premium(47_999.0), PremiumBand::Band4);
        assert_eq!(PremiumBand::from_annual_premium(48_000.0), PremiumBand::Band5);
        assert_eq!(PremiumBand::from_annual_premium(250_000.0).number(), 5);
    }

    #[test]
    fn test_bonus_rates() {
        assert_eq!(PremiumBand::Band1.bonus_rates(), BonusRates { year1: 1.23, year2: 1.00 });
        assert_eq!(PremiumBand::Band3.bonus_rates().year2, 1.35);
        assert_eq!(PremiumBand::Band5.bonus_rates().year1, 1.72);
    }

    #[test]
    fn test_loyalty_rates() {
        let terms = IlpProductTerms::default();

        assert_eq!(terms.loyalty_rate(PremiumBand::Band1, 31), 0.0092);
        assert_eq!(terms.loyalty_rate(PremiumBand::Band3, 35), 0.0098);
        assert_eq!(terms.loyalty_rate(PremiumBand::Band5, 40), 0.0099);
        assert_eq!(terms.loyalty_rate(PremiumBand::Band5, 41), 0.0030);
        assert_eq!(terms.loyalty_rate(PremiumBand::Band2, 60), 0.0030);
    }
}
