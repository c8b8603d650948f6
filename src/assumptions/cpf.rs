//! CPF contribution-rate and account-allocation tables

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Employee and employer contribution rates as fractions of gross wage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionRates {
    pub employee: f64,
    pub employer: f64,
}

impl ContributionRates {
    pub const fn new(employee: f64, employer: f64) -> Self {
        Self { employee, employer }
    }

    pub fn combined(&self) -> f64 {
        self.employee + self.employer
    }
}

/// Split of the total contribution across OA / SA / MA
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationShares {
    pub oa: f64,
    pub sa: f64,
    pub ma: f64,
}

impl AllocationShares {
    /// Build from published ratios, rescaled so the shares sum to exactly one
    pub fn normalized(oa: f64, sa: f64, ma: f64) -> Self {
        let sum = oa + sa + ma;
        if sum <= 0.0 {
            return Self { oa: 0.0, sa: 0.0, ma: 0.0 };
        }
        Self {
            oa: oa / sum,
            sa: sa / sum,
            ma: ma / sum,
        }
    }

    pub fn sum(&self) -> f64 {
        self.oa + self.sa + self.ma
    }
}

/// Step function over age with inclusive upper bounds (`age <= max_age`)
/// and an open-ended final band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBandTable<T> {
    bounded: Vec<(u32, T)>,
    beyond: T,
}

impl<T: Copy> AgeBandTable<T> {
    /// Build a table; bounds must be strictly ascending
    pub fn new(table: &'static str, bounded: Vec<(u32, T)>, beyond: T) -> Result<Self> {
        if let Some(pair) = bounded.windows(2).find(|w| w[0].0 >= w[1].0) {
            return Err(PlannerError::InvalidTable {
                table,
                reason: format!("age bounds not ascending at {} -> {}", pair[0].0, pair[1].0),
            });
        }
        Ok(Self { bounded, beyond })
    }

    /// Value of the first band whose upper bound is at or above `age`
    pub fn lookup(&self, age: u32) -> T {
        self.bounded
            .iter()
            .find(|(max_age, _)| age <= *max_age)
            .map_or(self.beyond, |(_, value)| *value)
    }

    /// Upper bounds of the bounded bands, in order
    pub fn bounds(&self) -> impl Iterator<Item = u32> + '_ {
        self.bounded.iter().map(|(max_age, _)| *max_age)
    }
}

/// Interest factors applied once a year, in January
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpfInterestFactors {
    pub oa: f64,
    pub sa: f64,
    pub ma: f64,
}

impl Default for CpfInterestFactors {
    fn default() -> Self {
        Self {
            oa: 1.025,
            sa: 1.04,
            ma: 1.04,
        }
    }
}

/// All CPF assumptions used by the contribution engine and the balance projector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpfAssumptions {
    pub contribution: AgeBandTable<ContributionRates>,
    pub allocation: AgeBandTable<AllocationShares>,
    pub interest: CpfInterestFactors,
}

impl CpfAssumptions {
    pub fn contribution_rates(&self, age: u32) -> ContributionRates {
        self.contribution.lookup(age)
    }

    pub fn allocation(&self, age: u32) -> AllocationShares {
        self.allocation.lookup(age)
    }

    /// Contribution rates by age band
    pub fn default_contribution_table() -> AgeBandTable<ContributionRates> {
        AgeBandTable {
            bounded: vec![
                (35, ContributionRates::new(0.20, 0.17)),
                (45, ContributionRates::new(0.20, 0.17)),
                (50, ContributionRates::new(0.20, 0.17)),
                (55, ContributionRates::new(0.20, 0.17)),
                (60, ContributionRates::new(0.17, 0.155)),
                (65, ContributionRates::new(0.115, 0.12)),
                (70, ContributionRates::new(0.075, 0.09)),
            ],
            beyond: ContributionRates::new(0.05, 0.075),
        }
    }

    /// 2025 allocation ratios (inclusive upper bounds)
    pub fn default_allocation_table() -> AgeBandTable<AllocationShares> {
        AgeBandTable {
            bounded: vec![
                (35, AllocationShares::normalized(0.6216, 0.1622, 0.2162)),
                (45, AllocationShares::normalized(0.5405, 0.1892, 0.2703)),
                (50, AllocationShares::normalized(0.4595, 0.2162, 0.3243)),
                (55, AllocationShares::normalized(0.3784, 0.2432, 0.3784)),
                (60, AllocationShares::normalized(0.4211, 0.2632, 0.3158)),
                (65, AllocationShares::normalized(0.3478, 0.1739, 0.4783)),
            ],
            beyond: AllocationShares::normalized(0.3333, 0.1667, 0.5000),
        }
    }
}

impl Default for CpfAssumptions {
    fn default() -> Self {
        Self {
            contribution: Self::default_contribution_table(),
            allocation: Self::default_allocation_table(),
            interest: CpfInterestFactors::default(),
        }
    }
}
