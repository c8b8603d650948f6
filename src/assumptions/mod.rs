//! Planning assumptions: CPF tables, education and retirement constants, ILP terms

mod cpf;
mod planning;
mod product;
pub mod loader;

pub use cpf::{
    AgeBandTable, AllocationShares, ContributionRates, CpfAssumptions, CpfInterestFactors,
};
pub use planning::{EducationAssumptions, RetirementAssumptions};
pub use product::{BonusRates, IlpProductTerms, PremiumBand};
pub use loader::LoadedAssumptions;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Container for all planning assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    pub cpf: CpfAssumptions,
    pub education: EducationAssumptions,
    pub retirement: RetirementAssumptions,
    pub ilp: IlpProductTerms,
}

impl Assumptions {
    /// Built-in Singapore planning assumptions
    pub fn default_planning() -> Self {
        Self {
            cpf: CpfAssumptions::default(),
            education: EducationAssumptions::default(),
            retirement: RetirementAssumptions::default(),
            ilp: IlpProductTerms::default(),
        }
    }

    /// Load CPF tables from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load CPF tables from CSV files in a specific directory; everything else
    /// keeps its built-in default
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedAssumptions::load_from(path)?;

        let mut assumptions = Self::default_planning();
        assumptions.cpf.contribution = loaded.contribution;
        assumptions.cpf.allocation = loaded.allocation;
        Ok(assumptions)
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_planning()
    }
}
