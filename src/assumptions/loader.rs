//! CSV-based CPF table loader
//!
//! Loads CPF rate tables from CSV files in data/assumptions/. Each file has a
//! `max_age` column; the row with an empty `max_age` is the open-ended top band.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::cpf::{AgeBandTable, AllocationShares, ContributionRates};
use crate::error::{PlannerError, Result};

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

const CONTRIBUTION_FILE: &str = "cpf_contribution_rates.csv";
const ALLOCATION_FILE: &str = "cpf_allocation.csv";

#[derive(Debug, Deserialize)]
struct ContributionRow {
    max_age: Option<u32>,
    employee: f64,
    employer: f64,
}

#[derive(Debug, Deserialize)]
struct AllocationRow {
    max_age: Option<u32>,
    oa: f64,
    sa: f64,
    ma: f64,
}

/// Split rows into bounded bands plus the single open-ended band
fn into_table<T: Copy>(table: &'static str, rows: Vec<(Option<u32>, T)>) -> Result<AgeBandTable<T>> {
    let mut bounded = Vec::with_capacity(rows.len());
    let mut beyond = None;

    for (max_age, value) in rows {
        match (max_age, beyond) {
            (Some(_), Some(_)) => {
                return Err(PlannerError::InvalidTable {
                    table,
                    reason: "open-ended band must be the last row".to_string(),
                });
            }
            (Some(age), None) => bounded.push((age, value)),
            (None, None) => beyond = Some(value),
            (None, Some(_)) => {
                return Err(PlannerError::InvalidTable {
                    table,
                    reason: "more than one open-ended band".to_string(),
                });
            }
        }
    }

    let beyond = beyond.ok_or_else(|| PlannerError::InvalidTable {
        table,
        reason: "missing open-ended band (empty max_age)".to_string(),
    })?;

    AgeBandTable::new(table, bounded, beyond)
}

/// Load contribution rates from any reader
pub fn load_contribution_rates_from_reader<R: Read>(reader: R) -> Result<AgeBandTable<ContributionRates>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: ContributionRow = result?;
        rows.push((row.max_age, ContributionRates::new(row.employee, row.employer)));
    }

    into_table(CONTRIBUTION_FILE, rows)
}

/// Load allocation ratios from any reader
pub fn load_allocation_from_reader<R: Read>(reader: R) -> Result<AgeBandTable<AllocationShares>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: AllocationRow = result?;
        let shares = [row.oa, row.sa, row.ma];
        if shares.iter().any(|s| !s.is_finite() || *s < 0.0) || shares.iter().sum::<f64>() <= 0.0 {
            return Err(PlannerError::InvalidTable {
                table: ALLOCATION_FILE,
                reason: format!("invalid shares for max_age {:?}", row.max_age),
            });
        }
        rows.push((row.max_age, AllocationShares::normalized(row.oa, row.sa, row.ma)));
    }

    into_table(ALLOCATION_FILE, rows)
}

/// CPF tables loaded from a directory
pub struct LoadedAssumptions {
    pub contribution: AgeBandTable<ContributionRates>,
    pub allocation: AgeBandTable<AllocationShares>,
}

impl LoadedAssumptions {
    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contribution = load_contribution_rates_from_reader(File::open(path.join(CONTRIBUTION_FILE))?)?;
        let allocation = load_allocation_from_reader(File::open(path.join(ALLOCATION_FILE))?)?;
        log::debug!("loaded CPF tables from {}", path.display());

        Ok(Self {
            contribution,
            allocation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::CpfAssumptions;

    #[test]
    fn test_load_contribution_rates() {
        let csv = "max_age,employee,employer\n55,0.20,0.17\n60,0.17,0.155\n,0.05,0.075\n";
        let table = load_contribution_rates_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.lookup(40), ContributionRates::new(0.20, 0.17));
        assert_eq!(table.lookup(58), ContributionRates::new(0.17, 0.155));
        assert_eq!(table.lookup(61), ContributionRates::new(0.05, 0.075));
    }

    #[test]
    fn test_allocation_is_normalized() {
        let csv = "max_age,oa,sa,ma\n60,0.4211,0.2632,0.3158\n,0.3333,0.1667,0.5\n";
        let table = load_allocation_from_reader(csv.as_bytes()).unwrap();

        assert!((table.lookup(58).sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_shares_rejected() {
        for row in ["60,NaN,0.3,0.3", "60,0.4,inf,0.3", "60,0.4,0.3,-0.1"] {
            let csv = format!("max_age,oa,sa,ma\n{row}\n,0.3333,0.1667,0.5\n");
            assert!(matches!(
                load_allocation_from_reader(csv.as_bytes()),
                Err(PlannerError::InvalidTable { .. })
            ));
        }
    }

    #[test]
    fn test_missing_open_band_rejected() {
        let csv = "max_age,employee,employer\n55,0.20,0.17\n";
        assert!(load_contribution_rates_from_reader(csv.as_bytes()).is_err());

        let csv = "max_age,employee,employer\n,0.05,0.075\n55,0.20,0.17\n";
        assert!(load_contribution_rates_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_shipped_tables_match_builtin() {
        let loaded = LoadedAssumptions::load_from(Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/data/assumptions"
        )))
        .expect("Failed to load CPF tables");

        let builtin = CpfAssumptions::default();
        for age in [20, 35, 36, 50, 55, 58, 62, 67, 75] {
            assert_eq!(loaded.contribution.lookup(age), builtin.contribution_rates(age));
            let a = loaded.allocation.lookup(age);
            let b = builtin.allocation(age);
            assert!((a.oa - b.oa).abs() < 1e-12 && (a.ma - b.ma).abs() < 1e-12);
        }
    }
}
