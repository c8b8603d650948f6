//! Birth-date parsing and age arithmetic
//!
//! Months are 0-based (January = 0) everywhere in the planner, matching the way
//! reference months and event start months are stored in client records.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse an ISO-8601 date (`2024-05-17`) or timestamp; `None` for empty or invalid text
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

/// Whole months from `birth` to the reference month. Negative when the
/// reference precedes the birth month.
pub fn months_since(birth: NaiveDate, ref_year: i32, ref_month0: u32) -> i32 {
    (ref_year - birth.year()) * 12 + (ref_month0 as i32 - birth.month0() as i32)
}

/// Age in whole years at the reference month, never negative. A missing birth
/// date yields 0.
pub fn age_in_years(birth: Option<NaiveDate>, reference: ReferenceMonth) -> u32 {
    match birth {
        Some(dob) => {
            let months = months_since(dob, reference.year, reference.month0);
            months.div_euclid(12).max(0) as u32
        }
        None => 0,
    }
}

/// Calendar month used as the "now" of a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceMonth {
    pub year: i32,
    /// 0 = January … 11 = December
    pub month0: u32,
}

impl ReferenceMonth {
    pub fn new(year: i32, month0: u32) -> Self {
        Self {
            year,
            month0: month0.min(11),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0())
    }

    /// The current local month
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Calendar position `months` after this one
    pub fn offset(&self, months: u32) -> CalendarMonth {
        let absolute = self.month0 + months;
        CalendarMonth {
            year: self.year + (absolute / 12) as i32,
            month0: absolute % 12,
        }
    }

    /// Signed month distance from this reference to a calendar month
    pub fn months_until(&self, year: i32, month0: u32) -> i64 {
        (year as i64 - self.year as i64) * 12 + (month0 as i64 - self.month0 as i64)
    }
}

/// A year/month pair produced while walking a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month0: u32,
}

impl CalendarMonth {
    pub fn is_january(&self) -> bool {
        self.month0 == 0
    }

    pub fn label(&self) -> &'static str {
        MONTH_NAMES[self.month0 as usize % 12]
    }
}
