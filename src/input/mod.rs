//! Boundary coercion of raw form input: numbers and dates

mod numeric;
mod dates;

pub use numeric::{to_number, parse_money, field_number, format_sgd, FieldValue};
pub use dates::{
    parse_date, months_since, age_in_years, ReferenceMonth, CalendarMonth, MONTH_NAMES,
};
