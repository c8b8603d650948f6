//! Free-form numeric text coercion
//!
//! Form fields arrive as whatever the user typed ("$6,000", "12 %", "") or as a
//! plain JSON number. Everything is coerced once, here, and never fails.

use serde::{Deserialize, Serialize};

/// Parse free-form text as a number, falling back to `default`
///
/// Every character other than a digit, `.` or `-` is discarded first. The longest
/// leading float of the remainder is then taken (so `"1.2.3"` is 1.2 and `"5-3"`
/// is 5). Text with no leading digits yields `default`.
pub fn to_number(value: Option<&str>, default: f64) -> f64 {
    let Some(text) = value else {
        return default;
    };

    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    leading_float(&stripped).unwrap_or(default)
}

/// Shorthand for `to_number(Some(text), 0.0)`
pub fn parse_money(text: &str) -> f64 {
    to_number(Some(text), 0.0)
}

/// Longest prefix of the form `-?digits*(.digits*)?` with at least one digit
fn leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut idx = 0;

    let negative = bytes.first() == Some(&b'-');
    if negative {
        idx += 1;
    }

    let int_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    let int_digits = &s[int_start..idx];

    let mut frac_digits = "";
    if idx < bytes.len() && bytes[idx] == b'.' {
        let frac_start = idx + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &s[frac_start..end];
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut normalized = String::with_capacity(int_digits.len() + frac_digits.len() + 3);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_digits);
    }

    normalized.parse::<f64>().ok()
}

/// A form field as stored in a client record: either what was typed or a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Coerce to a number with the given fallback
    pub fn to_number(&self, default: f64) -> f64 {
        match self {
            FieldValue::Number(n) if n.is_finite() => *n,
            FieldValue::Number(_) => default,
            FieldValue::Text(s) => to_number(Some(s), default),
        }
    }

    /// True for an empty text field (the form's "not filled in" state)
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.trim().is_empty())
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// Coerce an optional field; absent means `default`
pub fn field_number(field: Option<&FieldValue>, default: f64) -> f64 {
    field.map_or(default, |f| f.to_number(default))
}

/// Render money the way the planner displays it: `SGD $1,234.56`
pub fn format_sgd(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let remainder = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "SGD ${}{}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        remainder
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_currency_noise() {
        assert_eq!(to_number(Some("$6,000"), 0.0), 6000.0);
        assert_eq!(to_number(Some("SGD 1,234.50"), 0.0), 1234.5);
        assert_eq!(to_number(Some("12 %"), 0.0), 12.0);
        assert_eq!(to_number(Some("-250"), 0.0), -250.0);
    }

    #[test]
    fn test_default_on_unparseable() {
        assert_eq!(to_number(Some(""), 7.0), 7.0);
        assert_eq!(to_number(Some("abc"), 3.0), 3.0);
        assert_eq!(to_number(Some("-"), 1.0), 1.0);
        assert_eq!(to_number(Some("."), 1.0), 1.0);
        assert_eq!(to_number(Some("--5"), 2.0), 2.0);
        assert_eq!(to_number(None, 100.0), 100.0);
    }

    #[test]
    fn test_longest_leading_float() {
        assert_eq!(to_number(Some("1.2.3"), 0.0), 1.2);
        assert_eq!(to_number(Some("5-3"), 0.0), 5.0);
        assert_eq!(to_number(Some("-.5"), 0.0), -0.5);
        assert_eq!(to_number(Some("7."), 0.0), 7.0);
        // Exponent markers are stripped along with the other letters
        assert_eq!(to_number(Some("1e3"), 0.0), 13.0);
    }

    #[test]
    fn test_field_value_json() {
        let fields: Vec<FieldValue> = serde_json::from_str(r#"["6,000", 4800.5, ""]"#).unwrap();
        assert_eq!(fields[0].to_number(0.0), 6000.0);
        assert_eq!(fields[1].to_number(0.0), 4800.5);
        assert!(fields[2].is_blank());
        assert_eq!(fields[2].to_number(65.0), 65.0);

        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"["6,000",4800.5,""]"#);
    }

    #[test]
    fn test_format_sgd() {
        assert_eq!(format_sgd(0.0), "SGD $0.00");
        assert_eq!(format_sgd(1234.5), "SGD $1,234.50");
        assert_eq!(format_sgd(1_000_000.0), "SGD $1,000,000.00");
        assert_eq!(format_sgd(-42.5), "SGD $-42.50");
    }
}
