//! Scheduled one-time and recurring cash events

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::input::{parse_date, FieldValue, ReferenceMonth};

/// Recurrence period of a recurring event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn period_months(&self) -> i64 {
        match self {
            Frequency::Monthly => 1,
            Frequency::Quarterly => 3,
            Frequency::Yearly => 12,
        }
    }

    /// Form value; anything unrecognised is monthly, the form's default
    pub fn from_form(text: Option<&str>) -> Self {
        match text.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("quarterly") => Frequency::Quarterly,
            Some("yearly") => Frequency::Yearly,
            _ => Frequency::Monthly,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    OneTime,
    Recurring(Frequency),
}

/// When an event first fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStart {
    /// Month of year (0-based) in the year the member turns `start_age`
    AtAge { start_age: u32, start_month: u32 },
    /// A calendar month (0-based), as entered for CPF withdrawals
    OnDate { start_year: i32, start_month: u32 },
    /// At the member's current age; `None` is the reference month itself
    AtCurrentAge { start_month: Option<u32> },
}

/// Whether the optional end age bounds the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndBound {
    Honored,
    Ignored,
}

/// Where a projection starts: the member's age and the calendar month of month 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionAnchor {
    pub current_age: u32,
    pub reference: ReferenceMonth,
}

impl ProjectionAnchor {
    pub fn new(current_age: u32, reference: ReferenceMonth) -> Self {
        Self { current_age, reference }
    }
}

/// An income or withdrawal scheduled against a projection
///
/// Stored in client records as the form entered it, see [`EventForm`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EventForm", into = "EventForm")]
pub struct ScheduledCashEvent {
    pub name: String,
    pub amount: f64,
    pub kind: EventKind,
    pub start: EventStart,
    /// `None` means no end; an end age of 0 is treated the same way
    pub end_age: Option<u32>,
}

/// An event as stored by the income, withdrawal and CPF withdrawal forms
///
/// Amounts and ages may be numbers or typed text. One-time entries may carry a
/// leftover `frequency`, which is ignored. CPF withdrawals carry an ISO `date`
/// instead of a start age.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    #[serde(default, alias = "purpose")]
    pub name: String,
    #[serde(default)]
    pub amount: FieldValue,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_age: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_month: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_age: Option<FieldValue>,
}

/// A filled-in, non-negative whole number; `None` for blank or unparseable text
fn whole_number(field: Option<&FieldValue>) -> Option<u32> {
    let field = field.filter(|f| !f.is_blank())?;
    let value = field.to_number(f64::NAN);
    value.is_finite().then(|| value.clamp(0.0, u32::MAX as f64) as u32)
}

impl From<EventForm> for ScheduledCashEvent {
    fn from(form: EventForm) -> Self {
        let kind = if form.kind.trim().eq_ignore_ascii_case("recurring") {
            EventKind::Recurring(Frequency::from_form(form.frequency.as_deref()))
        } else {
            EventKind::OneTime
        };

        let start_month = whole_number(form.start_month.as_ref());
        let start = match (
            form.date.as_deref().and_then(parse_date),
            whole_number(form.start_year.as_ref()),
            whole_number(form.start_age.as_ref()),
        ) {
            (Some(date), _, _) => EventStart::OnDate {
                start_year: date.year(),
                start_month: date.month0(),
            },
            (None, Some(year), _) => EventStart::OnDate {
                start_year: year as i32,
                start_month: start_month.unwrap_or(0),
            },
            (None, None, Some(age)) => EventStart::AtAge {
                start_age: age,
                start_month: start_month.unwrap_or(0),
            },
            (None, None, None) => EventStart::AtCurrentAge { start_month },
        };

        Self {
            name: form.name,
            amount: form.amount.to_number(0.0),
            kind,
            start,
            end_age: whole_number(form.end_age.as_ref()).filter(|age| *age > 0),
        }
    }
}

impl From<ScheduledCashEvent> for EventForm {
    fn from(event: ScheduledCashEvent) -> Self {
        let number = |n: f64| Some(FieldValue::Number(n));
        let mut form = EventForm {
            name: event.name,
            amount: FieldValue::Number(event.amount),
            end_age: event.end_age.and_then(|age| number(age as f64)),
            ..EventForm::default()
        };

        match event.kind {
            EventKind::OneTime => form.kind = "onetime".to_string(),
            EventKind::Recurring(frequency) => {
                form.kind = "recurring".to_string();
                form.frequency = Some(frequency.label().to_string());
            }
        }

        match event.start {
            EventStart::AtAge { start_age, start_month } => {
                form.start_age = number(start_age as f64);
                form.start_month = number(start_month as f64);
            }
            EventStart::OnDate { start_year, start_month } => {
                form.start_year = number(start_year as f64);
                form.start_month = number(start_month as f64);
            }
            EventStart::AtCurrentAge { start_month } => {
                form.start_month = start_month.and_then(|m| number(m as f64));
            }
        }

        form
    }
}

impl ScheduledCashEvent {
    pub fn one_time(amount: f64, start: EventStart) -> Self {
        Self {
            name: String::new(),
            amount,
            kind: EventKind::OneTime,
            start,
            end_age: None,
        }
    }

    pub fn recurring(amount: f64, frequency: Frequency, start: EventStart) -> Self {
        Self {
            name: String::new(),
            amount,
            kind: EventKind::Recurring(frequency),
            start,
            end_age: None,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn until_age(mut self, end_age: u32) -> Self {
        self.end_age = Some(end_age);
        self
    }

    /// Projection month in which the event first fires; negative if before month 0
    pub fn start_offset(&self, anchor: &ProjectionAnchor) -> i64 {
        match self.start {
            EventStart::AtAge { start_age, start_month } => {
                (start_age as i64 - anchor.current_age as i64) * 12
                    + (start_month as i64 - anchor.reference.month0 as i64)
            }
            EventStart::OnDate { start_year, start_month } => {
                anchor.reference.months_until(start_year, start_month)
            }
            EventStart::AtCurrentAge { start_month } => start_month
                .map_or(0, |month| month as i64 - anchor.reference.month0 as i64),
        }
    }

    /// Last projection month in which the event may fire: December of the end-age year
    pub fn end_offset(&self, anchor: &ProjectionAnchor) -> Option<i64> {
        self.end_age
            .filter(|end_age| *end_age > 0)
            .map(|end_age| (end_age as i64 - anchor.current_age as i64) * 12 + 11)
    }

    /// Whether the event fires in projection month `month`
    pub fn fires_at(&self, month: i64, anchor: &ProjectionAnchor, bound: EndBound) -> bool {
        let start = self.start_offset(anchor);
        if month < start {
            return false;
        }

        if bound == EndBound::Honored {
            if let Some(end) = self.end_offset(anchor) {
                if month > end {
                    return false;
                }
            }
        }

        match self.kind {
            EventKind::OneTime => month == start,
            EventKind::Recurring(frequency) => (month - start) % frequency.period_months() == 0,
        }
    }
}

/// Total of all events firing in `month`
pub fn total_firing(
    events: &[ScheduledCashEvent],
    month: i64,
    anchor: &ProjectionAnchor,
    bound: EndBound,
) -> f64 {
    events
        .iter()
        .filter(|e| e.fires_at(month, anchor, bound))
        .map(|e| e.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> ProjectionAnchor {
        // Age 30 in March 2025
        ProjectionAnchor::new(30, ReferenceMonth::new(2025, 2))
    }

    #[test]
    fn test_start_offset() {
        let a = anchor();

        let at_age = ScheduledCashEvent::one_time(100.0, EventStart::AtAge { start_age: 31, start_month: 0 });
        assert_eq!(at_age.start_offset(&a), 10);

        let on_date = ScheduledCashEvent::one_time(100.0, EventStart::OnDate { start_year: 2026, start_month: 0 });
        assert_eq!(on_date.start_offset(&a), 10);

        let past = ScheduledCashEvent::one_time(100.0, EventStart::AtAge { start_age: 30, start_month: 0 });
        assert_eq!(past.start_offset(&a), -2);
    }

    #[test]
    fn test_one_time_fires_once() {
        let a = anchor();
        let event = ScheduledCashEvent::one_time(500.0, EventStart::AtAge { start_age: 30, start_month: 5 });

        let fired: Vec<i64> = (0..60).filter(|&m| event.fires_at(m, &a, EndBound::Honored)).collect();
        assert_eq!(fired, vec![3]);
    }

    #[test]
    fn test_recurring_period() {
        let a = anchor();
        let start = EventStart::AtAge { start_age: 30, start_month: 2 };

        let quarterly = ScheduledCashEvent::recurring(1.0, Frequency::Quarterly, start);
        let fired: Vec<i64> = (0..10).filter(|&m| quarterly.fires_at(m, &a, EndBound::Honored)).collect();
        assert_eq!(fired, vec![0, 3, 6, 9]);

        let yearly = ScheduledCashEvent::recurring(1.0, Frequency::Yearly, start);
        let fired: Vec<i64> = (0..30).filter(|&m| yearly.fires_at(m, &a, EndBound::Honored)).collect();
        assert_eq!(fired, vec![0, 12, 24]);
    }

    #[test]
    fn test_recurring_started_in_past_keeps_phase() {
        let a = anchor();
        // Started January (offset -2): quarterly hits at 1, 4, 7
        let event = ScheduledCashEvent::recurring(1.0, Frequency::Quarterly, EventStart::AtAge { start_age: 30, start_month: 0 });
        let fired: Vec<i64> = (0..8).filter(|&m| event.fires_at(m, &a, EndBound::Honored)).collect();
        assert_eq!(fired, vec![1, 4, 7]);
    }

    #[test]
    fn test_end_age_bound() {
        let a = anchor();
        let event = ScheduledCashEvent::recurring(1.0, Frequency::Monthly, EventStart::AtAge { start_age: 30, start_month: 2 })
            .until_age(31);

        // Last month is December of the year the member is 31: (31-30)*12 + 11 = 23
        assert_eq!(event.end_offset(&a), Some(23));
        assert!(event.fires_at(23, &a, EndBound::Honored));
        assert!(!event.fires_at(24, &a, EndBound::Honored));
        assert!(event.fires_at(24, &a, EndBound::Ignored));
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{"name":"Bonus","amount":5000,"type":"recurring","frequency":"yearly","startAge":31,"startMonth":11,"endAge":null}"#;
        let event: ScheduledCashEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.kind, EventKind::Recurring(Frequency::Yearly));
        assert_eq!(event.start, EventStart::AtAge { start_age: 31, start_month: 11 });
        assert_eq!(event.end_age, None);

        let json = r#"{"amount":3000,"type":"onetime","startYear":2027,"startMonth":4}"#;
        let event: ScheduledCashEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, EventKind::OneTime);
        assert_eq!(event.start, EventStart::OnDate { start_year: 2027, start_month: 4 });

        let back: ScheduledCashEvent = serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_typed_text_fields() {
        let json = r#"{"id":1712345678901,"name":"Allowance","amount":"$1,500","type":"recurring","frequency":"quarterly","startAge":"31","startMonth":"6","endAge":"40"}"#;
        let event: ScheduledCashEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.amount, 1_500.0);
        assert_eq!(event.kind, EventKind::Recurring(Frequency::Quarterly));
        assert_eq!(event.start, EventStart::AtAge { start_age: 31, start_month: 6 });
        assert_eq!(event.end_age, Some(40));
    }

    #[test]
    fn test_one_time_keeps_form_frequency() {
        let json = r#"{"name":"Car","amount":"5000","type":"onetime","frequency":"monthly","startAge":30,"startMonth":5}"#;
        let event: ScheduledCashEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.kind, EventKind::OneTime);
        assert_eq!(event.amount, 5_000.0);

        let fired: Vec<i64> = (0..24).filter(|&m| event.fires_at(m, &anchor(), EndBound::Honored)).collect();
        assert_eq!(fired, vec![3]);
    }

    #[test]
    fn test_blank_form_fields() {
        // A freshly added row: empty amount, no end age
        let json = r#"{"name":"","amount":"","type":"recurring","frequency":"monthly","startMonth":2,"endAge":""}"#;
        let event: ScheduledCashEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.amount, 0.0);
        assert_eq!(event.end_age, None);
        assert_eq!(event.start, EventStart::AtCurrentAge { start_month: Some(2) });
        assert_eq!(event.start_offset(&anchor()), 0);

        let event: ScheduledCashEvent = serde_json::from_str(r#"{"amount":100,"type":"onetime"}"#).unwrap();
        assert_eq!(event.start, EventStart::AtCurrentAge { start_month: None });
        assert!(event.fires_at(0, &anchor(), EndBound::Honored));
    }

    #[test]
    fn test_cpf_form_date() {
        let json = r#"{"purpose":"Housing","amount":"20000","date":"2026-07-15","type":"onetime","frequency":"monthly"}"#;
        let event: ScheduledCashEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.name, "Housing");
        assert_eq!(event.start, EventStart::OnDate { start_year: 2026, start_month: 6 });
        assert_eq!(event.start_offset(&anchor()), 16);
    }

    #[test]
    fn test_zero_end_age_means_no_end() {
        let a = anchor();
        let json = r#"{"amount":100,"type":"recurring","frequency":"monthly","startAge":30,"startMonth":2,"endAge":0}"#;
        let event: ScheduledCashEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.end_age, None);

        let built = ScheduledCashEvent::recurring(100.0, Frequency::Monthly, EventStart::AtAge { start_age: 30, start_month: 2 })
            .until_age(0);
        assert_eq!(built.end_offset(&a), None);
        assert!(built.fires_at(600, &a, EndBound::Honored));
    }
}
