//! Application records as exchanged with the Record Store.
//!
//! Incoming data is decoded leniently: a single odd row (null text, a date
//! that is not `YYYY-MM-DD`, an unknown status, a number where text was
//! expected) must not make the whole collection unreadable. Every field goes
//! through `serde_json::Value` first so no JSON shape can fail a row.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::ApplicationStatus;

/// Identifier assigned by the Record Store. Opaque to the engine; numeric
/// and textual ids are both carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Numeric(value) => write!(f, "{value}"),
            RecordId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Numeric(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// The `dateApplied` field as received.
///
/// Only `Date` takes part in window filtering; rows with an unparseable or
/// missing date are still listed, counted under "all time" and exported.
/// Non-string values (e.g. `[2025,5,2]`) are kept as their compact JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AppliedOn {
    Date(NaiveDate),
    Unparsed(String),
    #[default]
    Missing,
}

impl<'de> Deserialize<'de> for AppliedOn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => AppliedOn::Missing,
            Value::String(raw) => match raw.parse::<NaiveDate>() {
                Ok(date) => AppliedOn::Date(date),
                Err(_) => AppliedOn::Unparsed(raw),
            },
            other => {
                warn!("Keeping non-string dateApplied value {other} as text");
                AppliedOn::Unparsed(other.to_string())
            }
        })
    }
}

impl AppliedOn {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            AppliedOn::Date(date) => Some(*date),
            AppliedOn::Unparsed(_) | AppliedOn::Missing => None,
        }
    }
}

impl fmt::Display for AppliedOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppliedOn::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            AppliedOn::Unparsed(raw) => f.write_str(raw),
            AppliedOn::Missing => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub position: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    pub date_applied: AppliedOn,
    #[serde(default, deserialize_with = "lenient_notes")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_updated: Option<NaiveDateTime>,
}

impl ApplicationRecord {
    pub fn applied_on(&self) -> Option<NaiveDate> {
        self.date_applied.date()
    }
}

/// Body sent on create and update. Carries no id; the Record Store owns
/// identity and `lastUpdated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInput {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub date_applied: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl ApplicationInput {
    pub fn new(
        company: impl Into<String>,
        position: impl Into<String>,
        status: ApplicationStatus,
        date_applied: NaiveDate,
    ) -> Self {
        Self {
            company: company.into(),
            position: position.into(),
            status,
            date_applied: Some(date_applied),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Prefill for editing an existing record.
    pub fn from_record(record: &ApplicationRecord) -> Self {
        Self {
            company: record.company.clone(),
            position: record.position.clone(),
            status: record.status.clone().unwrap_or_default(),
            date_applied: record.applied_on(),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    /// Company, position and date applied are required.
    pub fn validate(&self) -> Result<(), String> {
        let mut missing = Vec::new();
        if self.company.trim().is_empty() {
            missing.push("Company");
        }
        if self.position.trim().is_empty() {
            missing.push("Position");
        }
        if self.date_applied.is_none() {
            missing.push("Date Applied");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("{} required", missing.join(", ")))
        }
    }
}

/// Text of a scalar; `None` for null. Other shapes keep their JSON text.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_notes<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => Some(match number.as_i64() {
            Some(id) => RecordId::Numeric(id),
            None => RecordId::Text(number.to_string()),
        }),
        other => value_text(other).map(RecordId::Text),
    })
}

/// Blank, `false` and `0` statuses count as no status at all.
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<ApplicationStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = match Value::deserialize(deserializer)? {
        Value::Bool(false) => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::String(text) => Some(text),
        other => {
            if !other.is_null() {
                warn!("Treating non-string status {other} as a label");
            }
            value_text(other)
        }
    };

    Ok(label
        .filter(|label| !label.trim().is_empty())
        .map(ApplicationStatus::from))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match value_text(Value::deserialize(deserializer)?) {
        Some(raw) => raw,
        None => return Ok(None),
    };

    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Ok(Some(naive));
    }
    if let Ok(zoned) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(zoned.with_timezone(&Local).naive_local()));
    }

    warn!("Ignoring unparseable lastUpdated value '{raw}'");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_store_payload() {
        let json = r#"{
            "id": 7,
            "company": "Acme",
            "position": "Engineer",
            "status": "Interviewing",
            "dateApplied": "2025-05-01",
            "notes": null,
            "lastUpdated": "2025-05-02T09:30:15.123456"
        }"#;
        let record: ApplicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(RecordId::Numeric(7)));
        assert_eq!(record.status, Some(ApplicationStatus::Interviewing));
        assert_eq!(record.applied_on(), NaiveDate::from_ymd_opt(2025, 5, 1));
        assert!(record.last_updated.is_some());
    }

    #[test]
    fn tolerates_malformed_fields() {
        let json = r#"{
            "id": "abc",
            "company": null,
            "position": "Engineer",
            "status": "Ghosted",
            "dateApplied": "last tuesday",
            "lastUpdated": "sometime"
        }"#;
        let record: ApplicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(RecordId::Text("abc".into())));
        assert_eq!(record.company, "");
        assert_eq!(record.status, Some(ApplicationStatus::Other("Ghosted".into())));
        assert_eq!(record.date_applied, AppliedOn::Unparsed("last tuesday".into()));
        assert_eq!(record.applied_on(), None);
        assert_eq!(record.last_updated, None);
    }

    #[test]
    fn odd_json_shapes_keep_the_row() {
        let json = r#"[
            {"id": 1, "company": "Acme", "position": "Engineer", "status": "Offer", "dateApplied": "2025-05-02"},
            {"id": 2.5, "company": 3, "position": true, "status": 3, "dateApplied": [2025, 5, 2],
             "notes": {"a": 1}, "lastUpdated": 1714600000}
        ]"#;
        let records: Vec<ApplicationRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].applied_on(), NaiveDate::from_ymd_opt(2025, 5, 2));

        let odd = &records[1];
        assert_eq!(odd.id, Some(RecordId::Text("2.5".into())));
        assert_eq!(odd.company, "3");
        assert_eq!(odd.position, "true");
        assert_eq!(odd.status, Some(ApplicationStatus::Other("3".into())));
        assert_eq!(odd.date_applied, AppliedOn::Unparsed("[2025,5,2]".into()));
        assert_eq!(odd.applied_on(), None);
        assert_eq!(odd.notes.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(odd.last_updated, None);
    }

    #[test]
    fn blank_and_falsy_statuses_are_absent() {
        for raw in [r#""""#, r#""   ""#, "false", "0", "null"] {
            let json = format!(r#"{{"company":"A","position":"B","status":{raw}}}"#);
            let record: ApplicationRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(record.status, None, "status {raw}");
        }
    }

    #[test]
    fn null_and_absent_dates_are_missing() {
        let record: ApplicationRecord =
            serde_json::from_str(r#"{"company":"A","position":"B","dateApplied":null}"#).unwrap();
        assert_eq!(record.date_applied, AppliedOn::Missing);

        let record: ApplicationRecord =
            serde_json::from_str(r#"{"company":"A","position":"B"}"#).unwrap();
        assert_eq!(record.date_applied, AppliedOn::Missing);
    }

    #[test]
    fn input_serializes_wire_shape() {
        let input = ApplicationInput::new(
            "Acme",
            "Engineer",
            ApplicationStatus::Offer,
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        )
        .with_notes("call back");
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "company": "Acme",
                "position": "Engineer",
                "status": "Offer",
                "dateApplied": "2025-01-02",
                "notes": "call back"
            })
        );
    }

    #[test]
    fn validation_lists_missing_fields() {
        let input = ApplicationInput {
            company: "  ".into(),
            position: "Engineer".into(),
            status: ApplicationStatus::Applied,
            date_applied: None,
            notes: String::new(),
        };
        assert_eq!(
            input.validate(),
            Err("Company, Date Applied required".to_string())
        );
    }
}
