//! The atomic persisted unit: one logged incident ticket.

use crate::error::StoreError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp text format used on disk and in display output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One logged incident ticket.
///
/// Records are created only through [`crate::store::Store::insert`] and are
/// never mutated afterwards; an edit is modeled as delete + reinsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier, unique within the collection.
    pub id: u64,
    /// Incident label. Non-empty, contains "INC" case-insensitively.
    pub incident: String,
    /// Handling agent. Opaque text at this level; the presentation layer
    /// restricts it to a fixed roster.
    pub agent: String,
    /// Creation time, second precision.
    #[serde(with = "timestamp_text")]
    pub logged_at: NaiveDateTime,
}

impl Record {
    /// Render the timestamp in the canonical `YYYY-MM-DD HH:MM:SS` form.
    #[must_use]
    pub fn logged_at_text(&self) -> String {
        self.logged_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Validate incident text: non-empty and contains the substring "INC" in
/// any case.
///
/// # Errors
///
/// Returns [`StoreError::InvalidIncident`] with the offending text.
pub fn validate_incident(incident: &str) -> Result<(), StoreError> {
    if incident.is_empty() || !incident.to_ascii_uppercase().contains("INC") {
        return Err(StoreError::InvalidIncident(incident.to_string()));
    }
    Ok(())
}

/// Serde adapter for `NaiveDateTime` as `YYYY-MM-DD HH:MM:SS` text.
pub mod timestamp_text {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serialize as formatted text.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    /// Deserialize from formatted text.
    ///
    /// # Errors
    ///
    /// Fails when the text does not match the canonical format.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT).map_err(|err| {
            D::Error::custom(format!("invalid timestamp '{text}': {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, validate_incident};
    use crate::error::StoreError;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .expect("valid date")
            .and_hms_opt(h, mi, s)
            .expect("valid time")
    }

    #[test]
    fn incident_must_contain_inc_any_case() {
        assert!(validate_incident("INC042").is_ok());
        assert!(validate_incident("inc-42").is_ok());
        assert!(validate_incident("reIncident").is_ok());

        assert!(matches!(
            validate_incident("TICKET-1"),
            Err(StoreError::InvalidIncident(text)) if text == "TICKET-1"
        ));
        assert!(matches!(
            validate_incident(""),
            Err(StoreError::InvalidIncident(_))
        ));
    }

    #[test]
    fn timestamp_text_is_canonical() {
        let record = Record {
            id: 1,
            incident: "INC001".into(),
            agent: "Agent 1".into(),
            logged_at: at(2024, 5, 15, 9, 3, 7),
        };
        assert_eq!(record.logged_at_text(), "2024-05-15 09:03:07");
    }

    #[test]
    fn record_json_roundtrip_keeps_timestamp_format() {
        let record = Record {
            id: 7,
            incident: "INC777".into(),
            agent: "Agent 2".into(),
            logged_at: at(2024, 12, 31, 23, 59, 59),
        };
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"2024-12-31 23:59:59\""));
        let back: Record = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, record);
    }

    #[test]
    fn timestamp_parse_rejects_other_formats() {
        let json = r#"{"id":1,"incident":"INC1","agent":"a","logged_at":"2024-05-15T10:00:00"}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }
}
