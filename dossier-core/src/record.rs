//! Case record types and the datafile format they are loaded from.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Record type given to records that do not declare one.
pub const DEFAULT_RECORD_TYPE: &str = "Individual";

/// A directed reference from one record to another.
///
/// On disk a relation is a single string, either `"TARGET"` or
/// `"TARGET|Display label"`. It is decoded once at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Relation {
    target: String,
    label: Option<String>,
}

impl Relation {
    /// A bare reference to `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            label: None,
        }
    }

    /// A reference to `target` shown to the operator as `label`.
    pub fn labeled(target: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            target: target.into(),
            label: (!label.is_empty()).then_some(label),
        }
    }

    /// Id of the referenced record.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Text to show for this relation: the label if present, else the target id.
    pub fn caption(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.target)
    }

    /// Whether this relation points at `id`, labeled or not.
    pub fn points_to(&self, id: &str) -> bool {
        self.target == id
    }
}

impl From<String> for Relation {
    fn from(value: String) -> Self {
        match value.split_once('|') {
            Some((target, label)) => Relation::labeled(target, label),
            None => Relation::new(value),
        }
    }
}

impl From<&str> for Relation {
    fn from(value: &str) -> Self {
        Relation::from(value.to_string())
    }
}

impl From<Relation> for String {
    fn from(relation: Relation) -> Self {
        relation.to_string()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}|{}", self.target, label),
            None => f.write_str(&self.target),
        }
    }
}

/// One entry of a record's access/event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    pub id: String,
    pub user: String,
    pub event: String,
}

/// A record exactly as it appears in a datafile, before any defaulting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forename: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_death: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_known_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// First stage at which the record is visible.
    #[serde(
        default,
        deserialize_with = "stage_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub not_before: Option<i64>,
    /// Last stage at which the record is visible.
    #[serde(
        default,
        deserialize_with = "stage_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub not_after: Option<i64>,

    #[serde(default)]
    pub suppress_legacy_warning: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<Relation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventEntry>>,
}

impl RawRecord {
    /// Start a raw record with the two name fields set.
    pub fn named(surname: impl Into<String>, forename: impl Into<String>) -> Self {
        Self {
            surname: Some(surname.into()),
            forename: Some(forename.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_dates(mut self, born: Option<&str>, died: Option<&str>) -> Self {
        self.date_of_birth = born.map(str::to_string);
        self.date_of_death = died.map(str::to_string);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.last_known_address = Some(address.into());
        self
    }

    pub fn with_stage_window(mut self, not_before: Option<i64>, not_after: Option<i64>) -> Self {
        self.not_before = not_before;
        self.not_after = not_after;
        self
    }

    pub fn with_related<I, R>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Relation>,
    {
        self.related = Some(related.into_iter().map(Into::into).collect());
        self
    }
}

/// A normalized, visible case record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub surname: String,
    pub forename: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub status: Option<String>,
    pub classifier: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
    pub last_known_address: Option<String>,
    pub warning: Option<String>,
    pub notes: Option<String>,
    pub not_before: Option<i64>,
    pub not_after: Option<i64>,
    pub suppress_legacy_warning: bool,
    pub related: Vec<Relation>,
    pub events: Vec<EventEntry>,
}

impl Record {
    /// Whether this record predates `cutoff` and should point the operator
    /// at the physical archive instead.
    ///
    /// Both the birth and (if present) death dates must fall before the
    /// cutoff. Records without a birth date are never legacy.
    pub fn is_legacy(&self, cutoff: &str) -> bool {
        if self.suppress_legacy_warning {
            return false;
        }
        let Some(born) = self.date_of_birth.as_deref() else {
            return false;
        };
        born < cutoff
            && self
                .date_of_death
                .as_deref()
                .map_or(true, |died| died < cutoff)
    }

    /// Whether `related` already holds a reference to `id`.
    pub fn relates_to(&self, id: &str) -> bool {
        self.related.iter().any(|r| r.points_to(id))
    }
}

/// Stage numbers may be written as `2` or `2.0`. Fractional stages are rejected.
fn stage_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(stage) = number.as_i64() {
        return Ok(Some(stage));
    }
    match number.as_f64() {
        Some(stage) if stage.fract() == 0.0 && stage.abs() < i64::MAX as f64 => {
            Ok(Some(stage as i64))
        }
        _ => Err(de::Error::custom(format!(
            "stage must be a whole number, got {number}"
        ))),
    }
}

/// One input source: a declared stage and its raw records.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Datafile {
    #[serde(rename = "gameStage", default, deserialize_with = "stage_number")]
    pub game_stage: Option<i64>,
    /// Human-readable captions for points of the story, keyed by stage.
    #[serde(default)]
    pub stages: BTreeMap<String, String>,
    #[serde(default)]
    pub records: Vec<RawRecord>,
}

impl Datafile {
    pub fn new(game_stage: Option<i64>, records: Vec<RawRecord>) -> Self {
        Self {
            game_stage,
            stages: BTreeMap::new(),
            records,
        }
    }

    /// Parse a datafile. A bare JSON array is accepted as a list of records
    /// with no declared stage.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if value.is_array() {
            let records: Vec<RawRecord> = serde_json::from_value(value)?;
            Ok(Self::new(None, records))
        } else {
            serde_json::from_value(value)
        }
    }

    /// Caption for `stage`, if the file declares one.
    pub fn stage_caption(&self, stage: i64) -> Option<&str> {
        self.stages.get(&stage.to_string()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_decoding() {
        let bare = Relation::from("SMITH, JOHN");
        assert_eq!(bare.target(), "SMITH, JOHN");
        assert_eq!(bare.label(), None);
        assert_eq!(bare.caption(), "SMITH, JOHN");

        let labeled = Relation::from("SMITH, JOHN|Brother");
        assert_eq!(labeled.target(), "SMITH, JOHN");
        assert_eq!(labeled.label(), Some("Brother"));
        assert_eq!(labeled.caption(), "Brother");
        assert_eq!(labeled.to_string(), "SMITH, JOHN|Brother");
    }

    #[test]
    fn test_relation_label_keeps_later_pipes() {
        let relation = Relation::from("A|left|right");
        assert_eq!(relation.target(), "A");
        assert_eq!(relation.label(), Some("left|right"));
    }

    #[test]
    fn test_relation_empty_label_is_bare() {
        let relation = Relation::from("A|");
        assert_eq!(relation.label(), None);
        assert!(relation.points_to("A"));
    }

    #[test]
    fn test_raw_record_camel_case_fields() {
        let json = r#"{
            "surname": "Smith",
            "forename": "John",
            "type": "Organisation",
            "dateOfBirth": "1950-01-01",
            "lastKnownAddress": "12 Elm St",
            "notBefore": 2,
            "suppressLegacyWarning": true,
            "related": ["DOE, JANE|Wife"],
            "events": [{"id": "1", "user": "agent", "event": "created"}]
        }"#;
        let raw: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(raw.record_type.as_deref(), Some("Organisation"));
        assert_eq!(raw.date_of_birth.as_deref(), Some("1950-01-01"));
        assert_eq!(raw.last_known_address.as_deref(), Some("12 Elm St"));
        assert_eq!(raw.not_before, Some(2));
        assert!(raw.suppress_legacy_warning);
        assert_eq!(raw.related.unwrap()[0].label(), Some("Wife"));
        assert_eq!(raw.events.unwrap()[0].user, "agent");
    }

    #[test]
    fn test_datafile_accepts_bare_array() {
        let file = Datafile::from_json(r#"[{"surname": "Doe", "forename": "Jane"}]"#).unwrap();
        assert_eq!(file.game_stage, None);
        assert_eq!(file.records.len(), 1);
    }

    #[test]
    fn test_datafile_stage_captions() {
        let file = Datafile::from_json(
            r#"{"gameStage": 3, "stages": {"3": "After the fire"}, "records": []}"#,
        )
        .unwrap();
        assert_eq!(file.game_stage, Some(3));
        assert_eq!(file.stage_caption(3), Some("After the fire"));
        assert_eq!(file.stage_caption(4), None);
    }

    #[test]
    fn test_stage_numbers_accept_whole_floats() {
        let file = Datafile::from_json(
            r#"{"gameStage": 2.0, "records": [{"surname": "Doe", "forename": "Jane", "notBefore": 1.0, "notAfter": null}]}"#,
        )
        .unwrap();
        assert_eq!(file.game_stage, Some(2));
        assert_eq!(file.records[0].not_before, Some(1));
        assert_eq!(file.records[0].not_after, None);
    }

    #[test]
    fn test_fractional_stage_rejected() {
        let err = Datafile::from_json(r#"{"gameStage": 2.5, "records": []}"#).unwrap_err();
        assert!(err.to_string().contains("whole number"));
    }

    fn record_with_dates(born: Option<&str>, died: Option<&str>) -> Record {
        crate::normalize::normalize(RawRecord::named("Old", "Timer").with_dates(born, died), 1)
            .unwrap()
    }

    #[test]
    fn test_legacy_predicate() {
        let cutoff = "1960-01-01";
        assert!(record_with_dates(Some("1900-05-01"), None).is_legacy(cutoff));
        assert!(record_with_dates(Some("1900-05-01"), Some("1950-01-01")).is_legacy(cutoff));
        assert!(!record_with_dates(Some("1900-05-01"), Some("1970-01-01")).is_legacy(cutoff));
        assert!(!record_with_dates(Some("1970-05-01"), None).is_legacy(cutoff));
        assert!(!record_with_dates(None, None).is_legacy(cutoff));
    }

    #[test]
    fn test_legacy_suppressed() {
        let mut record = record_with_dates(Some("1900-05-01"), None);
        record.suppress_legacy_warning = true;
        assert!(!record.is_legacy("1960-01-01"));
    }
}
