//! Presentation model for a single record.
//!
//! Shared by the TUI record screen and headless `#show`, so both apply the
//! same display defaults.

use dossier_core::Record;

/// A record laid out for display, with presentation defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDetails<'a> {
    pub warning: Option<&'a str>,
    pub legacy: bool,
    pub fields: Vec<(&'static str, String)>,
    pub notes: &'a str,
}

impl<'a> RecordDetails<'a> {
    pub fn new(record: &'a Record, legacy_cutoff: Option<&str>) -> Self {
        let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());

        let fields = vec![
            ("Surname", record.surname.clone()),
            ("Forename", record.forename.clone()),
            ("Aliases", "N/A".to_string()),
            ("Record Type", record.record_type.clone()),
            ("Record Classifiers", or_na(&record.classifier)),
            ("Born", or_na(&record.date_of_birth)),
            ("Died", or_na(&record.date_of_death)),
            ("Status", or_na(&record.status)),
            (
                "Nationality",
                record.nationality.clone().unwrap_or_else(|| "USA".to_string()),
            ),
            ("Last Known Address", or_na(&record.last_known_address)),
        ];

        Self {
            warning: record.warning.as_deref(),
            legacy: legacy_cutoff.is_some_and(|cutoff| record.is_legacy(cutoff)),
            fields,
            notes: record.notes.as_deref().unwrap_or("None"),
        }
    }

    /// Plain-text rendering, one field per line
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        if let Some(warning) = self.warning {
            lines.push(format!("NOTE {warning}"));
            lines.push(String::new());
        }
        if self.legacy {
            lines.push("Legacy Record Consult physical original".to_string());
            lines.push(String::new());
        }
        for (label, value) in &self.fields {
            lines.push(format!("{label}: {value}"));
        }
        lines.push(String::new());
        lines.push("Notes:".to_string());
        lines.push(self.notes.to_string());
        lines.join("\n")
    }

    /// Number of lines `to_text` produces
    pub fn line_count(&self) -> usize {
        self.to_text().lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_core::testing::person;

    #[test]
    fn test_presentation_defaults() {
        let record = person("Smith", "John");
        let details = RecordDetails::new(&record, None);
        let text = details.to_text();
        assert!(text.contains("Record Type: Individual"));
        assert!(text.contains("Record Classifiers: N/A"));
        assert!(text.contains("Died: N/A"));
        assert!(text.contains("Status: Alive"));
        assert!(text.contains("Nationality: USA"));
        assert!(text.ends_with("Notes:\nNone"));
        assert!(!details.legacy);
    }

    #[test]
    fn test_warning_and_legacy_banners() {
        let mut record = person("Smith", "John").with_birth("1901-01-01");
        record.warning = Some("Armed and dangerous".to_string());

        let details = RecordDetails::new(&record, Some("1960-01-01"));
        assert!(details.legacy);
        let text = details.to_text();
        assert!(text.starts_with("NOTE Armed and dangerous"));
        assert!(text.contains("Legacy Record"));

        assert!(!RecordDetails::new(&record, None).legacy);
    }
}
