//! Per-record defaulting and stage visibility.

use crate::record::{RawRecord, Record, DEFAULT_RECORD_TYPE};

/// Whether a record with the given window is visible at `stage`.
///
/// A missing lower bound is 0 and a missing upper bound is unbounded.
pub fn is_visible(not_before: Option<i64>, not_after: Option<i64>, stage: i64) -> bool {
    let min = not_before.unwrap_or(0);
    let max = not_after.unwrap_or(i64::MAX);
    min <= stage && stage <= max
}

/// Default id for a record: `"SURNAME, FORENAME"` upper-cased.
pub fn default_id(surname: &str, forename: &str) -> String {
    format!("{surname}, {forename}").to_uppercase()
}

/// Normalize one raw record for the given stage.
///
/// Returns `None` when the record is not visible at `stage`.
pub fn normalize(raw: RawRecord, stage: i64) -> Option<Record> {
    if !is_visible(raw.not_before, raw.not_after, stage) {
        return None;
    }

    let RawRecord {
        id,
        surname,
        forename,
        record_type,
        status,
        classifier,
        nationality,
        mut date_of_birth,
        mut date_of_death,
        last_known_address,
        warning,
        notes,
        not_before,
        not_after,
        suppress_legacy_warning,
        related,
        events,
    } = raw;

    let record_type = record_type.unwrap_or_else(|| DEFAULT_RECORD_TYPE.to_string());

    // Dataset correction, not an error.
    let reversed = matches!(
        (&date_of_birth, &date_of_death),
        (Some(born), Some(died)) if died < born
    );
    if reversed {
        std::mem::swap(&mut date_of_birth, &mut date_of_death);
    }

    let status = status.or_else(|| {
        (record_type == DEFAULT_RECORD_TYPE).then(|| {
            if date_of_death.is_some() {
                "Deceased".to_string()
            } else {
                "Alive".to_string()
            }
        })
    });

    let surname = surname.unwrap_or_default();
    let forename = forename.unwrap_or_default();
    let id = id.unwrap_or_else(|| default_id(&surname, &forename));

    Some(Record {
        id,
        surname,
        forename,
        record_type,
        status,
        classifier,
        nationality,
        date_of_birth,
        date_of_death,
        last_known_address,
        warning,
        notes,
        not_before,
        not_after,
        suppress_legacy_warning,
        related: related.unwrap_or_default(),
        events: events.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_defaulting() {
        let record = normalize(RawRecord::named("Smith", "John"), 1).unwrap();
        assert_eq!(record.id, "SMITH, JOHN");
    }

    #[test]
    fn test_explicit_id_kept() {
        let record = normalize(RawRecord::named("Smith", "John").with_id("X-17"), 1).unwrap();
        assert_eq!(record.id, "X-17");
    }

    #[test]
    fn test_type_and_status_defaults() {
        let alive = normalize(RawRecord::named("Smith", "John"), 1).unwrap();
        assert_eq!(alive.record_type, "Individual");
        assert_eq!(alive.status.as_deref(), Some("Alive"));

        let dead = normalize(
            RawRecord::named("Smith", "Jane").with_dates(Some("1901-01-01"), Some("1950-01-01")),
            1,
        )
        .unwrap();
        assert_eq!(dead.status.as_deref(), Some("Deceased"));
    }

    #[test]
    fn test_explicit_status_kept() {
        let record = normalize(
            RawRecord::named("Smith", "John")
                .with_status("Missing")
                .with_dates(None, Some("1950-01-01")),
            1,
        )
        .unwrap();
        assert_eq!(record.status.as_deref(), Some("Missing"));
    }

    #[test]
    fn test_non_individual_has_no_default_status() {
        let record =
            normalize(RawRecord::named("Acme", "Holdings").with_type("Organisation"), 1).unwrap();
        assert_eq!(record.record_type, "Organisation");
        assert_eq!(record.status, None);
    }

    #[test]
    fn test_reversed_dates_are_swapped() {
        let record = normalize(
            RawRecord::named("Smith", "John").with_dates(Some("1990-01-01"), Some("1920-06-01")),
            1,
        )
        .unwrap();
        assert_eq!(record.date_of_birth.as_deref(), Some("1920-06-01"));
        assert_eq!(record.date_of_death.as_deref(), Some("1990-01-01"));
    }

    #[test]
    fn test_ordered_dates_untouched() {
        let record = normalize(
            RawRecord::named("Smith", "John").with_dates(Some("1920-06-01"), Some("1990-01-01")),
            1,
        )
        .unwrap();
        assert_eq!(record.date_of_birth.as_deref(), Some("1920-06-01"));
        assert_eq!(record.date_of_death.as_deref(), Some("1990-01-01"));
    }

    #[test]
    fn test_stage_window_boundaries() {
        let raw = RawRecord::named("Smith", "John").with_stage_window(Some(5), Some(10));
        assert!(normalize(raw.clone(), 4).is_none());
        assert!(normalize(raw.clone(), 5).is_some());
        assert!(normalize(raw.clone(), 10).is_some());
        assert!(normalize(raw, 11).is_none());
    }

    #[test]
    fn test_open_window_defaults() {
        assert!(is_visible(None, None, 0));
        assert!(is_visible(None, None, i64::MAX));
        assert!(!is_visible(None, None, -1));
        assert!(is_visible(Some(3), None, 1_000_000));
    }

    #[test]
    fn test_missing_names_are_empty() {
        let record = normalize(RawRecord::default(), 1).unwrap();
        assert_eq!(record.surname, "");
        assert_eq!(record.forename, "");
        assert_eq!(record.id, ", ");
    }
}
