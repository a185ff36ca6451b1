//! Fixture builders for tests.
//!
//! Records built here are already normalized at stage 1, so they can be fed
//! straight into `links::resolve` or a `SearchEngine`.

use crate::normalize::normalize;
use crate::record::{RawRecord, Record, Relation};

/// A visible record with the default id `"SURNAME, FORENAME"`.
pub fn person(surname: &str, forename: &str) -> Record {
    build(RawRecord::named(surname, forename))
}

/// A visible record with an explicit id.
pub fn record(id: &str, surname: &str, forename: &str) -> Record {
    build(RawRecord::named(surname, forename).with_id(id))
}

fn build(raw: RawRecord) -> Record {
    match normalize(raw, 1) {
        Some(record) => record,
        None => unreachable!("fixture records have no stage window"),
    }
}

impl Record {
    /// Replace `related` with the given references.
    pub fn with_related<I, R>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Relation>,
    {
        self.related = related.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.last_known_address = Some(address.to_string());
        self
    }

    pub fn with_birth(mut self, date: &str) -> Self {
        self.date_of_birth = Some(date.to_string());
        self
    }
}
