//! Selector search over the working record set.
//!
//! A selector is what the operator types at the search prompt. It is matched
//! against record ids, surnames, forenames and (optionally) addresses, then
//! ranked by name and checked against the result-size policy.

use crate::config::SearchConfig;
use crate::error::LinkError;
use crate::links::build_index;
use crate::record::{Record, Relation};
use std::collections::HashMap;
use tracing::debug;

/// Selector that lists every record when enabled.
pub const ALL_SELECTOR: &str = "all";

/// How a query went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Results are ready to display.
    Ok,
    /// Selector too short, or it matched more records than the ceiling.
    TooImprecise,
    /// Well-formed selector that matched nothing.
    NoResults,
    /// The selector names an operation that is switched off.
    Denied,
}

/// Status plus the ranked results (empty unless the status is `Ok`).
#[derive(Debug, Clone)]
pub struct QueryOutcome<'a> {
    pub status: QueryStatus,
    pub results: Vec<&'a Record>,
    /// Raw match count before the size policy was applied.
    pub matched: usize,
}

impl<'a> QueryOutcome<'a> {
    fn rejected(status: QueryStatus, matched: usize) -> Self {
        Self {
            status,
            results: Vec::new(),
            matched,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == QueryStatus::Ok
    }
}

/// A selector after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selector {
    /// Lower-cased, cut at the first `|`. Used for ids and addresses.
    raw: String,
    /// `raw` with `", "` collapsed to a single space. Used for names.
    terms: String,
}

impl Selector {
    fn parse(selector: &str) -> Self {
        let lower = selector.to_lowercase();
        let raw = match lower.split_once('|') {
            Some((reference, _label)) => reference.to_string(),
            None => lower,
        };
        let terms = raw.replace(", ", " ");
        Self { raw, terms }
    }

    fn len(&self) -> usize {
        self.raw.chars().count()
    }

    fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    fn is_exact_id(&self, id: &str) -> bool {
        let id = id.to_lowercase();
        id == self.terms || id == self.raw
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    Exact,
    Partial,
}

/// Read-only search over the linked working set.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    records: Vec<Record>,
    index: HashMap<String, usize>,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(records: Vec<Record>, config: SearchConfig) -> Self {
        let index = build_index(&records);
        Self {
            records,
            index,
            config,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run a selector against the working set.
    pub fn query(&self, selector: &str) -> QueryOutcome<'_> {
        let selector = Selector::parse(selector);

        if selector.terms == ALL_SELECTOR {
            if !self.config.allow_all_query {
                debug!("all-records query denied");
                return QueryOutcome::rejected(QueryStatus::Denied, 0);
            }
            let mut results: Vec<&Record> = self.records.iter().collect();
            sort_results(&mut results);
            return finish(results);
        }

        let matches: Vec<(&Record, Match)> = self
            .records
            .iter()
            .filter_map(|record| self.match_record(record, &selector).map(|m| (record, m)))
            .collect();

        let too_short = !selector.is_empty() && selector.len() < self.config.min_selector_length;
        let mut results: Vec<&Record> = if too_short {
            // Only exact id hits survive a short selector.
            let exact: Vec<&Record> = matches
                .iter()
                .filter(|(_, m)| *m == Match::Exact)
                .map(|(record, _)| *record)
                .collect();
            if exact.is_empty() {
                debug!(matched = matches.len(), "selector too short");
                return QueryOutcome::rejected(QueryStatus::TooImprecise, matches.len());
            }
            exact
        } else {
            matches.into_iter().map(|(record, _)| record).collect()
        };

        if results.len() > self.config.max_results {
            debug!(matched = results.len(), "selector matched too many records");
            return QueryOutcome::rejected(QueryStatus::TooImprecise, results.len());
        }

        sort_results(&mut results);
        finish(results)
    }

    /// Find a record by id. Exact ids win over case-insensitive ones.
    pub fn lookup(&self, id: &str) -> Option<&Record> {
        if let Some(&position) = self.index.get(id) {
            return self.records.get(position);
        }
        let id = id.to_lowercase();
        self.records
            .iter()
            .rev()
            .find(|record| record.id.to_lowercase() == id)
    }

    /// Resolve a relation to the record it points at.
    pub fn follow(&self, relation: &Relation) -> Result<&Record, LinkError> {
        self.lookup(relation.target())
            .ok_or_else(|| LinkError::Unavailable {
                target: relation.target().to_string(),
            })
    }

    fn match_record(&self, record: &Record, selector: &Selector) -> Option<Match> {
        if selector.is_exact_id(&record.id) {
            return Some(Match::Exact);
        }

        let surname = record.surname.to_lowercase();
        let matched = match selector.terms.split_once(' ') {
            Some((surname_prefix, forename_prefix)) => {
                let by_name = surname.starts_with(surname_prefix)
                    && record.forename.to_lowercase().starts_with(forename_prefix);
                by_name || (self.config.allow_address_search && self.address_matches(record, selector))
            }
            None => surname.starts_with(&selector.terms),
        };

        matched.then_some(Match::Partial)
    }

    fn address_matches(&self, record: &Record, selector: &Selector) -> bool {
        record
            .last_known_address
            .as_deref()
            .is_some_and(|address| address.to_lowercase().contains(&selector.raw))
    }
}

fn finish(results: Vec<&Record>) -> QueryOutcome<'_> {
    if results.is_empty() {
        QueryOutcome::rejected(QueryStatus::NoResults, 0)
    } else {
        QueryOutcome {
            status: QueryStatus::Ok,
            matched: results.len(),
            results,
        }
    }
}

/// Order by surname, then forename (both case-insensitive), then date of
/// birth. The sort is stable, so remaining ties keep input order.
pub fn sort_results(results: &mut [&Record]) {
    results.sort_by_cached_key(|record| {
        (
            record.surname.to_lowercase(),
            record.forename.to_lowercase(),
            record.date_of_birth.clone(),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{person, record};

    fn engine(records: Vec<Record>) -> SearchEngine {
        SearchEngine::new(records, SearchConfig::default())
    }

    fn names(outcome: &QueryOutcome<'_>) -> Vec<String> {
        outcome
            .results
            .iter()
            .map(|r| format!("{}/{}", r.surname, r.forename))
            .collect()
    }

    #[test]
    fn test_selector_normalization() {
        let selector = Selector::parse("Smith, John|Brother");
        assert_eq!(selector.raw, "smith, john");
        assert_eq!(selector.terms, "smith john");
    }

    #[test]
    fn test_surname_prefix() {
        let engine = engine(vec![person("Smith", "John"), person("Smithers", "Wayland"), person("Jones", "Ann")]);
        let outcome = engine.query("smit");
        assert_eq!(outcome.status, QueryStatus::Ok);
        assert_eq!(names(&outcome), vec!["Smith/John", "Smithers/Wayland"]);
    }

    #[test]
    fn test_two_token_narrowing() {
        let engine = engine(vec![person("Smith", "John"), person("Smith", "Jane")]);
        assert_eq!(engine.query("smith").results.len(), 2);

        let outcome = engine.query("smith john");
        assert_eq!(names(&outcome), vec!["Smith/John"]);
    }

    #[test]
    fn test_comma_separated_selector() {
        let engine = engine(vec![person("Smith", "John"), person("Smith", "Jane")]);
        let outcome = engine.query("SMITH, JA");
        assert_eq!(names(&outcome), vec!["Smith/Jane"]);
    }

    #[test]
    fn test_second_token_is_remainder() {
        let engine = engine(vec![person("Van", "Der Berg"), person("Van", "Dyke")]);
        let outcome = engine.query("van der b");
        assert_eq!(names(&outcome), vec!["Van/Der Berg"]);
    }

    #[test]
    fn test_exact_id_precedence() {
        let engine = engine(vec![
            record("X1", "Zed", "Anon"),
            person("Xavier", "Charles"),
        ]);
        // Shorter than the minimum, and no surname starts with "x1".
        let outcome = engine.query("x1");
        assert_eq!(outcome.status, QueryStatus::Ok);
        assert_eq!(names(&outcome), vec!["Zed/Anon"]);
    }

    #[test]
    fn test_exact_id_with_label() {
        let engine = engine(vec![person("Smith", "John")]);
        let outcome = engine.query("SMITH, JOHN|Brother");
        assert_eq!(outcome.status, QueryStatus::Ok);
        assert_eq!(outcome.results[0].id, "SMITH, JOHN");
    }

    #[test]
    fn test_short_selector_is_imprecise() {
        let engine = engine(vec![person("Smith", "John")]);
        let outcome = engine.query("smi");
        assert_eq!(outcome.status, QueryStatus::TooImprecise);
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn test_size_policy_distinction() {
        let records = (0..25)
            .map(|i| person("Smith", &format!("Child{i:02}")))
            .collect();
        let engine = engine(records);

        let too_many = engine.query("smith");
        assert_eq!(too_many.status, QueryStatus::TooImprecise);
        assert_eq!(too_many.matched, 25);
        assert!(too_many.results.is_empty());

        let none = engine.query("jones");
        assert_eq!(none.status, QueryStatus::NoResults);
        assert!(none.results.is_empty());
    }

    #[test]
    fn test_exactly_max_results_is_ok() {
        let records = (0..20).map(|i| person("Smith", &format!("Child{i:02}"))).collect();
        let engine = engine(records);
        assert_eq!(engine.query("smith").status, QueryStatus::Ok);
    }

    #[test]
    fn test_sort_determinism() {
        let engine = engine(vec![person("B", "Z"), person("A", "Y"), person("A", "X")]);
        let outcome = engine.query("");
        assert_eq!(names(&outcome), vec!["A/X", "A/Y", "B/Z"]);
    }

    #[test]
    fn test_sort_by_birth_then_input_order() {
        let engine = engine(vec![
            record("S3", "Smith", "John").with_birth("1960-01-01"),
            record("S1", "smith", "john").with_birth("1950-01-01"),
            record("S4", "Smith", "John").with_birth("1960-01-01"),
        ]);
        let ids: Vec<&str> = engine.query("smith").results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S3", "S4"]);
    }

    #[test]
    fn test_address_search() {
        let records = vec![
            person("Smith", "John").with_address("12 Elm Street, Springfield"),
            person("Jones", "Ann").with_address("4 Oak Road"),
        ];
        let enabled = engine(records.clone());
        let outcome = enabled.query("elm street");
        assert_eq!(names(&outcome), vec!["Smith/John"]);

        let disabled = SearchEngine::new(records, SearchConfig::default().with_address_search(false));
        assert_eq!(disabled.query("elm street").status, QueryStatus::NoResults);
    }

    #[test]
    fn test_no_address_fallback_for_single_word() {
        let engine = engine(vec![person("Smith", "John").with_address("Springfield")]);
        assert_eq!(engine.query("springfield").status, QueryStatus::NoResults);
    }

    #[test]
    fn test_all_selector_gated() {
        let records: Vec<Record> = (0..30).map(|i| person("Smith", &format!("Child{i:02}"))).collect();

        let gated = engine(records.clone());
        let denied = gated.query("ALL");
        assert_eq!(denied.status, QueryStatus::Denied);
        assert!(denied.results.is_empty());

        let allowed = SearchEngine::new(records, SearchConfig::default().with_all_query(true));
        let outcome = allowed.query("all");
        assert_eq!(outcome.status, QueryStatus::Ok);
        assert_eq!(outcome.results.len(), 30);
    }

    #[test]
    fn test_missing_names_match_as_empty() {
        let engine = engine(vec![record("NONAME", "", "")]);
        assert_eq!(engine.query("smith").status, QueryStatus::NoResults);
        assert_eq!(engine.query("noname").status, QueryStatus::Ok);
    }

    #[test]
    fn test_follow_and_dangling() {
        let engine = SearchEngine::new(
            vec![
                record("A", "Alpha", "One").with_related(["B|Partner", "ZZZ"]),
                record("B", "Beta", "Two"),
            ],
            SearchConfig::default().with_min_selector_length(1),
        );
        let relations = &engine.records()[0].related;
        assert_eq!(engine.follow(&relations[0]).unwrap().id, "B");
        assert_eq!(
            engine.follow(&relations[1]),
            Err(LinkError::Unavailable { target: "ZZZ".to_string() })
        );

        let outcome = engine.query("ZZZ");
        assert_eq!(outcome.status, QueryStatus::NoResults);
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let engine = engine(vec![person("Smith", "John")]);
        assert!(engine.lookup("smith, john").is_some());
        assert!(engine.lookup("SMITH, JANE").is_none());
    }

    #[test]
    fn test_query_does_not_mutate() {
        let engine = engine(vec![person("Smith", "John"), person("Smith", "Jane")]);
        let before = engine.records().to_vec();
        let _ = engine.query("smith");
        let _ = engine.query("all");
        assert_eq!(engine.records(), before.as_slice());
    }
}
