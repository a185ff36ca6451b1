//! Headless mode for the dossier.
//!
//! A line-oriented interface for scripted sessions and automated testing.
//! Lines starting with `#` are commands; every other non-empty line is a
//! search selector.

use std::io::{self, BufRead, Write};

use dossier_core::{QueryStatus, Record, SearchEngine};
use tracing::info;

use crate::app::SessionInfo;
use crate::details::RecordDetails;

const HELP: &[&str] = &[
    "  <selector>      - Search by surname, \"surname forename\" or exact id",
    "  #show <id>      - Show a record",
    "  #related <id>   - List a record's related entries",
    "  #events <id>    - Show a record's event log",
    "  #stage          - Show the current stage",
    "  #help           - Show this help",
    "  #quit           - Exit",
];

/// Run the line protocol over the given streams until `#quit` or end of input.
pub fn run_headless<R, W>(
    engine: &SearchEngine,
    session: &SessionInfo,
    input: R,
    mut out: W,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "=== Dossier Headless Mode ===")?;
    writeln!(out, "Records: {}", engine.len())?;
    write_stage(&mut out, session)?;
    writeln!(out, "Type #help for commands.")?;
    writeln!(out)?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('#') {
            let (name, arg) = match command.split_once(char::is_whitespace) {
                Some((name, arg)) => (name, arg.trim()),
                None => (command, ""),
            };

            match name {
                "quit" | "exit" => {
                    writeln!(out, "Goodbye.")?;
                    break;
                }
                "show" => with_record(&mut out, engine, arg, |out, record| {
                    let details = RecordDetails::new(record, session.legacy_cutoff.as_deref());
                    writeln!(out, "[RECORD] {}", record.id)?;
                    writeln!(out, "{}", details.to_text())
                })?,
                "related" => with_record(&mut out, engine, arg, |out, record| {
                    writeln!(out, "[RELATED] {}", record.related.len())?;
                    for relation in &record.related {
                        let marker = match engine.follow(relation) {
                            Ok(_) => "available",
                            Err(_) => "unavailable",
                        };
                        writeln!(out, "  {} -> {} ({marker})", relation.caption(), relation.target())?;
                    }
                    Ok(())
                })?,
                "events" => with_record(&mut out, engine, arg, |out, record| {
                    writeln!(out, "[EVENTS] {}", record.events.len())?;
                    for entry in &record.events {
                        writeln!(out, "  {} | {} | {}", entry.id, entry.user, entry.event)?;
                    }
                    Ok(())
                })?,
                "stage" => write_stage(&mut out, session)?,
                "help" => {
                    writeln!(out, "[HELP]")?;
                    for line in HELP {
                        writeln!(out, "{line}")?;
                    }
                }
                _ => writeln!(out, "[ERROR] Unknown command. Type #help for help.")?,
            }
            out.flush()?;
            continue;
        }

        let outcome = engine.query(line);
        info!(selector = %line, status = ?outcome.status, matched = outcome.matched, "search");

        match outcome.status {
            QueryStatus::Ok => {
                writeln!(out, "[OK] {}", outcome.results.len())?;
                for record in &outcome.results {
                    writeln!(out, "{}", summary_line(record))?;
                }
            }
            QueryStatus::TooImprecise => writeln!(out, "[TOO MANY RESULTS]")?,
            QueryStatus::NoResults => writeln!(out, "[NON-RESPONSIVE QUERY]")?,
            QueryStatus::Denied => writeln!(out, "[ACCESS DENIED]")?,
        }
        out.flush()?;
    }

    Ok(())
}

fn write_stage<W: Write>(out: &mut W, session: &SessionInfo) -> io::Result<()> {
    match &session.stage_caption {
        Some(caption) => writeln!(out, "[STAGE] {} ({caption})", session.stage),
        None => writeln!(out, "[STAGE] {}", session.stage),
    }
}

fn with_record<W, F>(out: &mut W, engine: &SearchEngine, id: &str, f: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce(&mut W, &Record) -> io::Result<()>,
{
    if id.is_empty() {
        return writeln!(out, "[ERROR] Usage: #<command> <id>");
    }
    match engine.lookup(id) {
        Some(record) => f(out, record),
        None => writeln!(out, "[UNAVAILABLE] {id}"),
    }
}

/// One result row: names upper-cased like the results table
fn summary_line(record: &Record) -> String {
    format!(
        "  {} | {} | {} | {} | {}",
        record.id,
        record.surname.to_uppercase(),
        record.forename.to_uppercase(),
        record.date_of_birth.as_deref().unwrap_or("-"),
        record.status.as_deref().unwrap_or("-"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_core::testing::{person, record};
    use dossier_core::{EventEntry, Relation, SearchConfig};
    use std::io::Cursor;

    fn run(engine: &SearchEngine, script: &str) -> String {
        let session = SessionInfo {
            stage: 3,
            stage_caption: Some("After the fire".to_string()),
            legacy_cutoff: Some("1960-01-01".to_string()),
        };
        let mut out = Vec::new();
        run_headless(engine, &session, Cursor::new(script), &mut out).expect("headless run");
        String::from_utf8(out).expect("utf8 output")
    }

    fn engine() -> SearchEngine {
        let mut smith = person("Smith", "John").with_related(vec![
            Relation::labeled("DOE, JANE", "Neighbour"),
            Relation::new("GONE"),
        ]);
        smith.events.push(EventEntry {
            id: "E1".to_string(),
            user: "admin".to_string(),
            event: "Record created".to_string(),
        });
        SearchEngine::new(
            vec![smith, person("Doe", "Jane"), record("X1", "Smithers", "Wayland")],
            SearchConfig::default(),
        )
    }

    #[test]
    fn test_search_statuses() {
        let engine = engine();
        let output = run(&engine, "smith\nnobody\nall\n#quit\nsmith\n");

        assert!(output.contains("[OK] 2"));
        assert!(output.contains("SMITH | JOHN"));
        assert!(output.contains("[NON-RESPONSIVE QUERY]"));
        assert!(output.contains("[ACCESS DENIED]"));
        assert!(output.contains("Goodbye."));
        // Nothing after #quit is processed
        assert_eq!(output.matches("[OK]").count(), 1);
    }

    #[test]
    fn test_too_many_results() {
        let records = (0..25).map(|i| person("Smith", &format!("Child{i}"))).collect();
        let engine = SearchEngine::new(records, SearchConfig::default());
        assert!(run(&engine, "smith\n").contains("[TOO MANY RESULTS]"));
    }

    #[test]
    fn test_record_commands() {
        let engine = engine();
        let output = run(&engine, "#show smith, john\n#related SMITH, JOHN\n#events SMITH, JOHN\n#show NOPE\n");

        assert!(output.contains("[RECORD] SMITH, JOHN"));
        assert!(output.contains("Nationality: USA"));
        assert!(output.contains("Neighbour -> DOE, JANE (available)"));
        assert!(output.contains("GONE -> GONE (unavailable)"));
        assert!(output.contains("E1 | admin | Record created"));
        assert!(output.contains("[UNAVAILABLE] NOPE"));
    }

    #[test]
    fn test_stage_and_help() {
        let engine = engine();
        let output = run(&engine, "#stage\n#help\n#bogus\n");
        assert!(output.contains("[STAGE] 3 (After the fire)"));
        assert!(output.contains("#related <id>"));
        assert!(output.contains("[ERROR] Unknown command"));
    }
}
