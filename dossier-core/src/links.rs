//! Backlink injection between related records.

use crate::record::{Record, Relation};
use std::collections::HashMap;
use tracing::debug;

/// Map each id to the position of the last record carrying it.
pub fn build_index(records: &[Record]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        if index.insert(record.id.clone(), position).is_some() {
            debug!(id = %record.id, "duplicate record id, later record wins");
        }
    }
    index
}

/// Make every relation navigable in both directions.
///
/// For each record R relating to a known record T, T gains a bare relation
/// back to R unless it already points at R. Relations to unknown ids are
/// left as they are. Running this over an already resolved set is a no-op.
pub fn resolve(mut records: Vec<Record>) -> Vec<Record> {
    let index = build_index(&records);
    let mut injected = 0usize;

    for position in 0..records.len() {
        let source_id = records[position].id.clone();
        let targets: Vec<usize> = records[position]
            .related
            .iter()
            .filter_map(|relation| index.get(relation.target()).copied())
            .collect();

        for target in targets {
            let target = &mut records[target];
            if !target.relates_to(&source_id) {
                target.related.push(Relation::new(source_id.clone()));
                injected += 1;
            }
        }
    }

    debug!(records = records.len(), injected, "resolved backlinks");
    records
}
