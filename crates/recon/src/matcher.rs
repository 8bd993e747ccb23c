use std::collections::BTreeMap;

use log::warn;

use crate::config::Thresholds;
use crate::model::{Field, FieldKind, Record};
use crate::names::names_match;
use crate::similarity::similar;

/// One key of the full outer join. At least one side is always present.
#[derive(Debug, Clone)]
pub struct JoinedPair {
    pub key: String,
    pub left: Option<Record>,
    pub right: Option<Record>,
}

/// Full outer join of two normalized record sets on the join key: every key
/// present in either input yields exactly one pair. Within a source, the
/// first occurrence of a duplicate key wins.
pub fn outer_join(left: &[Record], right: &[Record]) -> Vec<JoinedPair> {
    let left_map = index_by_key(left);
    let right_map = index_by_key(right);

    let mut pairs = Vec::with_capacity(left_map.len() + right_map.len());
    for (key, left_record) in &left_map {
        pairs.push(JoinedPair {
            key: key.clone(),
            left: Some((*left_record).clone()),
            right: right_map.get(key).map(|r| (*r).clone()),
        });
    }
    for (key, right_record) in &right_map {
        if !left_map.contains_key(key) {
            pairs.push(JoinedPair {
                key: key.clone(),
                left: None,
                right: Some((*right_record).clone()),
            });
        }
    }
    pairs
}

fn index_by_key(records: &[Record]) -> BTreeMap<String, &Record> {
    let mut map: BTreeMap<String, &Record> = BTreeMap::new();
    for record in records {
        if map.contains_key(&record.key) {
            warn!(
                "source '{}': duplicate key '{}', keeping first occurrence",
                record.source, record.key
            );
            continue;
        }
        map.insert(record.key.clone(), record);
    }
    map
}

/// Evaluate the per-field verdicts for one joined pair. A pair with an
/// absent side gets `false` for every field.
pub fn field_verdicts(pair: &JoinedPair, thresholds: &Thresholds) -> BTreeMap<Field, bool> {
    let (left, right) = match (&pair.left, &pair.right) {
        (Some(left), Some(right)) => (left, right),
        _ => return Field::ALL.iter().map(|f| (*f, false)).collect(),
    };

    Field::ALL
        .iter()
        .map(|&field| {
            let a = left.field(field);
            let b = right.field(field);
            let verdict = match field.kind() {
                FieldKind::Exact => a == b,
                FieldKind::FuzzyName => {
                    names_match(a, b, thresholds.min_matched_words, thresholds.similarity)
                }
                FieldKind::FuzzyText => similar(a, b, thresholds.similarity),
            };
            (field, verdict)
        })
        .collect()
}
