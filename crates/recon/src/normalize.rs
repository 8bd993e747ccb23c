//! Field canonicalization: every comparison in the engine runs on the output
//! of this module, never on raw source values.

use std::collections::BTreeMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::{Field, Record};

/// Canonicalize a free-text value: trim, lowercase, strip diacritics, drop
/// non-ASCII, and map path separators to spaces.
///
/// Idempotent: `normalize_text(normalize_text(x)) == normalize_text(x)`.
pub fn normalize_text(input: &str) -> String {
    let folded: String = input
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii())
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    // trim last: dropped characters and separator mapping can expose new
    // surrounding whitespace, and idempotence requires it gone
    folded.trim().to_string()
}

/// Join keys are trimmed but otherwise kept verbatim.
pub fn normalize_key(input: &str) -> String {
    input.trim().to_string()
}

/// Case-insensitive, idempotent mapping from program labels and
/// abbreviations to one canonical label. Unrecognized values pass through.
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    /// Build a lookup table from raw alias entries. Keys and values are
    /// folded through [`normalize_text`], and every canonical label also
    /// maps to itself, so applying the table twice equals applying it once.
    pub fn new(entries: &BTreeMap<String, String>) -> Self {
        let mut table = BTreeMap::new();
        for (alias, canonical) in entries {
            let canonical = normalize_text(canonical);
            table.insert(normalize_text(alias), canonical.clone());
        }
        let canonicals: Vec<String> = table.values().cloned().collect();
        for canonical in canonicals {
            table.entry(canonical.clone()).or_insert(canonical);
        }
        Self { entries: table }
    }

    pub fn canonicalize(&self, value: &str) -> String {
        let normalized = normalize_text(value);
        match self.entries.get(&normalized) {
            Some(canonical) => canonical.clone(),
            None => normalized,
        }
    }
}

/// Produce the normalized copy of a record the engine compares. The input
/// record is left untouched.
pub fn normalize_record(record: &Record, aliases: &AliasTable) -> Record {
    let mut fields = BTreeMap::new();
    for (field, value) in &record.fields {
        let normalized = match field {
            Field::Program => aliases.canonicalize(value),
            _ => normalize_text(value),
        };
        fields.insert(*field, normalized);
    }
    Record {
        source: record.source.clone(),
        key: normalize_key(&record.key),
        fields,
        raw_fields: record.raw_fields.clone(),
    }
}
