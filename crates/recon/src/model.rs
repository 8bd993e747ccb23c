use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// A comparable canonical field. The join key is handled separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FullName,
    Email,
    Program,
    Title,
    InternalAdvisor,
    ExternalAdvisor,
}

/// How a field's verdict is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Normalized string equality.
    Exact,
    /// Greedy token pairing with a minimum matched-word count.
    FuzzyName,
    /// Whole-string similarity ratio against a threshold.
    FuzzyText,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::FullName,
        Field::Email,
        Field::Program,
        Field::Title,
        Field::InternalAdvisor,
        Field::ExternalAdvisor,
    ];

    pub fn kind(self) -> FieldKind {
        match self {
            Self::FullName => FieldKind::FuzzyName,
            Self::Title => FieldKind::FuzzyText,
            Self::Email | Self::Program | Self::InternalAdvisor | Self::ExternalAdvisor => {
                FieldKind::Exact
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Program => "program",
            Self::Title => "title",
            Self::InternalAdvisor => "internal_advisor",
            Self::ExternalAdvisor => "external_advisor",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single row from one source, projected onto the canonical field set.
///
/// Values are stored as given; [`crate::normalize`] produces the canonical
/// form the engine compares. A field absent from the map reads as empty.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub source: String,
    pub key: String,
    pub fields: BTreeMap<Field, String>,
    pub raw_fields: HashMap<String, String>,
}

impl Record {
    pub fn field(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }
}

/// Pre-loaded records grouped by source name.
pub struct ReconInput {
    pub records: HashMap<String, Vec<Record>>,
}

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowBucket {
    Matched,
    FieldMismatch,
    LeftOnly,
    RightOnly,
}

impl std::fmt::Display for RowBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched => write!(f, "matched"),
            Self::FieldMismatch => write!(f, "field_mismatch"),
            Self::LeftOnly => write!(f, "left_only"),
            Self::RightOnly => write!(f, "right_only"),
        }
    }
}

/// The outer-join result for one key: both (possibly absent) records plus a
/// boolean verdict per comparable field. One-sided rows carry all-false
/// verdicts since the opposing value is absent.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub key: String,
    pub bucket: RowBucket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Record>,
    pub verdicts: BTreeMap<Field, bool>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub total_rows: usize,
    pub matched: usize,
    pub field_mismatches: usize,
    pub left_only: usize,
    pub right_only: usize,
    pub bucket_counts: HashMap<String, usize>,
    /// Among rows present on both sides, how often each field disagreed.
    pub field_mismatch_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub rows: Vec<ComparisonRow>,
}

impl ReconResult {
    /// Serialized hand-off format for reporters (JSON export, highlighting).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_kinds_are_exhaustive() {
        let fuzzy: Vec<Field> = Field::ALL
            .iter()
            .copied()
            .filter(|f| f.kind() != FieldKind::Exact)
            .collect();
        assert_eq!(fuzzy, vec![Field::FullName, Field::Title]);
        assert_eq!(Field::FullName.kind(), FieldKind::FuzzyName);
        assert_eq!(Field::Title.kind(), FieldKind::FuzzyText);
    }

    #[test]
    fn verdict_map_serializes_with_field_names() {
        let mut verdicts = BTreeMap::new();
        verdicts.insert(Field::Email, true);
        verdicts.insert(Field::FullName, false);
        let json = serde_json::to_string(&verdicts).unwrap();
        assert_eq!(json, r#"{"full_name":false,"email":true}"#);
    }

    #[test]
    fn missing_field_reads_as_empty() {
        let record = Record {
            source: "saf".into(),
            key: "1".into(),
            fields: BTreeMap::new(),
            raw_fields: HashMap::new(),
        };
        assert_eq!(record.field(Field::Email), "");
    }
}
