use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::error::ReconError;
use crate::model::Field;
use crate::names::DEFAULT_MIN_MATCHED_WORDS;
use crate::similarity::DEFAULT_SIMILARITY_THRESHOLD;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReconConfig {
    pub name: String,
    pub sources: HashMap<String, SourceConfig>,
    pub pair: PairConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
    /// Program alias → canonical label. Defaults to the built-in table.
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub file: String,
    pub columns: ColumnMapping,
}

/// Source-specific header names for every canonical field. All are required;
/// a source that cannot name a canonical column cannot be reconciled.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    pub key: String,
    pub full_name: String,
    /// Optional second name column, appended to `full_name` with a space.
    /// Some registries deliver given names and surnames separately.
    #[serde(default)]
    pub surname: Option<String>,
    pub email: String,
    pub program: String,
    pub title: String,
    pub internal_advisor: String,
    pub external_advisor: String,
}

impl ColumnMapping {
    pub fn column_for(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Program => &self.program,
            Field::Title => &self.title,
            Field::InternalAdvisor => &self.internal_advisor,
            Field::ExternalAdvisor => &self.external_advisor,
        }
    }
}

// ---------------------------------------------------------------------------
// Pair
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PairConfig {
    pub left: String,
    pub right: String,
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_similarity")]
    pub similarity: f64,
    #[serde(default = "default_min_matched_words")]
    pub min_matched_words: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            similarity: DEFAULT_SIMILARITY_THRESHOLD,
            min_matched_words: DEFAULT_MIN_MATCHED_WORDS,
        }
    }
}

fn default_similarity() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_min_matched_words() -> usize {
    DEFAULT_MIN_MATCHED_WORDS
}

/// Built-in program alias table. Canonical labels are kept in normalized
/// (accent-folded) form so alias application is idempotent.
pub fn default_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("ingi".to_string(), "industrial".to_string()),
        ("inge".to_string(), "electrica".to_string()),
        ("ingo".to_string(), "obras civiles".to_string()),
        ("ingc".to_string(), "ciencia de la computacion".to_string()),
        ("inga".to_string(), "ambiental".to_string()),
    ])
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.sources.len() < 2 {
            return Err(ReconError::ConfigValidation(
                "at least 2 sources are required".into(),
            ));
        }

        if !self.sources.contains_key(&self.pair.left) {
            return Err(ReconError::UnknownSource(format!(
                "pair: left source '{}' not found",
                self.pair.left
            )));
        }
        if !self.sources.contains_key(&self.pair.right) {
            return Err(ReconError::UnknownSource(format!(
                "pair: right source '{}' not found",
                self.pair.right
            )));
        }
        if self.pair.left == self.pair.right {
            return Err(ReconError::ConfigValidation(format!(
                "pair must name two distinct sources, got '{}' twice",
                self.pair.left
            )));
        }

        let t = &self.thresholds;
        if !(t.similarity > 0.0 && t.similarity <= 1.0) {
            return Err(ReconError::ConfigValidation(format!(
                "thresholds.similarity must be in (0, 1], got {}",
                t.similarity
            )));
        }
        if t.min_matched_words == 0 {
            return Err(ReconError::ConfigValidation(
                "thresholds.min_matched_words must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "SAF vs Banner"

[sources.saf]
file = "saf.csv"

[sources.saf.columns]
key               = "RUT"
full_name         = "Nombre alumno"
email             = "Email alumno"
program           = "Especialidad"
title             = "Tema memoria"
internal_advisor  = "Guía Interno"
external_advisor  = "Guía Externo"

[sources.banner]
file = "banner.csv"

[sources.banner.columns]
key               = "Rut Alumno"
full_name         = "Nombres"
surname           = "Apellidos"
email             = "Correo"
program           = "Carrera"
title             = "Título"
internal_advisor  = "Prof. Guía Interno"
external_advisor  = "Prof. Guía Externo"

[pair]
left = "saf"
right = "banner"
"#;

    #[test]
    fn parse_valid_config() {
        let config = ReconConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name, "SAF vs Banner");
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.pair.left, "saf");
        assert_eq!(config.sources["banner"].columns.surname.as_deref(), Some("Apellidos"));
        // defaults
        assert_eq!(config.thresholds.similarity, 0.8);
        assert_eq!(config.thresholds.min_matched_words, 3);
        assert_eq!(config.aliases["ingi"], "industrial");
    }

    #[test]
    fn thresholds_and_aliases_are_overridable() {
        let input = format!(
            r#"{VALID}
[thresholds]
similarity = 0.9
min_matched_words = 2

[aliases]
lic = "licenciatura"
"#
        );
        let config = ReconConfig::from_toml(&input).unwrap();
        assert_eq!(config.thresholds.similarity, 0.9);
        assert_eq!(config.thresholds.min_matched_words, 2);
        assert_eq!(config.aliases["lic"], "licenciatura");
        // an explicit table replaces the built-in one
        assert!(!config.aliases.contains_key("ingi"));
    }

    #[test]
    fn reject_missing_column_mapping() {
        let input = VALID.replace("email             = \"Email alumno\"\n", "");
        let err = ReconConfig::from_toml(&input).unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)), "{err}");
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn reject_unknown_source_in_pair() {
        let input = VALID.replace("right = \"banner\"", "right = \"siga\"");
        let err = ReconConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("'siga'"));
    }

    #[test]
    fn reject_self_pair() {
        let input = VALID.replace("right = \"banner\"", "right = \"saf\"");
        let err = ReconConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("distinct"));
    }

    #[test]
    fn reject_out_of_range_similarity() {
        let input = format!("{VALID}\n[thresholds]\nsimilarity = 1.5\n");
        let err = ReconConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("similarity"));
    }

    #[test]
    fn reject_zero_min_matched_words() {
        let input = format!("{VALID}\n[thresholds]\nmin_matched_words = 0\n");
        let err = ReconConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("min_matched_words"));
    }
}
