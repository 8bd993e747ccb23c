use std::collections::HashMap;
use std::path::PathBuf;

use cotejo_recon::config::ReconConfig;
use cotejo_recon::engine::{load_csv_rows, run};
use cotejo_recon::error::ReconError;
use cotejo_recon::model::{Field, ReconInput, ReconResult, RowBucket};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_and_run(config_toml: &str) -> ReconResult {
    let dir = fixtures_dir();
    let config = ReconConfig::from_toml(config_toml).unwrap();

    let mut records = HashMap::new();
    for (source_name, source_config) in &config.sources {
        let csv_path = dir.join(&source_config.file);
        let csv_data = std::fs::read_to_string(&csv_path)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", csv_path.display()));
        let rows = load_csv_rows(source_name, &csv_data, source_config).unwrap();
        records.insert(source_name.clone(), rows);
    }

    let input = ReconInput { records };
    run(&config, &input).unwrap()
}

fn fixture_config() -> String {
    std::fs::read_to_string(fixtures_dir().join("saf-vs-banner.recon.toml")).unwrap()
}

// -------------------------------------------------------------------------
// End-to-end
// -------------------------------------------------------------------------

#[test]
fn saf_vs_banner_summary() {
    let result = load_and_run(&fixture_config());

    assert_eq!(result.summary.total_rows, 5);
    assert_eq!(result.summary.matched, 2);
    assert_eq!(result.summary.field_mismatches, 1);
    assert_eq!(result.summary.left_only, 1);
    assert_eq!(result.summary.right_only, 1);
    assert_eq!(result.summary.bucket_counts["matched"], 2);
}

#[test]
fn outer_join_is_complete_and_unique() {
    let result = load_and_run(&fixture_config());

    let mut keys: Vec<&str> = result.rows.iter().map(|r| r.key.as_str()).collect();
    keys.sort_unstable();
    let expected = [
        "12345678-9",
        "23456789-0",
        "34567890-1",
        "45678901-2",
        "56789012-3",
    ];
    assert_eq!(keys, expected, "every key in either source, exactly once");
}

#[test]
fn fully_matching_entity_despite_formatting_variance() {
    // SAF carries accents and a single name column; Banner splits the name
    // and folds accents. Every verdict must still come out true.
    let result = load_and_run(&fixture_config());
    let row = result.rows.iter().find(|r| r.key == "12345678-9").unwrap();

    assert_eq!(row.bucket, RowBucket::Matched);
    assert!(row.verdicts.values().all(|v| *v));
    let left = row.left.as_ref().unwrap();
    assert_eq!(left.field(Field::FullName), "juan andres perez lopez");
    assert_eq!(left.field(Field::Program), "industrial");
}

#[test]
fn program_alias_and_accented_spelling_agree() {
    // "inge" (SAF) and "eléctrica" (Banner) both canonicalize to "electrica".
    let result = load_and_run(&fixture_config());
    let row = result.rows.iter().find(|r| r.key == "23456789-0").unwrap();
    assert!(row.verdicts[&Field::Program]);
    assert_eq!(row.right.as_ref().unwrap().field(Field::Program), "electrica");
    // both external advisors are empty, which counts as agreement
    assert!(row.verdicts[&Field::ExternalAdvisor]);
}

#[test]
fn email_change_is_flagged_but_fuzzy_fields_absorb_drift() {
    let result = load_and_run(&fixture_config());
    let row = result.rows.iter().find(|r| r.key == "34567890-1").unwrap();

    assert_eq!(row.bucket, RowBucket::FieldMismatch);
    assert!(!row.verdicts[&Field::Email]);
    // title drifted ("... armado ...") but rates 56/63 ≈ 0.89, above 0.8
    assert!(row.verdicts[&Field::Title]);
    assert!(row.verdicts[&Field::FullName]);
    assert_eq!(result.summary.field_mismatch_counts["email"], 1);
    assert!(!result.summary.field_mismatch_counts.contains_key("title"));
}

#[test]
fn one_sided_rows_fail_every_verdict() {
    let result = load_and_run(&fixture_config());

    let left_only = result.rows.iter().find(|r| r.key == "45678901-2").unwrap();
    assert_eq!(left_only.bucket, RowBucket::LeftOnly);
    assert!(left_only.right.is_none());
    assert!(left_only.verdicts.values().all(|v| !v));

    let right_only = result.rows.iter().find(|r| r.key == "56789012-3").unwrap();
    assert_eq!(right_only.bucket, RowBucket::RightOnly);
    assert!(right_only.left.is_none());
    assert!(right_only.verdicts.values().all(|v| !v));
}

// -------------------------------------------------------------------------
// Configuration overrides
// -------------------------------------------------------------------------

#[test]
fn stricter_similarity_threshold_flags_title_drift() {
    let config = format!(
        "{}\n[thresholds]\nsimilarity = 0.95\nmin_matched_words = 3\n",
        fixture_config()
    );
    let result = load_and_run(&config);

    let row = result.rows.iter().find(|r| r.key == "34567890-1").unwrap();
    assert!(!row.verdicts[&Field::Title]);
    assert_eq!(result.summary.field_mismatch_counts["title"], 1);
    // exact fields are unaffected by the threshold
    let matched = result.rows.iter().find(|r| r.key == "12345678-9").unwrap();
    assert_eq!(matched.bucket, RowBucket::Matched);
}

// -------------------------------------------------------------------------
// Schema failures
// -------------------------------------------------------------------------

#[test]
fn misnamed_column_raises_schema_error_up_front() {
    let config_toml = fixture_config().replace("\"Email alumno\"", "\"Email\"");
    let config = ReconConfig::from_toml(&config_toml).unwrap();

    let csv_data = std::fs::read_to_string(fixtures_dir().join("saf.csv")).unwrap();
    let err = load_csv_rows("saf", &csv_data, &config.sources["saf"]).unwrap_err();
    match err {
        ReconError::MissingColumn { source, column } => {
            assert_eq!(source, "saf");
            assert_eq!(column, "Email");
        }
        other => panic!("expected MissingColumn, got {other}"),
    }
}
