use std::collections::{BTreeMap, HashMap};

use log::{debug, info};
use rayon::prelude::*;

use crate::classify::classify_row;
use crate::config::{ReconConfig, SourceConfig};
use crate::error::ReconError;
use crate::evidence::compute_summary;
use crate::matcher::{field_verdicts, outer_join, JoinedPair};
use crate::model::{ComparisonRow, Field, ReconInput, ReconMeta, ReconResult, Record};
use crate::normalize::{normalize_record, AliasTable};

/// Below this many joined keys the rayon fan-out costs more than it saves.
const PARALLEL_THRESHOLD: usize = 100;

/// Run reconciliation per config. Returns classified rows + summary.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let left_raw = input.records.get(&config.pair.left).ok_or_else(|| {
        ReconError::UnknownSource(format!("left source '{}' has no data", config.pair.left))
    })?;
    let right_raw = input.records.get(&config.pair.right).ok_or_else(|| {
        ReconError::UnknownSource(format!("right source '{}' has no data", config.pair.right))
    })?;

    let aliases = AliasTable::new(&config.aliases);
    let left: Vec<Record> = left_raw.iter().map(|r| normalize_record(r, &aliases)).collect();
    let right: Vec<Record> = right_raw.iter().map(|r| normalize_record(r, &aliases)).collect();
    debug!(
        "normalized {} '{}' rows and {} '{}' rows",
        left.len(),
        config.pair.left,
        right.len(),
        config.pair.right
    );

    let pairs = outer_join(&left, &right);
    info!("outer join produced {} keys", pairs.len());

    let evaluate = |pair: JoinedPair| {
        let verdicts = field_verdicts(&pair, &config.thresholds);
        classify_row(pair, verdicts)
    };
    let rows: Vec<ComparisonRow> = if pairs.len() >= PARALLEL_THRESHOLD {
        pairs.into_par_iter().map(evaluate).collect()
    } else {
        pairs.into_iter().map(evaluate).collect()
    };

    let summary = compute_summary(&rows);

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
    })
}

/// Project CSV rows onto canonical records, applying the source's column
/// mapping. Every mapped column must exist in the header row; that check
/// runs once, before any row is read.
pub fn load_csv_rows(
    source_name: &str,
    csv_data: &str,
    source_config: &SourceConfig,
) -> Result<Vec<Record>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let columns = &source_config.columns;

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            ReconError::MissingColumn {
                source: source_name.into(),
                column: name.into(),
            }
        })
    };

    let key_idx = idx(&columns.key)?;
    let mut field_idx: Vec<(Field, usize)> = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        field_idx.push((field, idx(columns.column_for(field))?));
    }
    let surname_idx = match &columns.surname {
        Some(column) => Some(idx(column)?),
        None => None,
    };

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;

        let mut fields = BTreeMap::new();
        for &(field, i) in &field_idx {
            fields.insert(field, record.get(i).unwrap_or("").to_string());
        }

        if let Some(si) = surname_idx {
            let surname = record.get(si).unwrap_or("");
            if !surname.is_empty() {
                let full_name = fields.entry(Field::FullName).or_default();
                full_name.push(' ');
                full_name.push_str(surname);
            }
        }

        let mut raw_fields = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            if let Some(value) = record.get(i) {
                raw_fields.insert(header.clone(), value.to_string());
            }
        }

        rows.push(Record {
            source: source_name.into(),
            key: record.get(key_idx).unwrap_or("").to_string(),
            fields,
            raw_fields,
        });
    }

    debug!("source '{}': loaded {} rows", source_name, rows.len());
    Ok(rows)
}
